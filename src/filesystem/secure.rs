//! Crash-safe writes for the record store: the value goes to a private temp
//! file that is renamed over the target, after earlier values are shifted
//! into numbered backups.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// `<file>.n`; `.1` is the newest backup.
pub fn backup_path(path: &Path, n: usize) -> PathBuf {
    PathBuf::from(format!("{}.{n}", path.display()))
}

/// Replace the contents of `path`, keeping up to `backups` earlier values.
/// A backup that cannot be rotated is logged and skipped; only the write of
/// the live file itself can fail the call.
pub fn write_with_backups(path: &Path, bytes: &[u8], backups: usize) -> Result<()> {
    if let Some(dir) = path.parent() {
        create_private_dir(dir)?;
    }
    rotate_backups(path, backups);
    replace_atomically(path, bytes)
}

fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create storage directory {}", dir.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = fs::set_permissions(dir, fs::Permissions::from_mode(0o700)) {
            warn!(dir = %dir.display(), error = %e, "could not restrict storage directory");
        }
    }
    Ok(())
}

fn rotate_backups(path: &Path, keep: usize) {
    if keep == 0 {
        return;
    }
    let oldest = backup_path(path, keep);
    match fs::remove_file(&oldest) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(file = %oldest.display(), error = %e, "could not drop oldest backup"),
    }

    for i in (1..keep).rev() {
        let from = backup_path(path, i);
        if !from.exists() {
            continue;
        }
        let to = backup_path(path, i + 1);
        if let Err(e) = fs::rename(&from, &to) {
            warn!(from = %from.display(), to = %to.display(), error = %e, "could not shift backup");
        }
    }

    if path.exists() {
        // copy keeps the 0600 mode of the live file
        let newest = backup_path(path, 1);
        if let Err(e) = fs::copy(path, &newest) {
            warn!(file = %newest.display(), error = %e, "could not back up previous value");
        }
    }
}

fn replace_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    let mut file = open_private(&tmp)
        .with_context(|| format!("Failed to create temporary file {}", tmp.display()))?;
    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .with_context(|| format!("Failed to write temporary file {}", tmp.display()))?;
    drop(file);
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace {} atomically", path.display()))
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // a stale temp file keeps its old mode
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<File> {
    File::create(path)
}
