use pwa_vault::filesystem::secure::backup_path;
use pwa_vault::filesystem::store::FileKeyValueStore;
use pwa_vault::vault::codec::JsonCodec;
use pwa_vault::vault::models::RecordInput;
use pwa_vault::vault::persistence::{Persistence, NAMESPACE_KEY};
use pwa_vault::vault::ports::KeyValueStorage;
#[cfg(target_family = "unix")]
use std::os::unix::fs::PermissionsExt;
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn missing_key_reads_as_none_and_set_round_trips() {
    let dir = tempdir().unwrap();
    let store = FileKeyValueStore::new(dir.path().join("data"));
    assert_eq!(store.get(NAMESPACE_KEY).unwrap(), None);

    store.set(NAMESPACE_KEY, "[]").unwrap();
    assert_eq!(store.get(NAMESPACE_KEY).unwrap().as_deref(), Some("[]"));

    #[cfg(target_family = "unix")]
    {
        let mode = fs::metadata(store.path_for(NAMESPACE_KEY).unwrap())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn rotating_backups_keep_two_versions_and_prune() {
    let dir = tempdir().unwrap();
    let store = FileKeyValueStore::new_with_backups(dir.path().to_path_buf(), 2);
    for value in ["one", "two", "three", "four"] {
        store.set(NAMESPACE_KEY, value).unwrap();
    }
    let path = store.path_for(NAMESPACE_KEY).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "four");
    assert_eq!(fs::read_to_string(backup_path(&path, 1)).unwrap(), "three");
    assert_eq!(fs::read_to_string(backup_path(&path, 2)).unwrap(), "two");
    assert!(!backup_path(&path, 3).exists());
}

#[test]
fn path_like_keys_are_rejected() {
    let dir = tempdir().unwrap();
    let store = FileKeyValueStore::new(dir.path().to_path_buf());
    for key in ["", "..", "../escape", "a/b", "with space"] {
        assert!(store.set(key, "x").is_err(), "{key:?}");
    }
}

#[test]
fn records_survive_a_fresh_store_over_the_same_directory() {
    let dir = tempdir().unwrap();
    let first = Persistence::new(
        Arc::new(FileKeyValueStore::new(dir.path().to_path_buf())),
        Arc::new(JsonCodec),
    );
    let record = RecordInput::new("Mail", "a@b.com", "", "x1").into_record("abc123xyz".into());
    first.save(std::slice::from_ref(&record)).unwrap();

    let second = Persistence::new(
        Arc::new(FileKeyValueStore::new(dir.path().to_path_buf())),
        Arc::new(JsonCodec),
    );
    assert_eq!(second.load().unwrap(), vec![record]);
}
