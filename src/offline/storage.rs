use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::ports::CacheStorage;
use super::request::{AssetRequest, AssetResponse};

type Generation = BTreeMap<AssetRequest, AssetResponse>;

/// Cache generations held in memory.
#[derive(Default)]
pub struct MemoryCacheStorage {
    caches: Mutex<BTreeMap<String, Generation>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStorage for MemoryCacheStorage {
    async fn open(&self, name: &str) -> Result<()> {
        self.caches.lock().await.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.caches.lock().await.keys().cloned().collect())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        Ok(self.caches.lock().await.remove(name).is_some())
    }

    async fn put_all(&self, name: &str, entries: Vec<(AssetRequest, AssetResponse)>) -> Result<()> {
        let mut caches = self.caches.lock().await;
        let generation = caches.entry(name.to_string()).or_default();
        generation.extend(entries);
        Ok(())
    }

    async fn lookup(&self, request: &AssetRequest) -> Result<Option<AssetResponse>> {
        let caches = self.caches.lock().await;
        Ok(caches.values().find_map(|g| g.get(request).cloned()))
    }

    async fn requests(&self, name: &str) -> Result<Vec<AssetRequest>> {
        let caches = self.caches.lock().await;
        Ok(caches
            .get(name)
            .map(|g| g.keys().cloned().collect())
            .unwrap_or_default())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct EntryMeta {
    request: AssetRequest,
    content_type: String,
}

/// One directory per generation under `root`. Each entry is a body file and
/// a JSON sidecar, both named by the SHA-256 of the request path.
pub struct DirCacheStorage {
    root: PathBuf,
}

impl DirCacheStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn generation_dir(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if !valid {
            return Err(anyhow!("invalid cache name \"{name}\""));
        }
        Ok(self.root.join(name))
    }

    async fn read_entry(dir: &Path, request: &AssetRequest) -> Result<Option<AssetResponse>> {
        let digest = request.digest();
        let meta_path = dir.join(format!("{digest}.json"));
        let meta_raw = match tokio::fs::read(&meta_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).context("Failed to read cache entry metadata"),
        };
        let meta: EntryMeta =
            serde_json::from_slice(&meta_raw).context("Failed to parse cache entry metadata")?;
        let body = tokio::fs::read(dir.join(format!("{digest}.body")))
            .await
            .context("Failed to read cached body")?;
        Ok(Some(AssetResponse {
            path: meta.request.path().to_string(),
            content_type: meta.content_type,
            body,
        }))
    }
}

impl CacheStorage for DirCacheStorage {
    async fn open(&self, name: &str) -> Result<()> {
        let dir = self.generation_dir(name)?;
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create cache {}", dir.display()))
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut rd = match tokio::fs::read_dir(&self.root).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(e).context("Failed to list cache generations"),
        };
        while let Some(entry) = rd.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let dir = self.generation_dir(name)?;
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to delete cache {name}")),
        }
    }

    async fn put_all(&self, name: &str, entries: Vec<(AssetRequest, AssetResponse)>) -> Result<()> {
        let dir = self.generation_dir(name)?;
        tokio::fs::create_dir_all(&dir).await?;
        for (request, response) in entries {
            let digest = request.digest();
            tokio::fs::write(dir.join(format!("{digest}.body")), &response.body).await?;
            let meta = EntryMeta {
                request,
                content_type: response.content_type,
            };
            tokio::fs::write(dir.join(format!("{digest}.json")), serde_json::to_vec(&meta)?)
                .await?;
        }
        Ok(())
    }

    async fn lookup(&self, request: &AssetRequest) -> Result<Option<AssetResponse>> {
        for name in self.keys().await? {
            let dir = self.generation_dir(&name)?;
            if let Some(hit) = Self::read_entry(&dir, request).await? {
                return Ok(Some(hit));
            }
        }
        Ok(None)
    }

    async fn requests(&self, name: &str) -> Result<Vec<AssetRequest>> {
        let dir = self.generation_dir(name)?;
        let mut out = Vec::new();
        let mut rd = match tokio::fs::read_dir(&dir).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(out),
            Err(e) => return Err(e).context("Failed to list cache entries"),
        };
        while let Some(entry) = rd.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let raw = tokio::fs::read(&path).await?;
                let meta: EntryMeta = serde_json::from_slice(&raw)?;
                out.push(meta.request);
            }
        }
        out.sort();
        Ok(out)
    }
}
