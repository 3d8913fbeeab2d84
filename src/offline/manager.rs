use tracing::{error, info, warn};

use super::errors::CacheError;
use super::ports::{CacheStorage, Fetcher};
use super::request::{AssetRequest, AssetResponse};

/// Name of the cache generation shipped with this release.
pub const CACHE_VERSION: &str = "pwa-vault-v1";

/// Assets every install must cache.
pub const DEFAULT_MANIFEST: &[&str] = &[
    "./",
    "./index.html",
    "./style.css",
    "./app.js",
    "./manifest.json",
    "./icons/icon-192.png",
    "./icons/icon-512.png",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Served {
    Cached(AssetResponse),
    Network(AssetResponse),
    /// Not cached and the origin could not produce it.
    NotFound,
}

impl Served {
    pub fn response(&self) -> Option<&AssetResponse> {
        match self {
            Served::Cached(r) | Served::Network(r) => Some(r),
            Served::NotFound => None,
        }
    }
}

/// Install/activate/serve lifecycle over versioned cache generations.
pub struct CacheManager<S, F> {
    version: String,
    storage: S,
    fetcher: F,
}

impl<S: CacheStorage, F: Fetcher> CacheManager<S, F> {
    pub fn new(version: impl Into<String>, storage: S, fetcher: F) -> Self {
        Self {
            version: version.into(),
            storage,
            fetcher,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Open the current generation and cache every manifest entry.
    /// All-or-nothing: if any asset fails to fetch, nothing is stored.
    pub async fn install(&self, manifest: &[&str]) -> Result<usize, CacheError> {
        self.storage.open(&self.version).await?;
        info!(version = %self.version, count = manifest.len(), "caching all assets");

        let mut fetched = Vec::with_capacity(manifest.len());
        for raw in manifest {
            let request = AssetRequest::new(raw);
            match self.fetcher.fetch(&request).await {
                Ok(response) => fetched.push((request, response)),
                Err(source) => {
                    return Err(CacheError::Install {
                        version: self.version.clone(),
                        path: request.to_string(),
                        source,
                    })
                }
            }
        }

        let count = fetched.len();
        self.storage.put_all(&self.version, fetched).await?;
        Ok(count)
    }

    /// Delete every generation other than the current one. Returns the names
    /// that were deleted.
    pub async fn activate(&self) -> Result<Vec<String>, CacheError> {
        let mut deleted = Vec::new();
        for name in self.storage.keys().await? {
            if name != self.version {
                info!(cache = %name, "clearing old cache");
                if self.storage.delete(&name).await? {
                    deleted.push(name);
                }
            }
        }
        Ok(deleted)
    }

    /// Cache first, then the origin. An origin failure is logged and yields
    /// [`Served::NotFound`].
    pub async fn serve(&self, request: &AssetRequest) -> Served {
        match self.storage.lookup(request).await {
            Ok(Some(hit)) => return Served::Cached(hit),
            Ok(None) => {}
            Err(e) => warn!(%request, error = %e, "cache lookup failed, trying origin"),
        }
        match self.fetcher.fetch(request).await {
            Ok(response) => Served::Network(response),
            Err(e) => {
                error!(%request, error = %e, "fetch failed");
                Served::NotFound
            }
        }
    }

    /// Install then activate, as done once at startup.
    pub async fn register(&self, manifest: &[&str]) -> Result<(), CacheError> {
        let cached = self.install(manifest).await?;
        let cleared = self.activate().await?;
        info!(version = %self.version, cached, cleared = cleared.len(), "offline cache ready");
        Ok(())
    }
}
