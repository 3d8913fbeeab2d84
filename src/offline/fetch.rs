use std::path::{Component, Path, PathBuf};

use super::errors::FetchError;
use super::ports::Fetcher;
use super::request::{AssetRequest, AssetResponse};

const ROOT_DOCUMENT: &str = "index.html";

/// Serves assets out of the deployed static directory.
pub struct DirFetcher {
    origin: PathBuf,
}

impl DirFetcher {
    pub fn new(origin: PathBuf) -> Self {
        Self { origin }
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    fn resolve(&self, request: &AssetRequest) -> Result<PathBuf, FetchError> {
        let rel = if request.is_root() { ROOT_DOCUMENT } else { request.path() };
        let rel_path = Path::new(rel);
        let escapes = rel_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(FetchError::Forbidden(request.to_string()));
        }
        Ok(self.origin.join(rel_path))
    }
}

impl Fetcher for DirFetcher {
    async fn fetch(&self, request: &AssetRequest) -> Result<AssetResponse, FetchError> {
        let path = self.resolve(request)?;
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(AssetResponse::new(request, body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::NotFound(request.to_string()))
            }
            Err(source) => Err(FetchError::Io {
                path: request.to_string(),
                source,
            }),
        }
    }
}
