use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("asset not found at origin: {0}")]
    NotFound(String),
    #[error("asset path escapes the origin: {0}")]
    Forbidden(String),
    #[error("failed to read asset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("install of {version} aborted, {path} could not be fetched: {source}")]
    Install {
        version: String,
        path: String,
        #[source]
        source: FetchError,
    },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
