use anyhow::Result;
use std::future::Future;

use super::errors::FetchError;
use super::request::{AssetRequest, AssetResponse};

/// Named cache generations, each a map from request to response.
pub trait CacheStorage: Send + Sync {
    /// Create the generation if it does not exist yet.
    fn open(&self, name: &str) -> impl Future<Output = Result<()>> + Send;
    fn keys(&self) -> impl Future<Output = Result<Vec<String>>> + Send;
    /// Returns whether a generation was removed.
    fn delete(&self, name: &str) -> impl Future<Output = Result<bool>> + Send;
    fn put_all(
        &self,
        name: &str,
        entries: Vec<(AssetRequest, AssetResponse)>,
    ) -> impl Future<Output = Result<()>> + Send;
    /// First match across all generations, in `keys()` order.
    fn lookup(
        &self,
        request: &AssetRequest,
    ) -> impl Future<Output = Result<Option<AssetResponse>>> + Send;
    fn requests(&self, name: &str) -> impl Future<Output = Result<Vec<AssetRequest>>> + Send;
}

/// Where assets come from when they are not cached.
pub trait Fetcher: Send + Sync {
    fn fetch(
        &self,
        request: &AssetRequest,
    ) -> impl Future<Output = Result<AssetResponse, FetchError>> + Send;
}
