//! Offline asset cache: keeps the static assets of one release available
//! when the origin cannot be reached.

pub mod errors;
pub mod fetch;
pub mod manager;
pub mod ports;
pub mod request;
pub mod storage;

pub use manager::{CacheManager, Served, CACHE_VERSION, DEFAULT_MANIFEST};
