use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Request for one static asset, identified by its path relative to the
/// origin root. `./`, `/` and the empty string all name the root document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetRequest {
    path: String,
}

impl AssetRequest {
    pub fn new(raw: &str) -> Self {
        let mut path = raw.trim();
        loop {
            if let Some(rest) = path.strip_prefix("./") {
                path = rest;
            } else if let Some(rest) = path.strip_prefix('/') {
                path = rest;
            } else {
                break;
            }
        }
        if path == "." {
            path = "";
        }
        Self { path: path.to_string() }
    }

    /// Normalized path; empty for the root document.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Stable file-name-safe key for this request.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.path.as_bytes()))
    }
}

impl fmt::Display for AssetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "./{}", self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetResponse {
    pub path: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl AssetResponse {
    pub fn new(request: &AssetRequest, body: Vec<u8>) -> Self {
        Self {
            path: request.path().to_string(),
            content_type: content_type_for(request).to_string(),
            body,
        }
    }
}

pub fn content_type_for(request: &AssetRequest) -> &'static str {
    if request.is_root() {
        return "text/html";
    }
    let ext = request
        .path()
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        "webmanifest" => "application/manifest+json",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_spellings_normalize_to_empty() {
        for raw in ["./", "/", "", ".", " ./ "] {
            assert!(AssetRequest::new(raw).is_root(), "{raw:?}");
        }
    }

    #[test]
    fn relative_prefixes_are_stripped() {
        assert_eq!(AssetRequest::new("./icons/icon-192.png").path(), "icons/icon-192.png");
        assert_eq!(AssetRequest::new("/style.css"), AssetRequest::new("./style.css"));
    }

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(content_type_for(&AssetRequest::new("./")), "text/html");
        assert_eq!(content_type_for(&AssetRequest::new("./app.js")), "text/javascript");
        assert_eq!(content_type_for(&AssetRequest::new("./icons/a.PNG")), "image/png");
        assert_eq!(content_type_for(&AssetRequest::new("./blob")), "application/octet-stream");
    }
}
