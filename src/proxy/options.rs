//! Proxy configuration.

use crate::upload::MAX_UPLOAD_BYTES;

/// Path of the gallery index inside the store.
pub const INDEX_PATH: &str = "data.json";

/// Directory that receives uploaded documents.
pub const DATA_DIR: &str = "data";

/// Options for the upload proxy.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Value of `Access-Control-Allow-Origin`
    pub allowed_origin: String,

    /// Largest accepted document, in decoded bytes
    pub max_upload_bytes: usize,

    /// Index path in the store
    pub index_path: String,

    /// Document directory in the store
    pub data_dir: String,
}

impl ProxyConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict CORS to one origin. A blank origin keeps the wildcard.
    pub fn with_allowed_origin(mut self, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        if !origin.trim().is_empty() {
            self.allowed_origin = origin.trim().to_string();
        }
        self
    }

    /// Set the upload size limit.
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    /// Set the index path.
    pub fn with_index_path(mut self, path: impl Into<String>) -> Self {
        self.index_path = path.into();
        self
    }

    /// Set the document directory.
    pub fn with_data_dir(mut self, dir: impl Into<String>) -> Self {
        self.data_dir = dir.into().trim_end_matches('/').to_string();
        self
    }

    /// Store path for an uploaded document.
    pub fn document_path(&self, filename: &str) -> String {
        format!("{}/{}", self.data_dir, filename)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "*".to_string(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            index_path: INDEX_PATH.to_string(),
            data_dir: DATA_DIR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_config_defaults() {
        let config = ProxyConfig::default();
        assert_eq!(config.allowed_origin, "*");
        assert_eq!(config.max_upload_bytes, 2 * 1024 * 1024);
        assert_eq!(config.document_path("a.pdf"), "data/a.pdf");
    }

    #[test]
    fn test_proxy_config_builder() {
        let config = ProxyConfig::new()
            .with_allowed_origin("https://gallery.example")
            .with_data_dir("docs/")
            .with_index_path("docs/index.json");
        assert_eq!(config.allowed_origin, "https://gallery.example");
        assert_eq!(config.document_path("a.pdf"), "docs/a.pdf");
        assert_eq!(config.index_path, "docs/index.json");

        let config = ProxyConfig::new().with_allowed_origin("  ");
        assert_eq!(config.allowed_origin, "*");
    }
}
