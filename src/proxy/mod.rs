//! Upload proxy: the only component that talks to the content store.
//!
//! Browsers post JSON action requests here; the proxy validates them,
//! reads and writes the store, and answers with CORS headers attached so
//! the gallery can call it cross-origin. The HTTP server itself is left to
//! the embedding application, which passes the method and raw body to
//! [`UploadProxy::handle`].

mod message;
mod options;

pub use message::{ProxyRequest, ProxyResponse, ACTIONS};
pub use options::{ProxyConfig, DATA_DIR, INDEX_PATH};

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::model::{GalleryIndex, IndexEntry};
use crate::store::{encode_content, ContentStore};
use crate::upload::estimated_decoded_len;

/// Request handler over a content store.
pub struct UploadProxy<S> {
    store: S,
    config: ProxyConfig,
}

impl<S: ContentStore> UploadProxy<S> {
    /// Create a proxy with default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, ProxyConfig::default())
    }

    /// Create a proxy with explicit configuration.
    pub fn with_config(store: S, config: ProxyConfig) -> Self {
        Self { store, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle an HTTP request given its method and raw body.
    pub async fn handle(&self, method: &str, body: &str) -> ProxyResponse {
        let response = self.route(method, body).await;
        self.with_cors(response)
    }

    async fn route(&self, method: &str, body: &str) -> ProxyResponse {
        if method.eq_ignore_ascii_case("OPTIONS") {
            return ProxyResponse::empty(204);
        }
        if !method.eq_ignore_ascii_case("POST") {
            return ProxyResponse::error(405, "Method not allowed");
        }

        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(_) => return ProxyResponse::error(400, "Invalid JSON"),
        };

        let action = value
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        if !ACTIONS.contains(&action.as_str()) {
            log::warn!("Rejected unknown action {:?}", action);
            return ProxyResponse::error(400, "Unknown action");
        }

        let request: ProxyRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => return ProxyResponse::error(400, format!("Malformed {} request: {}", action, e)),
        };

        match self.execute(request).await {
            Ok(body) => ProxyResponse::json(200, body),
            Err(e) => {
                log::warn!("{} failed: {}", action, e);
                e.into()
            }
        }
    }

    /// Run a typed request and return the success body.
    pub async fn execute(&self, request: ProxyRequest) -> Result<Value> {
        match request {
            ProxyRequest::UploadPdf {
                filename,
                content_base64,
            } => {
                let path = self.upload_pdf(&filename, &content_base64).await?;
                Ok(json!({ "ok": true, "path": path }))
            }
            ProxyRequest::UpdateIndex { entry } => {
                let index = self.update_index(entry).await?;
                Ok(json!({ "ok": true, "data": index }))
            }
            ProxyRequest::ConfirmEntry { id } => {
                let index = self.confirm_entry(&id).await?;
                Ok(json!({ "ok": true, "data": index }))
            }
            ProxyRequest::GetIndex => Ok(serde_json::to_value(self.get_index().await?)?),
        }
    }

    /// Store a document; returns its path in the store.
    pub async fn upload_pdf(&self, filename: &str, content_base64: &str) -> Result<String> {
        if filename.is_empty() || content_base64.is_empty() {
            return Err(Error::InvalidInput(
                "filename and content_base64 are required".to_string(),
            ));
        }
        if filename.contains(['/', '\\']) || filename.starts_with('.') {
            return Err(Error::InvalidInput(format!("Invalid file name: {}", filename)));
        }

        let size = estimated_decoded_len(content_base64);
        if size > self.config.max_upload_bytes {
            return Err(Error::FileTooLarge {
                size,
                limit: self.config.max_upload_bytes,
            });
        }

        let path = self.config.document_path(filename);
        self.store
            .put_file(&path, content_base64, &format!("upload: {}", filename), None)
            .await?;
        log::info!("Uploaded {} ({} bytes)", path, size);
        Ok(path)
    }

    /// Append an entry to the index; returns the updated index.
    pub async fn update_index(&self, entry: IndexEntry) -> Result<GalleryIndex> {
        if entry.filename.is_empty() {
            return Err(Error::InvalidInput("entry.filename is required".to_string()));
        }

        let (mut index, sha) = self.read_index().await?;
        let message = format!("index: add {}", entry.filename);
        index.add_entry(entry);
        self.write_index(&index, &message, &sha).await?;
        Ok(index)
    }

    /// Mark an entry as published; returns the updated index.
    pub async fn confirm_entry(&self, id: &str) -> Result<GalleryIndex> {
        let (mut index, sha) = self.read_index().await?;
        if !index.confirm(id) {
            return Err(Error::NotFound(format!("entry {}", id)));
        }
        let filename = index.get(id).map(|e| e.filename.clone()).unwrap_or_default();
        self.write_index(&index, &format!("index: confirm {}", filename), &sha)
            .await?;
        Ok(index)
    }

    /// Read the current index.
    pub async fn get_index(&self) -> Result<GalleryIndex> {
        Ok(self.read_index().await?.0)
    }

    async fn read_index(&self) -> Result<(GalleryIndex, String)> {
        let file = self.store.get_file(&self.config.index_path).await?;
        let index = GalleryIndex::from_json(&file.decode_text()?)?;
        Ok((index, file.sha))
    }

    async fn write_index(&self, index: &GalleryIndex, message: &str, sha: &str) -> Result<()> {
        let json = index.to_pretty_json()?;
        self.store
            .put_file(
                &self.config.index_path,
                &encode_content(json.as_bytes()),
                message,
                Some(sha),
            )
            .await?;
        log::info!("{} ({} files)", message, index.file_count());
        Ok(())
    }

    fn with_cors(&self, mut response: ProxyResponse) -> ProxyResponse {
        response.set_header("Access-Control-Allow-Origin", self.config.allowed_origin.as_str());
        response.set_header("Access-Control-Allow-Methods", "POST, OPTIONS");
        response.set_header("Access-Control-Allow-Headers", "Content-Type");
        response.set_header("Access-Control-Max-Age", "86400");
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn proxy() -> UploadProxy<MemoryStore> {
        UploadProxy::new(MemoryStore::with_empty_index())
    }

    #[tokio::test]
    async fn test_preflight() {
        let response = proxy().handle("OPTIONS", "").await;
        assert_eq!(response.status, 204);
        assert!(response.body.is_none());
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(response.header("Access-Control-Allow-Methods"), Some("POST, OPTIONS"));
        assert_eq!(response.header("Access-Control-Allow-Headers"), Some("Content-Type"));
        assert_eq!(response.header("Access-Control-Max-Age"), Some("86400"));
    }

    #[tokio::test]
    async fn test_method_and_body_errors() {
        let proxy = proxy();
        let response = proxy.handle("GET", "").await;
        assert_eq!(response.status, 405);
        assert!(response.header("Access-Control-Allow-Origin").is_some());

        assert_eq!(proxy.handle("POST", "{not json").await.status, 400);

        let response = proxy.handle("POST", r#"{"action":"delete_everything"}"#).await;
        assert_eq!(response.status, 400);
        assert_eq!(response.error_message(), Some("Unknown action"));

        let response = proxy.handle("POST", r#"{"action":"upload_pdf","filename":"a.pdf"}"#).await;
        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn test_upload_pdf() {
        let proxy = proxy();
        let body = json!({
            "action": "upload_pdf",
            "filename": "notes.pdf",
            "content_base64": encode_content(b"%PDF-1.4 tiny"),
        });
        let response = proxy.handle("POST", &body.to_string()).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, Some(json!({ "ok": true, "path": "data/notes.pdf" })));
        assert_eq!(proxy.store().read("data/notes.pdf").unwrap(), b"%PDF-1.4 tiny");
        assert_eq!(proxy.store().commits()[0].message, "upload: notes.pdf");
    }

    #[tokio::test]
    async fn test_upload_rejects_traversal_and_duplicates() {
        let proxy = proxy();
        let err = proxy.upload_pdf("../data.json", "JVBERg==").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        proxy.upload_pdf("a.pdf", "JVBERg==").await.unwrap();
        let err = proxy.upload_pdf("a.pdf", "JVBERg==").await.unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_upload_size_limit() {
        let proxy = UploadProxy::with_config(
            MemoryStore::with_empty_index(),
            ProxyConfig::new().with_max_upload_bytes(6),
        );
        // 12 base64 chars estimate to 9 bytes
        let err = proxy.upload_pdf("big.pdf", "QUJDREVGR0hJ").await.unwrap_err();
        assert!(matches!(err, Error::FileTooLarge { size: 9, limit: 6 }));
        assert!(!proxy.store().contains("data/big.pdf"));
    }

    #[tokio::test]
    async fn test_upload_at_exact_limit() {
        let proxy = proxy();
        let limit = proxy.config().max_upload_bytes;

        let exact = encode_content(&vec![b'x'; limit]);
        assert_eq!(proxy.upload_pdf("exact.pdf", &exact).await.unwrap(), "data/exact.pdf");

        let over = encode_content(&vec![b'x'; limit + 1]);
        let err = proxy.upload_pdf("over.pdf", &over).await.unwrap_err();
        assert!(matches!(err, Error::FileTooLarge { .. }));
    }

    #[tokio::test]
    async fn test_malformed_request_names_action() {
        let response = proxy().handle("POST", r#"{"action":"rename"}"#).await;
        assert_eq!(response.status, 400);

        let response = proxy()
            .handle("POST", r#"{"action":"confirm_entry","ident":"x"}"#)
            .await;
        assert_eq!(response.status, 400);
        assert!(response
            .error_message()
            .is_some_and(|m| m.starts_with("Malformed confirm_entry request")));
    }

    #[tokio::test]
    async fn test_get_index_missing_maps_to_404() {
        let proxy = UploadProxy::new(MemoryStore::new());
        let response = proxy.handle("POST", r#"{"action":"get_index"}"#).await;
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_confirm_unknown_entry() {
        let response = proxy()
            .handle("POST", r#"{"action":"confirm_entry","id":"nope"}"#)
            .await;
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_configured_origin() {
        let proxy = UploadProxy::with_config(
            MemoryStore::with_empty_index(),
            ProxyConfig::new().with_allowed_origin("https://gallery.example"),
        );
        let response = proxy.handle("POST", r#"{"action":"get_index"}"#).await;
        assert_eq!(response.status, 200);
        assert_eq!(
            response.header("Access-Control-Allow-Origin"),
            Some("https://gallery.example")
        );
        assert_eq!(response.body, Some(json!({ "files": [], "hashtags": [] })));
    }
}
