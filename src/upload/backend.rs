//! Gallery backends: how a client reaches the proxy.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{GalleryIndex, IndexEntry};
use crate::proxy::{ProxyRequest, UploadProxy};
use crate::store::ContentStore;

/// Operations a gallery client needs from the proxy.
pub trait GalleryBackend: Send + Sync {
    /// Read the current index.
    fn get_index(&self) -> impl Future<Output = Result<GalleryIndex>> + Send;

    /// Store a document; returns its path.
    fn upload_pdf(
        &self,
        filename: &str,
        content_base64: &str,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Append an entry; returns the updated index.
    fn update_index(&self, entry: IndexEntry) -> impl Future<Output = Result<GalleryIndex>> + Send;

    /// Mark an entry as published; returns the updated index.
    fn confirm_entry(&self, id: &str) -> impl Future<Output = Result<GalleryIndex>> + Send;
}

/// Interpret a proxy reply.
fn read_reply(status: u16, body: Option<Value>) -> Result<Value> {
    let body = body.unwrap_or(Value::Null);
    if (200..300).contains(&status) {
        return Ok(body);
    }
    let message = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("request failed")
        .to_string();
    Err(Error::Remote { status, message })
}

fn field<T: DeserializeOwned>(body: &mut Value, name: &str) -> Result<T> {
    match body.get_mut(name) {
        Some(value) => Ok(serde_json::from_value(value.take())?),
        None => Err(Error::Other(format!("Reply is missing `{}`", name))),
    }
}

/// Backend that runs the proxy in-process, going through its JSON surface.
pub struct ProxyBackend<S> {
    proxy: UploadProxy<S>,
}

impl<S: ContentStore> ProxyBackend<S> {
    /// Wrap a proxy.
    pub fn new(proxy: UploadProxy<S>) -> Self {
        Self { proxy }
    }

    /// Proxy over a store with default configuration.
    pub fn from_store(store: S) -> Self {
        Self::new(UploadProxy::new(store))
    }

    /// Get the wrapped proxy.
    pub fn proxy(&self) -> &UploadProxy<S> {
        &self.proxy
    }

    async fn call(&self, request: &ProxyRequest) -> Result<Value> {
        let body = serde_json::to_string(request)?;
        let response = self.proxy.handle("POST", &body).await;
        read_reply(response.status, response.body)
    }
}

impl<S: ContentStore> GalleryBackend for ProxyBackend<S> {
    async fn get_index(&self) -> Result<GalleryIndex> {
        let body = self.call(&ProxyRequest::GetIndex).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn upload_pdf(&self, filename: &str, content_base64: &str) -> Result<String> {
        let request = ProxyRequest::UploadPdf {
            filename: filename.to_string(),
            content_base64: content_base64.to_string(),
        };
        let mut body = self.call(&request).await?;
        field(&mut body, "path")
    }

    async fn update_index(&self, entry: IndexEntry) -> Result<GalleryIndex> {
        let mut body = self.call(&ProxyRequest::UpdateIndex { entry }).await?;
        field(&mut body, "data")
    }

    async fn confirm_entry(&self, id: &str) -> Result<GalleryIndex> {
        let request = ProxyRequest::ConfirmEntry { id: id.to_string() };
        let mut body = self.call(&request).await?;
        field(&mut body, "data")
    }
}

/// Backend that posts to a deployed proxy over HTTP.
#[cfg(feature = "http")]
pub struct HttpBackend {
    endpoint: String,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpBackend {
    /// Create a backend for the proxy at `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    /// Create a backend sharing an existing HTTP client.
    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// Get the proxy endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(&self, request: &ProxyRequest) -> Result<Value> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.ok();
        log::debug!("{} -> {}", request.action(), status);
        read_reply(status, body)
    }
}

#[cfg(feature = "http")]
impl GalleryBackend for HttpBackend {
    async fn get_index(&self) -> Result<GalleryIndex> {
        let body = self.call(&ProxyRequest::GetIndex).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn upload_pdf(&self, filename: &str, content_base64: &str) -> Result<String> {
        let request = ProxyRequest::UploadPdf {
            filename: filename.to_string(),
            content_base64: content_base64.to_string(),
        };
        let mut body = self.call(&request).await?;
        field(&mut body, "path")
    }

    async fn update_index(&self, entry: IndexEntry) -> Result<GalleryIndex> {
        let mut body = self.call(&ProxyRequest::UpdateIndex { entry }).await?;
        field(&mut body, "data")
    }

    async fn confirm_entry(&self, id: &str) -> Result<GalleryIndex> {
        let request = ProxyRequest::ConfirmEntry { id: id.to_string() };
        let mut body = self.call(&request).await?;
        field(&mut body, "data")
    }
}
