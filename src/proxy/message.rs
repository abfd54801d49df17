//! Proxy wire types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Error;
use crate::model::IndexEntry;

/// Actions understood by the proxy.
pub const ACTIONS: [&str; 4] = ["upload_pdf", "update_index", "confirm_entry", "get_index"];

/// A request body, tagged by its `action` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ProxyRequest {
    /// Store a document under the data directory
    UploadPdf {
        /// Sanitized file name
        filename: String,
        /// Document bytes, base64-encoded
        content_base64: String,
    },

    /// Append an entry to the index
    UpdateIndex {
        /// Entry to append
        entry: IndexEntry,
    },

    /// Mark an indexed entry as published
    ConfirmEntry {
        /// Entry id
        id: String,
    },

    /// Read the index
    GetIndex,
}

impl ProxyRequest {
    /// The `action` tag of this request.
    pub fn action(&self) -> &'static str {
        match self {
            ProxyRequest::UploadPdf { .. } => "upload_pdf",
            ProxyRequest::UpdateIndex { .. } => "update_index",
            ProxyRequest::ConfirmEntry { .. } => "confirm_entry",
            ProxyRequest::GetIndex => "get_index",
        }
    }
}

/// A response ready to hand to an HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    /// HTTP status
    pub status: u16,
    /// Response headers, in insertion order
    pub headers: Vec<(String, String)>,
    /// JSON body, absent for preflight responses
    pub body: Option<Value>,
}

impl ProxyResponse {
    /// An empty response.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: None,
        }
    }

    /// A JSON response.
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }

    /// A JSON `{ "error": message }` response.
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(status, json!({ "error": message.into() }))
    }

    /// Add or replace a header.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some(header) => header.1 = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }

    /// Look up a header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body serialized as JSON text (empty for bodiless responses).
    pub fn body_text(&self) -> String {
        self.body.as_ref().map(Value::to_string).unwrap_or_default()
    }

    /// The `error` message of a failed response.
    pub fn error_message(&self) -> Option<&str> {
        self.body.as_ref()?.get("error")?.as_str()
    }
}

impl From<Error> for ProxyResponse {
    fn from(err: Error) -> Self {
        ProxyResponse::error(err.status_code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_request_wire_shape() {
        let request: ProxyRequest = serde_json::from_str(
            r#"{"action":"upload_pdf","filename":"a.pdf","content_base64":"JVBERg=="}"#,
        )
        .unwrap();
        assert_eq!(request.action(), "upload_pdf");

        let request = ProxyRequest::UpdateIndex {
            entry: IndexEntry::new("k1", "a.pdf", Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["action"], "update_index");
        assert_eq!(value["entry"]["filename"], "a.pdf");
        assert_eq!(value["entry"]["upload_date"], "2024-05-01T12:00:00Z");

        let value = serde_json::to_value(ProxyRequest::GetIndex).unwrap();
        assert_eq!(value, json!({ "action": "get_index" }));
    }

    #[test]
    fn test_actions_cover_variants() {
        let request = ProxyRequest::ConfirmEntry { id: "x".into() };
        assert!(ACTIONS.contains(&request.action()));
        assert!(ACTIONS.contains(&ProxyRequest::GetIndex.action()));
    }

    #[test]
    fn test_error_response() {
        let response: ProxyResponse = Error::Conflict("data.json".into()).into();
        assert_eq!(response.status, 409);
        assert_eq!(response.error_message(), Some("Revision conflict on data.json"));
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert!(!response.is_success());
    }

    #[test]
    fn test_set_header_replaces() {
        let mut response = ProxyResponse::empty(204);
        response.set_header("Access-Control-Allow-Origin", "*");
        response.set_header("access-control-allow-origin", "https://a.example");
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("https://a.example"));
        assert_eq!(response.body_text(), "");
    }
}
