//! Content stores: where documents and the index are persisted.
//!
//! A store holds base64 file contents under repository-relative paths and
//! versions each file with a revision token (`sha`). Writes that replace
//! an existing file must present its current token.

#[cfg(feature = "http")]
mod github;
mod memory;

#[cfg(feature = "http")]
pub use github::{GithubConfig, GithubStore};
pub use memory::{Commit, MemoryStore};

use std::future::Future;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::Result;

/// A file read from a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// File content, base64-encoded
    pub content_base64: String,
    /// Revision token of this version
    pub sha: String,
}

impl StoredFile {
    /// Decode the content. Embedded line breaks are ignored.
    pub fn decode(&self) -> Result<Vec<u8>> {
        decode_content(&self.content_base64)
    }

    /// Decode the content as UTF-8 text.
    pub fn decode_text(&self) -> Result<String> {
        let bytes = self.decode()?;
        String::from_utf8(bytes).map_err(|e| crate::Error::InvalidInput(e.to_string()))
    }
}

/// Persistent storage for documents and the gallery index.
pub trait ContentStore: Send + Sync {
    /// Read a file and its revision token.
    fn get_file(&self, path: &str) -> impl Future<Output = Result<StoredFile>> + Send;

    /// Create or replace a file; returns the new revision token.
    ///
    /// `sha` must be the current token when replacing a file, and `None`
    /// when creating one.
    fn put_file(
        &self,
        path: &str,
        content_base64: &str,
        message: &str,
        sha: Option<&str>,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Decode base64 content, skipping embedded line breaks.
pub fn decode_content(content_base64: &str) -> Result<Vec<u8>> {
    let cleaned: String = content_base64
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r'))
        .collect();
    Ok(STANDARD.decode(cleaned)?)
}

/// Encode bytes as standard base64.
pub fn encode_content(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ignores_line_breaks() {
        let encoded = encode_content(b"{\"files\":[],\"hashtags\":[]}");
        let wrapped = format!("{}\n{}\r\n", &encoded[..10], &encoded[10..]);
        assert_eq!(decode_content(&wrapped).unwrap(), b"{\"files\":[],\"hashtags\":[]}");
    }

    #[test]
    fn test_decode_text() {
        let file = StoredFile {
            content_base64: encode_content("résumé".as_bytes()),
            sha: "abc".into(),
        };
        assert_eq!(file.decode_text().unwrap(), "résumé");
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(decode_content("***"), Err(crate::Error::Base64(_))));
    }
}
