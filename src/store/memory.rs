//! In-memory content store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use md5::{Digest, Md5};

use super::{decode_content, ContentStore, StoredFile};
use crate::error::{Error, Result};

/// A commit recorded by the memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Path written
    pub path: String,
    /// Commit message
    pub message: String,
}

#[derive(Debug, Default)]
struct Inner {
    files: HashMap<String, StoredFile>,
    commits: Vec<Commit>,
}

/// Content store kept in process memory.
///
/// Revision tokens are derived from the file content, and stale or
/// missing tokens are rejected the way a hosted repository would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an empty gallery index at `data.json`.
    pub fn with_empty_index() -> Self {
        let store = Self::new();
        store.insert("data.json", br#"{"files":[],"hashtags":[]}"#);
        store
    }

    /// Place a file directly, bypassing revision checks.
    pub fn insert(&self, path: &str, content: &[u8]) {
        let content_base64 = super::encode_content(content);
        let sha = revision_token(&content_base64);
        self.lock().files.insert(
            path.to_string(),
            StoredFile {
                content_base64,
                sha,
            },
        );
    }

    /// Decoded content of a file, if present.
    pub fn read(&self, path: &str) -> Option<Vec<u8>> {
        let inner = self.lock();
        let file = inner.files.get(path)?;
        decode_content(&file.content_base64).ok()
    }

    /// Check if a file exists.
    pub fn contains(&self, path: &str) -> bool {
        self.lock().files.contains_key(path)
    }

    /// Commits made through [`ContentStore::put_file`], oldest first.
    pub fn commits(&self) -> Vec<Commit> {
        self.lock().commits.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn revision_token(content_base64: &str) -> String {
    format!("{:x}", Md5::digest(content_base64.as_bytes()))
}

impl ContentStore for MemoryStore {
    async fn get_file(&self, path: &str) -> Result<StoredFile> {
        self.lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }

    async fn put_file(
        &self,
        path: &str,
        content_base64: &str,
        message: &str,
        sha: Option<&str>,
    ) -> Result<String> {
        let mut inner = self.lock();

        let current = inner.files.get(path).map(|f| f.sha.as_str());
        match (current, sha) {
            (Some(current), Some(given)) if current != given => {
                return Err(Error::Conflict(path.to_string()));
            }
            (Some(_), None) => return Err(Error::Conflict(path.to_string())),
            (None, Some(_)) => return Err(Error::NotFound(path.to_string())),
            _ => {}
        }

        let new_sha = revision_token(content_base64);
        inner.files.insert(
            path.to_string(),
            StoredFile {
                content_base64: content_base64.to_string(),
                sha: new_sha.clone(),
            },
        );
        inner.commits.push(Commit {
            path: path.to_string(),
            message: message.to_string(),
        });
        log::debug!("Stored {} ({})", path, message);

        Ok(new_sha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::encode_content;

    #[tokio::test]
    async fn test_create_then_read() {
        let store = MemoryStore::new();
        let sha = store
            .put_file("data/a.pdf", &encode_content(b"%PDF"), "upload: a.pdf", None)
            .await
            .unwrap();

        let file = store.get_file("data/a.pdf").await.unwrap();
        assert_eq!(file.sha, sha);
        assert_eq!(file.decode().unwrap(), b"%PDF");
        assert_eq!(store.commits()[0].message, "upload: a.pdf");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let store = MemoryStore::new();
        let err = store.get_file("data.json").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_replace_requires_current_sha() {
        let store = MemoryStore::with_empty_index();
        let original = store.get_file("data.json").await.unwrap();

        // Creating over an existing file
        let err = store
            .put_file("data.json", &encode_content(b"{}"), "index", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        let updated = store
            .put_file("data.json", &encode_content(b"{}"), "index", Some(&original.sha))
            .await
            .unwrap();
        assert_ne!(updated, original.sha);

        // The old token is stale now
        let err = store
            .put_file("data.json", &encode_content(b"[]"), "index", Some(&original.sha))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(store.read("data.json").unwrap(), b"{}");
    }

    #[tokio::test]
    async fn test_sha_for_missing_file() {
        let store = MemoryStore::new();
        let err = store
            .put_file("x", &encode_content(b"x"), "m", Some("abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(!store.contains("x"));
    }
}
