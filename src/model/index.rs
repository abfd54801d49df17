//! Gallery index types (`data.json`).

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The gallery index stored next to the documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryIndex {
    /// Every indexed document, in upload order
    #[serde(default)]
    pub files: Vec<IndexEntry>,

    /// Sorted, de-duplicated hashtags used by any entry
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl GalleryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an index from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize as pretty-printed JSON (two-space indent).
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append an entry and merge its hashtags into the tag list.
    pub fn add_entry(&mut self, entry: IndexEntry) {
        self.merge_hashtags(&entry.hashtags);
        self.files.push(entry);
    }

    /// Merge tags into the hashtag list, keeping it sorted and unique.
    pub fn merge_hashtags(&mut self, tags: &[String]) {
        for tag in tags {
            if !self.hashtags.contains(tag) {
                self.hashtags.push(tag.clone());
            }
        }
        self.hashtags.sort();
    }

    /// Mark the entry with the given id as published.
    ///
    /// Returns `false` when no entry has that id.
    pub fn confirm(&mut self, id: &str) -> bool {
        match self.files.iter_mut().find(|f| f.id == id) {
            Some(entry) => {
                entry.is_published = true;
                true
            }
            None => false,
        }
    }

    /// Find an entry by id.
    pub fn get(&self, id: &str) -> Option<&IndexEntry> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Get the number of indexed files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Check if the index has no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// One document in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Unique identifier
    pub id: String,

    /// Sanitized file name under `data/`
    pub filename: String,

    /// Author, if one was given
    #[serde(default)]
    pub author: Option<String>,

    /// Lowercase hashtags without `#`
    #[serde(default)]
    pub hashtags: Vec<String>,

    /// Adult content, hidden unless adult mode is on
    #[serde(default)]
    pub is_18_plus: bool,

    /// Upload timestamp (ISO-8601)
    pub upload_date: DateTime<Utc>,

    /// Set by the confirmation action
    #[serde(default)]
    pub is_published: bool,
}

impl IndexEntry {
    /// Create an unpublished entry.
    pub fn new(
        id: impl Into<String>,
        filename: impl Into<String>,
        upload_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            author: None,
            hashtags: Vec::new(),
            is_18_plus: false,
            upload_date,
            is_published: false,
        }
    }

    /// Set the author. Blank names are stored as `None`.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        let author = author.into();
        let trimmed = author.trim();
        self.author = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Set the hashtags.
    pub fn with_hashtags(mut self, hashtags: Vec<String>) -> Self {
        self.hashtags = hashtags;
        self
    }

    /// Flag the entry as adult content.
    pub fn adult(mut self, is_18_plus: bool) -> Self {
        self.is_18_plus = is_18_plus;
        self
    }

    /// Check whether the entry carries a hashtag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.hashtags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_add_entry_merges_sorted_tags() {
        let mut index = GalleryIndex::new();
        index.hashtags = vec!["poetry".into()];

        index.add_entry(
            IndexEntry::new("a1", "one.pdf", date())
                .with_hashtags(vec!["zines".into(), "art".into(), "poetry".into()]),
        );

        assert_eq!(index.hashtags, vec!["art", "poetry", "zines"]);
        assert_eq!(index.file_count(), 1);
    }

    #[test]
    fn test_missing_keys_default() {
        let index = GalleryIndex::from_json("{}").unwrap();
        assert!(index.is_empty());
        assert!(index.hashtags.is_empty());

        let json = r#"{"files":[{"id":"x","filename":"x.pdf","author":null,
            "hashtags":["a"],"is_18_plus":true,"upload_date":"2024-03-01T12:00:00.000Z"}]}"#;
        let index = GalleryIndex::from_json(json).unwrap();
        let entry = &index.files[0];
        assert!(entry.is_18_plus);
        assert!(!entry.is_published);
        assert_eq!(entry.upload_date, date());
    }

    #[test]
    fn test_confirm() {
        let mut index = GalleryIndex::new();
        index.add_entry(IndexEntry::new("a1", "one.pdf", date()));
        assert!(index.confirm("a1"));
        assert!(index.get("a1").unwrap().is_published);
        assert!(!index.confirm("missing"));
    }

    #[test]
    fn test_blank_author_is_none() {
        let entry = IndexEntry::new("a", "a.pdf", date()).with_author("   ");
        assert_eq!(entry.author, None);
        let entry = IndexEntry::new("a", "a.pdf", date()).with_author(" Ana ");
        assert_eq!(entry.author.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_pretty_json_round_trip() {
        let mut index = GalleryIndex::new();
        index.add_entry(IndexEntry::new("a1", "one.pdf", date()).with_hashtags(vec!["x".into()]));
        let json = index.to_pretty_json().unwrap();
        assert!(json.contains("\n  \"files\": ["));
        assert_eq!(GalleryIndex::from_json(&json).unwrap(), index);
    }
}
