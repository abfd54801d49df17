//! Upload intake: file name and tag normalization, limits, identifiers,
//! and the client-side upload workflow.

mod backend;
mod workflow;

#[cfg(feature = "http")]
pub use backend::HttpBackend;
pub use backend::{GalleryBackend, ProxyBackend};
pub use workflow::{
    AbandonHandle, UploadOutcome, UploadProgress, UploadRequest, UploadSource, UploadState,
    UploadWorkflow,
};

use rand::Rng;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// Largest accepted document: 2 MiB.
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Characters removed from file names.
const FORBIDDEN_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Make a file name safe for URLs and repository paths.
///
/// The name is NFC-normalized and lowercased, whitespace runs become a
/// single `_`, and reserved and control characters are removed. Letters
/// outside ASCII are kept.
///
/// # Example
///
/// ```
/// assert_eq!(arxiu::upload::sanitize_filename("Résumé Final.pdf"), "résumé_final.pdf");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let lowered = name.nfc().collect::<String>().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_space = false;

    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_control() || FORBIDDEN_FILENAME_CHARS.contains(&c) {
            continue;
        }
        out.push(c);
    }

    out
}

/// Parse a comma-separated hashtag field.
///
/// Tags are trimmed, lose one leading `#`, and are lowercased; empty and
/// repeated tags are dropped, keeping first-seen order.
pub fn parse_hashtags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        let tag = part.strip_prefix('#').unwrap_or(part).trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Check that a file name carries a `.pdf` extension (any case).
pub fn validate_pdf_name(name: &str) -> Result<()> {
    let lowered = name.trim().to_lowercase();
    match lowered.strip_suffix(".pdf") {
        Some(stem) if !stem.is_empty() => Ok(()),
        _ => Err(Error::NotPdf(name.to_string())),
    }
}

/// Check a document size against the upload limit.
pub fn check_size(size: usize) -> Result<()> {
    if size > MAX_UPLOAD_BYTES {
        return Err(Error::FileTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Decoded size of a base64 payload, computed from its length.
///
/// Embedded line breaks are ignored and trailing `=` padding is
/// subtracted, so a well-formed payload yields its exact decoded size.
pub fn estimated_decoded_len(content_base64: &str) -> usize {
    let significant = content_base64
        .bytes()
        .filter(|b| !matches!(b, b'\n' | b'\r'))
        .count();
    let padding = content_base64
        .trim_end_matches(['\n', '\r'])
        .bytes()
        .rev()
        .take_while(|&b| b == b'=')
        .take(2)
        .count();
    (significant * 3 / 4).saturating_sub(padding)
}

/// Lowercase base-36 representation of a number.
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/// Build an entry id from a millisecond timestamp and a random source.
pub fn generate_id_with<R: Rng + ?Sized>(timestamp_millis: u64, rng: &mut R) -> String {
    let mut id = to_base36(timestamp_millis);
    for _ in 0..4 {
        id.push(char::from(BASE36_DIGITS[rng.gen_range(0..36)]));
    }
    id
}

/// New entry id: base-36 current time in milliseconds plus four random
/// base-36 characters.
pub fn generate_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    generate_id_with(millis, &mut rand::thread_rng())
}
