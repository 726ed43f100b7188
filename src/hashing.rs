//! Content fingerprints for change detection.
//!
//! A [`ContentHash`] is the SHA-256 digest of the exact UTF-8 bytes of a
//! text, rendered as `sha256:<hex>`. No normalization is applied: a
//! trailing period or a `\r\n` line ending yields a different fingerprint.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

const PREFIX: &str = "sha256:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashError {
    #[error("No text was supplied to hash")]
    MissingInput,
}

/// Opaque fingerprint of a text. Compare for equality only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        ContentHash::from_hasher(hasher)
    }

    /// Fingerprint of several segments hashed as one concatenated text.
    pub fn from_segments<'a, I>(segments: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut hasher = Sha256::new();
        for segment in segments {
            hasher.update(segment.as_bytes());
        }
        ContentHash::from_hasher(hasher)
    }

    pub(crate) fn from_hasher(hasher: Sha256) -> Self {
        let hex = hex::encode(hasher.finalize());
        ContentHash(format!("{PREFIX}{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digest without the algorithm prefix.
    pub fn digest(&self) -> &str {
        self.0.strip_prefix(PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint a text. Total over every `&str`, including the empty string.
pub fn compute_hash(text: &str) -> ContentHash {
    ContentHash::from_content(text.as_bytes())
}

/// Fingerprint a text that may be absent.
///
/// Absent input is a caller error and is reported as
/// [`HashError::MissingInput`]; it is never hashed as if it were empty.
pub fn compute_hash_checked(text: Option<&str>) -> Result<ContentHash, HashError> {
    text.map(compute_hash).ok_or(HashError::MissingInput)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_hash_like_their_concatenation() {
        let joined = compute_hash("first pagesecond page");
        let split = ContentHash::from_segments(["first page", "second page"]);
        assert_eq!(joined, split);
    }

    #[test]
    fn digest_strips_prefix() {
        let hash = compute_hash("");
        assert_eq!(hash.digest().len(), 64);
        assert!(hash.as_str().starts_with("sha256:"));
    }

    #[test]
    fn missing_input_is_typed_error() {
        assert_eq!(compute_hash_checked(None), Err(HashError::MissingInput));
        assert_eq!(compute_hash_checked(Some("")), Ok(compute_hash("")));
    }
}
