//! Turning raw file bytes into single-page documents.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::document::{Document, DocumentError, Page};
use crate::types::identifiers::{DocumentId, PageId};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unsupported file extension {extension:?} for {name}")]
    UnsupportedExtension { name: String, extension: String },
    #[error("Content must be valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Lower-case extensions without the dot.
    pub allowed_extensions: Vec<String>,
}

impl ImportConfig {
    pub fn v0() -> Self {
        Self {
            allowed_extensions: vec!["txt".into()],
        }
    }

    pub fn allows(&self, name: &str) -> bool {
        let extension = file_extension(name).to_lowercase();
        self.allowed_extensions.iter().any(|e| *e == extension)
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::v0()
    }
}

/// Text after the last `.`, or the empty string when there is none.
pub fn file_extension(name: &str) -> &str {
    name.rsplit_once('.').map_or("", |(_, ext)| ext)
}

/// Build a one-page document from raw bytes.
///
/// The name must carry an allowed extension and the bytes must be UTF-8.
/// The page id is taken equal to the document id.
pub fn import_text(
    config: &ImportConfig,
    id: DocumentId,
    name: &str,
    raw_content: Vec<u8>,
) -> Result<Document, ImportError> {
    if !config.allows(name) {
        return Err(ImportError::UnsupportedExtension {
            name: name.to_string(),
            extension: file_extension(name).to_string(),
        });
    }

    let content = String::from_utf8(raw_content)?;
    let page = Page::new(PageId::new(id.get()), id, 1, content);
    Ok(Document::new(id, name, vec![page])?)
}

/// Read a file from disk and import it under its file name.
#[instrument(skip(config))]
pub fn import_text_file(
    config: &ImportConfig,
    id: DocumentId,
    path: &Path,
) -> Result<Document, ImportError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Check before reading so unsupported files are never opened.
    if !config.allows(&name) {
        return Err(ImportError::UnsupportedExtension {
            extension: file_extension(&name).to_string(),
            name,
        });
    }

    let bytes = fs::read(path)?;
    let document = import_text(config, id, &name, bytes)?;
    info!(document = %id, hash = %document.content_hash(), "imported text file");
    Ok(document)
}
