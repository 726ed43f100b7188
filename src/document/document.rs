use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::page::Page;
use crate::hashing::ContentHash;
use crate::types::identifiers::DocumentId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Page number {number} appears more than once in document {document}")]
    DuplicatePageNumber { document: DocumentId, number: u32 },
    #[error("Page {number} belongs to document {found}, not {expected}")]
    ForeignPage {
        expected: DocumentId,
        found: DocumentId,
        number: u32,
    },
    #[error("Document {document} has no page {number}")]
    UnknownPage { document: DocumentId, number: u32 },
}

/// A paginated document.
///
/// `content_hash` always covers the page contents concatenated in page
/// order. Every mutation goes through a method that re-derives it. A
/// document read back from storage may carry a stale hash; use
/// [`Document::verify_hash`] to detect that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredDocument")]
pub struct Document {
    id: DocumentId,
    name: String,
    content_hash: ContentHash,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    pages: Vec<Page>,
}

impl Document {
    pub fn new(
        id: DocumentId,
        name: impl Into<String>,
        pages: Vec<Page>,
    ) -> Result<Self, DocumentError> {
        Document::new_at(id, name, pages, Utc::now())
    }

    /// Build a document with an explicit creation instant.
    pub fn new_at(
        id: DocumentId,
        name: impl Into<String>,
        mut pages: Vec<Page>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DocumentError> {
        for page in &pages {
            check_owner(id, page)?;
        }

        pages.sort_by_key(|p| p.number);
        for pair in pages.windows(2) {
            if pair[0].number == pair[1].number {
                return Err(DocumentError::DuplicatePageNumber {
                    document: id,
                    number: pair[0].number,
                });
            }
        }

        let content_hash = hash_pages(&pages);

        Ok(Document {
            id,
            name: name.into(),
            content_hash,
            created_at,
            modified_at: created_at,
            pages,
        })
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_hash(&self) -> &ContentHash {
        &self.content_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Pages in ascending page-number order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, number: u32) -> Option<&Page> {
        self.position(number).ok().map(|i| &self.pages[i])
    }

    /// All page contents concatenated in page order, the text the hash covers.
    pub fn text(&self) -> String {
        self.pages.iter().map(|p| p.content.as_str()).collect()
    }

    /// Replace the content of one page. Writing identical content is a no-op.
    pub fn set_page_content(
        &mut self,
        number: u32,
        content: impl Into<String>,
    ) -> Result<(), DocumentError> {
        let index = self.position(number).map_err(|_| DocumentError::UnknownPage {
            document: self.id,
            number,
        })?;

        let content = content.into();
        if self.pages[index].content == content {
            return Ok(());
        }

        self.pages[index].content = content;
        self.touch();
        Ok(())
    }

    pub fn insert_page(&mut self, page: Page) -> Result<(), DocumentError> {
        check_owner(self.id, &page)?;

        match self.position(page.number) {
            Ok(_) => Err(DocumentError::DuplicatePageNumber {
                document: self.id,
                number: page.number,
            }),
            Err(index) => {
                self.pages.insert(index, page);
                self.touch();
                Ok(())
            }
        }
    }

    pub fn remove_page(&mut self, number: u32) -> Result<Page, DocumentError> {
        let index = self.position(number).map_err(|_| DocumentError::UnknownPage {
            document: self.id,
            number,
        })?;

        let page = self.pages.remove(index);
        self.touch();
        Ok(page)
    }

    /// True when the stored hash matches the current page contents.
    pub fn verify_hash(&self) -> bool {
        hash_pages(&self.pages) == self.content_hash
    }

    /// Re-derive the hash from the pages. Returns true if it changed.
    pub fn refresh_hash(&mut self) -> bool {
        if self.verify_hash() {
            return false;
        }
        self.touch();
        true
    }

    fn touch(&mut self) {
        self.content_hash = hash_pages(&self.pages);
        self.modified_at = Utc::now().max(self.created_at);
    }

    fn position(&self, number: u32) -> Result<usize, usize> {
        self.pages.binary_search_by_key(&number, |p| p.number)
    }
}

/// Wire shape of a document. Page ordering and ownership are re-checked on
/// the way in; the stored hash is kept as-is so drift stays detectable.
#[derive(Deserialize)]
struct StoredDocument {
    id: DocumentId,
    name: String,
    content_hash: ContentHash,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    pages: Vec<Page>,
}

impl TryFrom<StoredDocument> for Document {
    type Error = DocumentError;

    fn try_from(stored: StoredDocument) -> Result<Self, Self::Error> {
        let mut document =
            Document::new_at(stored.id, stored.name, stored.pages, stored.created_at)?;
        document.content_hash = stored.content_hash;
        document.modified_at = stored.modified_at;
        Ok(document)
    }
}

fn check_owner(id: DocumentId, page: &Page) -> Result<(), DocumentError> {
    if page.document_id != id {
        return Err(DocumentError::ForeignPage {
            expected: id,
            found: page.document_id,
            number: page.number,
        });
    }
    Ok(())
}

fn hash_pages(pages: &[Page]) -> ContentHash {
    ContentHash::from_segments(pages.iter().map(|p| p.content.as_str()))
}
