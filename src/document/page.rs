use serde::{Deserialize, Serialize};

use crate::types::identifiers::{DocumentId, PageId};

/// One page of a document. `number` defines read order within the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub document_id: DocumentId,
    pub number: u32,
    pub content: String,
}

impl Page {
    pub fn new(
        id: PageId,
        document_id: DocumentId,
        number: u32,
        content: impl Into<String>,
    ) -> Self {
        Page {
            id,
            document_id,
            number,
            content: content.into(),
        }
    }
}
