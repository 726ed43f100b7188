pub mod document;
pub mod page;

pub use crate::types::identifiers::{DocumentId, PageId};
pub use document::{Document, DocumentError};
pub use page::Page;
