use crate::document::Document;

/// Read side of the persistence layer: the current document collection.
///
/// The corpus only ever loads through this trait. Creating, updating and
/// deleting records stays with the owning layer.
pub trait DocumentSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn load_documents(&self) -> Result<Vec<Document>, Self::Error>;
}
