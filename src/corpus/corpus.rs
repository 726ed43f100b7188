use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::manifest::FingerprintManifest;
use super::source::DocumentSource;
use crate::document::{Document, DocumentError};
use crate::types::identifiers::DocumentId;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Duplicate document ID: {0}")]
    DuplicateDocument(DocumentId),
    #[error("Unknown document ID: {0}")]
    UnknownDocument(DocumentId),
    #[error("Content hash is stale for documents: {0:?}")]
    StaleHashes(Vec<DocumentId>),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("Document source failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Documents keyed by id. Iteration is in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: BTreeMap<DocumentId, Document>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from the persistence layer's current collection.
    ///
    /// Documents are taken as stored, stale hashes included; call
    /// [`Corpus::verify`] or [`Corpus::refresh_hashes`] before relying on
    /// change detection.
    #[instrument(skip_all)]
    pub fn load_from<S: DocumentSource>(source: &S) -> Result<Self, CorpusError> {
        let documents = source
            .load_documents()
            .map_err(|e| CorpusError::Source(Box::new(e)))?;

        let mut corpus = Corpus::new();
        for doc in documents {
            corpus.insert(doc)?;
        }
        debug!(documents = corpus.len(), "corpus loaded");
        Ok(corpus)
    }

    pub fn insert(&mut self, document: Document) -> Result<(), CorpusError> {
        let id = document.id();
        if self.documents.contains_key(&id) {
            return Err(CorpusError::DuplicateDocument(id));
        }
        self.documents.insert(id, document);
        Ok(())
    }

    /// Insert or overwrite, returning the previous version.
    pub fn replace(&mut self, document: Document) -> Option<Document> {
        self.documents.insert(document.id(), document)
    }

    pub fn remove(&mut self, id: DocumentId) -> Option<Document> {
        self.documents.remove(&id)
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn get_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.get_mut(&id)
    }

    pub fn update_page(
        &mut self,
        id: DocumentId,
        page_number: u32,
        content: impl Into<String>,
    ) -> Result<&Document, CorpusError> {
        let doc = self
            .documents
            .get_mut(&id)
            .ok_or(CorpusError::UnknownDocument(id))?;
        doc.set_page_content(page_number, content)?;
        Ok(doc)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Ids of documents whose stored hash no longer matches their pages.
    pub fn verify(&self) -> Vec<DocumentId> {
        let stale: Vec<DocumentId> = self
            .documents
            .values()
            .filter(|doc| !doc.verify_hash())
            .map(|doc| doc.id())
            .collect();
        if !stale.is_empty() {
            warn!(stale = ?stale, "content hash drift detected");
        }
        stale
    }

    /// Re-derive every stale hash. Returns the ids that were fixed.
    pub fn refresh_hashes(&mut self) -> Vec<DocumentId> {
        self.documents
            .values_mut()
            .filter_map(|doc| doc.refresh_hash().then_some(doc.id()))
            .collect()
    }

    /// Fingerprint snapshot for change detection. Fails while any document
    /// carries a stale hash.
    pub fn manifest(&self) -> Result<FingerprintManifest, CorpusError> {
        let stale = self.verify();
        if !stale.is_empty() {
            return Err(CorpusError::StaleHashes(stale));
        }
        Ok(FingerprintManifest::from_documents(self.documents.values()))
    }
}

impl FromIterator<Document> for Corpus {
    /// Later documents with a repeated id overwrite earlier ones.
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for doc in iter {
            corpus.replace(doc);
        }
        corpus
    }
}
