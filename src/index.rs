use tracing::{info, instrument};

use crate::corpus::{ChangeSet, Corpus, CorpusError, FingerprintManifest};
use crate::document::Document;
use crate::hashing::ContentHash;
use crate::relevance::{RankedDocument, RelevanceEngine, Tokenizer, UnicodeTokenizer};
use crate::search::{KeywordSearcher, SearchConfig};
use crate::types::identifiers::DocumentId;

/// A corpus with its relevance statistics kept in step.
///
/// Every membership or content change goes through this type, so the TF-IDF
/// document frequencies always describe exactly the documents held.
#[derive(Debug)]
pub struct CorpusIndex<T = UnicodeTokenizer> {
    corpus: Corpus,
    relevance: RelevanceEngine<T>,
    searcher: KeywordSearcher,
}

impl CorpusIndex<UnicodeTokenizer> {
    pub fn new() -> Self {
        Self::with_parts(UnicodeTokenizer, SearchConfig::v0())
    }
}

impl Default for CorpusIndex<UnicodeTokenizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tokenizer> CorpusIndex<T> {
    pub fn with_parts(tokenizer: T, search: SearchConfig) -> Self {
        Self {
            corpus: Corpus::new(),
            relevance: RelevanceEngine::with_tokenizer(tokenizer),
            searcher: KeywordSearcher::new(search),
        }
    }

    pub fn from_corpus(corpus: Corpus, tokenizer: T, search: SearchConfig) -> Self {
        let relevance = RelevanceEngine::from_corpus(&corpus, tokenizer);
        Self {
            corpus,
            relevance,
            searcher: KeywordSearcher::new(search),
        }
    }

    /// Add a new document and return its fingerprint.
    #[instrument(skip_all, fields(document = %document.id()))]
    pub fn add_document(&mut self, document: Document) -> Result<ContentHash, CorpusError> {
        let id = document.id();
        if self.corpus.get(id).is_some() {
            return Err(CorpusError::DuplicateDocument(id));
        }
        let hash = document.content_hash().clone();
        self.relevance.index_document(&document);
        self.corpus.insert(document)?;
        info!(hash = %hash, "document added");
        Ok(hash)
    }

    /// Rewrite one page, re-deriving the fingerprint and the term statistics.
    pub fn update_page(
        &mut self,
        id: DocumentId,
        page_number: u32,
        content: impl Into<String>,
    ) -> Result<ContentHash, CorpusError> {
        let document = self.corpus.update_page(id, page_number, content)?;
        self.relevance.index_document(document);
        Ok(document.content_hash().clone())
    }

    pub fn remove_document(&mut self, id: DocumentId) -> Option<Document> {
        let removed = self.corpus.remove(id)?;
        self.relevance.remove_document(id);
        info!(document = %id, "document removed");
        Some(removed)
    }

    pub fn search_keyword(&self, keyword: Option<&str>) -> Vec<String> {
        self.searcher.search(keyword, Some(self.corpus.iter()))
    }

    pub fn score(&self, query: Option<&str>) -> f64 {
        self.relevance.score_optional(query)
    }

    pub fn rank(&self, query: &str) -> Vec<RankedDocument> {
        self.relevance.rank(query, &self.corpus)
    }

    pub fn manifest(&self) -> Result<FingerprintManifest, CorpusError> {
        self.corpus.manifest()
    }

    pub fn changes_since(&self, baseline: &FingerprintManifest) -> Result<ChangeSet, CorpusError> {
        Ok(baseline.diff(&self.manifest()?))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Documents counted by the relevance statistics; always `corpus().len()`.
    pub fn document_count(&self) -> usize {
        self.relevance.document_count()
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.relevance.document_frequency(term)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.relevance.idf(term)
    }
}
