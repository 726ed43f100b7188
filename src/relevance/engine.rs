use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, instrument};

use super::ranking::{order_by_relevance, RankedDocument};
use super::tokenizer::{Tokenizer, UnicodeTokenizer};
use crate::corpus::Corpus;
use crate::document::Document;
use crate::types::identifiers::DocumentId;

/// Smoothed inverse document frequency: `ln((1 + n) / (1 + df)) + 1`.
///
/// Finite for every input, at least 1.0 whenever `df <= n`, and strictly
/// decreasing in `df`.
pub fn smoothed_idf(document_count: usize, document_frequency: usize) -> f64 {
    let df = document_frequency.min(document_count);
    ((1.0 + document_count as f64) / (1.0 + df as f64)).ln() + 1.0
}

/// Running bag-of-words statistics. Only ever touched under the engine lock.
#[derive(Debug, Default)]
struct CorpusStats {
    document_count: usize,
    document_frequency: HashMap<String, usize>,
    // Term sets of documents indexed by id, kept so they can be retired.
    keyed: HashMap<DocumentId, BTreeSet<String>>,
}

impl CorpusStats {
    fn add_terms(&mut self, terms: &BTreeSet<String>) {
        self.document_count += 1;
        for term in terms {
            *self.document_frequency.entry(term.clone()).or_insert(0) += 1;
        }
    }

    fn remove_terms(&mut self, terms: &BTreeSet<String>) {
        self.document_count = self.document_count.saturating_sub(1);
        for term in terms {
            if let Entry::Occupied(mut entry) = self.document_frequency.entry(term.clone()) {
                if *entry.get() <= 1 {
                    entry.remove();
                } else {
                    *entry.get_mut() -= 1;
                }
            }
        }
    }

    fn idf(&self, term: &str) -> Option<f64> {
        match self.document_frequency.get(term) {
            Some(&df) if df > 0 && self.document_count > 0 => {
                Some(smoothed_idf(self.document_count, df))
            }
            _ => None,
        }
    }

    // Terms are visited in sorted order so the float sum is reproducible.
    fn weigh(&self, counts: &BTreeMap<String, usize>) -> f64 {
        counts
            .iter()
            .filter_map(|(term, &tf)| self.idf(term).map(|idf| tf as f64 * idf))
            .sum()
    }
}

/// Incremental TF-IDF engine.
///
/// The engine is `Sync`: ingestion takes a write lock for the duration of
/// one count update, scoring takes a read lock, so a score always reflects
/// a whole number of ingested documents.
#[derive(Debug)]
pub struct RelevanceEngine<T = UnicodeTokenizer> {
    tokenizer: T,
    stats: RwLock<CorpusStats>,
}

impl RelevanceEngine<UnicodeTokenizer> {
    pub fn new() -> Self {
        Self::with_tokenizer(UnicodeTokenizer)
    }
}

impl Default for RelevanceEngine<UnicodeTokenizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tokenizer> RelevanceEngine<T> {
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self {
            tokenizer,
            stats: RwLock::new(CorpusStats::default()),
        }
    }

    /// Index every document of a corpus by id.
    pub fn from_corpus(corpus: &Corpus, tokenizer: T) -> Self {
        let engine = Self::with_tokenizer(tokenizer);
        for doc in corpus.iter() {
            engine.index_document(doc);
        }
        engine
    }

    /// Add an anonymous document. It counts toward every statistic but
    /// cannot be removed again.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub fn add_document_to_corpus(&self, text: &str) {
        let terms = self.distinct_terms([text]);
        let mut stats = self.write();
        stats.add_terms(&terms);
        debug!(terms = terms.len(), documents = stats.document_count, "document added");
    }

    /// Index a document under its id, replacing any earlier version.
    #[instrument(skip_all, fields(document = %document.id()))]
    pub fn index_document(&self, document: &Document) {
        let terms = self.distinct_terms(document.pages().iter().map(|p| p.content.as_str()));

        let mut stats = self.write();
        if let Some(previous) = stats.keyed.remove(&document.id()) {
            stats.remove_terms(&previous);
        }
        stats.add_terms(&terms);
        stats.keyed.insert(document.id(), terms);
    }

    /// Retire a document indexed with [`RelevanceEngine::index_document`].
    pub fn remove_document(&self, id: DocumentId) -> bool {
        let mut stats = self.write();
        match stats.keyed.remove(&id) {
            Some(terms) => {
                stats.remove_terms(&terms);
                true
            }
            None => false,
        }
    }

    /// Σ TF × IDF over the query terms known to the corpus.
    ///
    /// Returns 0.0 for an empty query, a query without terms, or an empty
    /// corpus. Never NaN, never negative.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub fn calculate_document_tf_idf(&self, text: &str) -> f64 {
        let counts = self.term_counts(text);
        if counts.is_empty() {
            return 0.0;
        }

        let stats = self.read();
        if stats.document_count == 0 {
            return 0.0;
        }
        stats.weigh(&counts)
    }

    /// Scoring entry point for a query that may be absent. Absent scores 0.0.
    pub fn score_optional(&self, text: Option<&str>) -> f64 {
        text.map_or(0.0, |t| self.calculate_document_tf_idf(t))
    }

    /// Score every document of `corpus` against `query`, best first.
    /// Documents sharing no term with the query are left out.
    #[instrument(skip_all, fields(query_len = query.len(), documents = corpus.len()))]
    pub fn rank(&self, query: &str, corpus: &Corpus) -> Vec<RankedDocument> {
        let query_terms: BTreeSet<String> = self.term_counts(query).into_keys().collect();
        if query_terms.is_empty() {
            return Vec::new();
        }

        let stats = self.read();
        if stats.document_count == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<RankedDocument> = corpus
            .iter()
            .filter_map(|doc| {
                let mut counts: BTreeMap<String, usize> = BTreeMap::new();
                for page in doc.pages() {
                    for term in self.tokenizer.tokenize(&page.content) {
                        if query_terms.contains(&term) {
                            *counts.entry(term).or_insert(0) += 1;
                        }
                    }
                }
                let score = stats.weigh(&counts);
                (score > 0.0).then(|| RankedDocument {
                    id: doc.id(),
                    name: doc.name().to_string(),
                    score,
                    matched_terms: counts.len(),
                })
            })
            .collect();
        drop(stats);

        order_by_relevance(&mut ranked);
        debug!(matches = ranked.len(), "ranking complete");
        ranked
    }

    /// IDF of an already tokenized term, `None` when no document holds it.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.read().idf(term)
    }

    pub fn document_count(&self) -> usize {
        self.read().document_count
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.read().document_frequency.get(term).copied().unwrap_or(0)
    }

    fn term_counts(&self, text: &str) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for term in self.tokenizer.tokenize(text) {
            *counts.entry(term).or_insert(0) += 1;
        }
        counts
    }

    fn distinct_terms<'a, I>(&self, texts: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        texts
            .into_iter()
            .flat_map(|text| self.tokenizer.tokenize(text))
            .collect()
    }

    // Poison is ignored: term sets are built before a write guard is taken.
    fn read(&self) -> RwLockReadGuard<'_, CorpusStats> {
        self.stats.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CorpusStats> {
        self.stats.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idf_is_smoothed_and_decreasing() {
        assert!((smoothed_idf(3, 3) - 1.0).abs() < 1e-12);
        assert!(smoothed_idf(3, 1) > smoothed_idf(3, 2));
        assert!(smoothed_idf(0, 0).is_finite());
    }

    #[test]
    fn removing_last_holder_drops_the_term() {
        let mut stats = CorpusStats::default();
        let terms: BTreeSet<String> = ["cat".to_string()].into_iter().collect();
        stats.add_terms(&terms);
        stats.remove_terms(&terms);
        assert_eq!(stats.document_count, 0);
        assert!(stats.document_frequency.is_empty());
        assert_eq!(stats.idf("cat"), None);
    }
}
