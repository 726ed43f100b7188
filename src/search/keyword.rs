use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::document::Document;

// Key point:
// Serializable
// Fixed per searcher, never per call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Keywords with fewer characters (not bytes) match nothing.
    pub min_keyword_chars: usize,
    pub case_sensitive: bool,
}

impl SearchConfig {
    pub fn v0() -> Self {
        Self {
            min_keyword_chars: 3,
            case_sensitive: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::v0()
    }
}

/// Substring keyword search over document pages.
///
/// Stateless apart from its config: any number of searches may run in
/// parallel over the same documents.
#[derive(Debug, Clone, Default)]
pub struct KeywordSearcher {
    config: SearchConfig,
}

impl KeywordSearcher {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Names of the documents with at least one page containing `keyword`,
    /// in input order, each document at most once.
    ///
    /// A missing, empty or too-short keyword, and a missing or empty
    /// document collection, all yield an empty result.
    pub fn search<'a, I>(&self, keyword: Option<&str>, documents: Option<I>) -> Vec<String>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        self.matching_documents(keyword, documents)
            .into_iter()
            .map(|doc| doc.name().to_string())
            .collect()
    }

    #[instrument(skip_all, fields(keyword_chars = keyword.map(|k| k.chars().count())))]
    pub fn matching_documents<'a, I>(
        &self,
        keyword: Option<&str>,
        documents: Option<I>,
    ) -> Vec<&'a Document>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let (Some(needle), Some(documents)) = (self.prepare(keyword), documents) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let matches: Vec<&Document> = documents
            .into_iter()
            .filter(|doc| {
                doc.pages()
                    .iter()
                    .any(|page| self.page_contains(&page.content, &needle))
            })
            .filter(|doc| seen.insert(doc.id()))
            .collect();

        debug!(matches = matches.len(), "keyword search complete");
        matches
    }

    fn prepare(&self, keyword: Option<&str>) -> Option<String> {
        let keyword = keyword?;
        if keyword.chars().count() < self.config.min_keyword_chars.max(1) {
            return None;
        }
        Some(self.fold(keyword))
    }

    fn page_contains(&self, content: &str, needle: &str) -> bool {
        if self.config.case_sensitive {
            content.contains(needle)
        } else {
            fold_case(content).contains(needle)
        }
    }

    fn fold(&self, text: &str) -> String {
        if self.config.case_sensitive {
            text.to_string()
        } else {
            fold_case(text)
        }
    }
}

// Char by char, so folding never depends on the surrounding word.
// `str::to_lowercase` maps a final capital sigma to `ς` but an inner one to `σ`.
fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Search with the default config: case-insensitive, three-character minimum.
pub fn search_keyword(keyword: Option<&str>, documents: Option<&[Document]>) -> Vec<String> {
    KeywordSearcher::default().search(keyword, documents)
}
