//! Change detection, relevance ranking and keyword search over a corpus of
//! paginated documents in Latin and Arabic script.
//!
//! `paged-corpus` provides SHA-256 content fingerprints and corpus
//! manifests for drift detection, an incremental TF-IDF engine, and
//! deduplicating substring keyword search. Everything is in-memory and
//! deterministic: identical inputs produce identical fingerprints, scores
//! and result orderings.

pub mod corpus;
pub mod document;
pub mod hashing;
pub mod index;
pub mod ingest;
pub mod relevance;
pub mod search;
pub mod types;

pub use corpus::{ChangeSet, Corpus, CorpusError, DocumentSource, FingerprintManifest};
pub use document::{Document, DocumentError, Page};
pub use hashing::{compute_hash, compute_hash_checked, ContentHash, HashError};
pub use index::CorpusIndex;
pub use relevance::{RankedDocument, RelevanceEngine, Tokenizer, UnicodeTokenizer};
pub use search::{search_keyword, KeywordSearcher, SearchConfig};
pub use types::{DocumentId, PageId};
