use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::document::Document;
use crate::hashing::ContentHash;
use crate::types::identifiers::DocumentId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: DocumentId,
    pub name: String,
    pub content_hash: ContentHash,
}

/// Snapshot of every document fingerprint in a corpus, sorted by id.
///
/// `corpus_hash` is the SHA-256 over the sorted `id:content_hash` lines, so
/// two manifests with equal `corpus_hash` describe identical content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintManifest {
    pub corpus_hash: ContentHash,
    pub document_count: usize,
    pub documents: Vec<ManifestEntry>,
}

/// Documents that differ between two manifests, each list sorted by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub added: Vec<DocumentId>,
    pub removed: Vec<DocumentId>,
    pub modified: Vec<DocumentId>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

impl FingerprintManifest {
    /// Ids must be unique; the corpus guarantees this.
    pub(crate) fn from_documents<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut entries: Vec<ManifestEntry> = documents
            .into_iter()
            .map(|doc| ManifestEntry {
                id: doc.id(),
                name: doc.name().to_string(),
                content_hash: doc.content_hash().clone(),
            })
            .collect();
        entries.sort_by_key(|e| e.id);

        let mut hasher = Sha256::new();
        for entry in &entries {
            let line = format!("{}:{}\n", entry.id, entry.content_hash.as_str());
            hasher.update(line.as_bytes());
        }

        FingerprintManifest {
            corpus_hash: ContentHash::from_hasher(hasher),
            document_count: entries.len(),
            documents: entries,
        }
    }

    pub fn get(&self, id: DocumentId) -> Option<&ContentHash> {
        self.documents
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.documents[i].content_hash)
    }

    /// What changed going from `self` (the baseline) to `newer`.
    pub fn diff(&self, newer: &FingerprintManifest) -> ChangeSet {
        let mut changes = ChangeSet::default();
        if self.corpus_hash == newer.corpus_hash {
            return changes;
        }

        let mut old = self.documents.iter().peekable();
        let mut new = newer.documents.iter().peekable();

        loop {
            match (old.peek(), new.peek()) {
                (Some(a), Some(b)) => match a.id.cmp(&b.id) {
                    Ordering::Less => {
                        changes.removed.push(a.id);
                        old.next();
                    }
                    Ordering::Greater => {
                        changes.added.push(b.id);
                        new.next();
                    }
                    Ordering::Equal => {
                        if a.content_hash != b.content_hash {
                            changes.modified.push(a.id);
                        }
                        old.next();
                        new.next();
                    }
                },
                (Some(a), None) => {
                    changes.removed.push(a.id);
                    old.next();
                }
                (None, Some(b)) => {
                    changes.added.push(b.id);
                    new.next();
                }
                (None, None) => break,
            }
        }

        changes
    }
}
