use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::identifiers::DocumentId;

/// One document's TF-IDF score against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDocument {
    pub id: DocumentId,
    pub name: String,
    pub score: f64,
    /// Distinct query terms found in the document.
    pub matched_terms: usize,
}

/// Sort by (score desc, id asc).
pub(crate) fn order_by_relevance(ranked: &mut [RankedDocument]) {
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    debug_assert!(ranked.windows(2).all(|w| {
        let (a, b) = (&w[0], &w[1]);
        a.score > b.score || (a.score == b.score && a.id <= b.id)
    }));
}
