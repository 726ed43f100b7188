use std::fmt;

use serde::{Deserialize, Serialize};

/// Document identifier assigned by the owning layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(i64);

impl DocumentId {
    pub fn new(raw: i64) -> Self {
        DocumentId(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for DocumentId {
    fn from(raw: i64) -> Self {
        DocumentId(raw)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(i64);

impl PageId {
    pub fn new(raw: i64) -> Self {
        PageId(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for PageId {
    fn from(raw: i64) -> Self {
        PageId(raw)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
