pub mod corpus;
pub mod manifest;
pub mod source;

pub use corpus::{Corpus, CorpusError};
pub use manifest::{ChangeSet, FingerprintManifest, ManifestEntry};
pub use source::DocumentSource;
