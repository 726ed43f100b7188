pub mod engine;
pub mod ranking;
pub mod tokenizer;

pub use engine::{smoothed_idf, RelevanceEngine};
pub use ranking::RankedDocument;
pub use tokenizer::{Tokenizer, UnicodeTokenizer};
