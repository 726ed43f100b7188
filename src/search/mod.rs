pub mod keyword;

pub use keyword::{search_keyword, KeywordSearcher, SearchConfig};
