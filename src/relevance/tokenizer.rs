use unicode_segmentation::UnicodeSegmentation;

/// Splits text into index terms.
///
/// Ingestion and scoring must use the same tokenizer. A stemming or
/// lemmatizing pipeline plugs in here; the engine itself never looks past
/// the returned terms.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, text: &str) -> Vec<String> {
        (**self).tokenize(text)
    }
}

/// Script-aware raw tokenizer.
///
/// Terms are the Unicode words of the text (UAX #29 boundaries), lower-cased
/// one character at a time. Combining marks such as Arabic harakat or a
/// decomposed acute accent stay inside their word; punctuation and symbols
/// never form a term.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeTokenizer;

impl Tokenizer for UnicodeTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|word| word.chars().flat_map(char::to_lowercase).collect())
            .collect()
    }
}
