/// Turns document text into an ordered sequence of word tokens.
///
/// The vectorizer only needs this to be deterministic: the same text must
/// always yield the same tokens. Case folding is left to the vectorizer.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Splits on every non-alphanumeric character and keeps case as written.
///
/// Good enough for tests and small demos; plug in a real word tokenizer for
/// natural-language corpora.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl SimpleTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|tok| !tok.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}
