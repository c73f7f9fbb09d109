//! Text splitting that feeds the vectorizer.
pub mod tokenizer;
