use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::utils::normalizer::CaseFolding;

/// Per-document token occurrence counts.
///
/// Tokens are stored in first-seen order, so iteration is deterministic for
/// identical input.
///
/// # Examples
/// ```
/// use bow_vectorizer::TokenFrequency;
/// let mut freq = TokenFrequency::new();
/// freq.add_tokens(&["the", "cat", "the"]);
/// assert_eq!(freq.token_count("the"), 2);
/// assert_eq!(freq.token_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<Box<str>, u32>,
    total_token_count: u64,
}

/// adding tokens
impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Count one occurrence of `token`.
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        match self.token_count.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.token_count.insert(token.into(), 1);
            }
        }
        self.total_token_count += 1;
        self
    }

    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Count tokens after applying `folding` to each of them.
    pub fn from_tokens<T>(tokens: &[T], folding: CaseFolding) -> Self
    where
        T: AsRef<str>,
    {
        let mut freq = TokenFrequency::new();
        for token in tokens {
            freq.add_token(&folding.normalize(token.as_ref()));
        }
        freq
    }
}

/// statistics
impl TokenFrequency {
    /// Occurrences of `token`, 0 when absent
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// Total number of counted tokens, repeats included
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// Number of distinct tokens
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token_count.is_empty()
    }

    /// `(token, count)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.token_count.iter().map(|(tok, count)| (&**tok, *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_repeats_and_keeps_first_seen_order() {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&["sat", "the", "cat", "the"]);
        assert_eq!(freq.token_num(), 3);
        assert!(!freq.is_empty());
        assert_eq!(freq.token_sum(), 4);
        let order: Vec<&str> = freq.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["sat", "the", "cat"]);
    }

    #[test]
    fn from_tokens_applies_case_folding() {
        let folded = TokenFrequency::from_tokens(&["And", "and"], CaseFolding::Lowercase);
        assert_eq!(folded.token_count("and"), 2);
        let kept = TokenFrequency::from_tokens(&["And", "and"], CaseFolding::Preserve);
        assert_eq!(kept.token_num(), 2);
        assert_eq!(kept.token_count("AND"), 0);
    }
}
