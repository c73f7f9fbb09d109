use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Case rule applied to every token before it is looked up in, or added to,
/// a vocabulary.
///
/// Fixed before fit and stored with the vocabulary, so queries are folded
/// exactly like the corpus was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CaseFolding {
    /// `And` and `and` are different terms
    Preserve,
    /// `And` and `and` are the same term
    #[default]
    Lowercase,
}

impl CaseFolding {
    #[inline]
    pub fn from_lowercase(lowercase: bool) -> Self {
        if lowercase {
            CaseFolding::Lowercase
        } else {
            CaseFolding::Preserve
        }
    }

    #[inline]
    pub fn is_lowercase(&self) -> bool {
        matches!(self, CaseFolding::Lowercase)
    }

    /// Borrowed when the token is already in normal form.
    #[inline]
    pub fn normalize<'a>(&self, token: &'a str) -> Cow<'a, str> {
        match self {
            CaseFolding::Preserve => Cow::Borrowed(token),
            CaseFolding::Lowercase => {
                // titlecase letters such as `ǅ` are not `is_uppercase`
                if token.chars().any(|c| c.to_lowercase().ne(std::iter::once(c))) {
                    Cow::Owned(token.to_lowercase())
                } else {
                    Cow::Borrowed(token)
                }
            }
        }
    }
}
