use serde::{Deserialize, Serialize};

use crate::utils::normalizer::CaseFolding;
use crate::vectorizer::tfidf::{TermFrequencyMode, VectorNorm};

/// Weighting scheme written into document vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Weighting {
    /// occurrence counts
    RawCount,
    /// TF × IDF
    #[default]
    TfIdf,
}

/// Settings fixed before fit and reused for every later transform.
///
/// `term_freq` and `norm` only apply to `Weighting::TfIdf`.
///
/// # Examples
/// ```
/// use bow_vectorizer::{TermFrequencyMode, VectorizerConfig, Weighting};
///
/// let config = VectorizerConfig::default()
///     .with_lowercase(false)
///     .with_term_freq(TermFrequencyMode::Sublinear);
/// assert_eq!(config.weighting, Weighting::TfIdf);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// fold `And` and `and` into one term
    pub lowercase: bool,
    pub weighting: Weighting,
    pub term_freq: TermFrequencyMode,
    pub norm: VectorNorm,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            weighting: Weighting::TfIdf,
            term_freq: TermFrequencyMode::Linear,
            norm: VectorNorm::None,
        }
    }
}

impl VectorizerConfig {
    /// Raw-count preset
    pub fn raw_count() -> Self {
        Self::default().with_weighting(Weighting::RawCount)
    }

    /// TF-IDF preset
    pub fn tf_idf() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    #[must_use]
    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    #[must_use]
    pub fn with_term_freq(mut self, term_freq: TermFrequencyMode) -> Self {
        self.term_freq = term_freq;
        self
    }

    #[must_use]
    pub fn with_norm(mut self, norm: VectorNorm) -> Self {
        self.norm = norm;
        self
    }

    #[inline]
    pub fn folding(&self) -> CaseFolding {
        CaseFolding::from_lowercase(self.lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_presets() {
        assert_eq!(VectorizerConfig::tf_idf(), VectorizerConfig::default());
        assert_eq!(VectorizerConfig::raw_count().weighting, Weighting::RawCount);
        assert_eq!(VectorizerConfig::default().folding(), CaseFolding::Lowercase);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        #[derive(Serialize)]
        struct Partial {
            lowercase: bool,
        }
        let bytes = serde_cbor::to_vec(&Partial { lowercase: false }).unwrap();
        let config: VectorizerConfig = serde_cbor::from_slice(&bytes).unwrap();
        assert_eq!(config, VectorizerConfig::default().with_lowercase(false));
    }
}
