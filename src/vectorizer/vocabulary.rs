use indexmap::IndexSet;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{Result, VectorizerError};
use crate::utils::normalizer::CaseFolding;

/// Frozen bijection between distinct terms and indices `0..N`.
///
/// Terms are assigned indices in ascending lexicographic order, so two fits
/// over identical input always agree on every index. The case rule used to
/// build it travels with it and is applied to every later lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
    folding: CaseFolding,
}

impl Vocabulary {
    /// Collect every distinct (folded) token of `corpus` and freeze them.
    ///
    /// A corpus made only of empty documents is legal and yields an empty
    /// vocabulary; a corpus with no documents at all is not.
    pub fn fit<D, T>(corpus: &[D], folding: CaseFolding) -> Result<Self>
    where
        D: AsRef<[T]>,
        T: AsRef<str>,
    {
        if corpus.is_empty() {
            return Err(VectorizerError::EmptyCorpus);
        }
        let mut terms: Vec<Box<str>> = corpus
            .iter()
            .flat_map(|doc| doc.as_ref().iter())
            .map(|tok| Box::<str>::from(folding.normalize(tok.as_ref())))
            .collect();
        terms.sort_unstable();
        terms.dedup();

        tracing::debug!(
            docs = corpus.len(),
            terms = terms.len(),
            lowercase = folding.is_lowercase(),
            "vocabulary fitted"
        );
        Ok(Vocabulary {
            terms: terms.into_iter().collect(),
            folding,
        })
    }

    /// Rebuild a vocabulary from its ordered term list (index = position).
    ///
    /// The list must be strictly ascending and already folded, which is what
    /// `fit` produces.
    pub fn from_terms<T>(terms: &[T], folding: CaseFolding) -> Result<Self>
    where
        T: AsRef<str>,
    {
        if let Some(term) = terms.iter().map(AsRef::<str>::as_ref).find(|t: &&str| {
            let term: &str = t;
            folding.normalize(term) != term
        }) {
            return Err(VectorizerError::Persistence(format!(
                "vocabulary term {:?} is not case folded",
                term
            )));
        }
        if let Some(pos) = terms
            .windows(2)
            .position(|pair| pair[0].as_ref() >= pair[1].as_ref())
        {
            return Err(VectorizerError::Persistence(format!(
                "vocabulary terms are not strictly ascending at position {}",
                pos + 1
            )));
        }
        Ok(Vocabulary {
            terms: terms.iter().map(|t| Box::<str>::from(t.as_ref())).collect(),
            folding,
        })
    }

    /// Vocabulary size N
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn folding(&self) -> CaseFolding {
        self.folding
    }

    /// Index of `token` after case folding, `None` when out of vocabulary.
    #[inline]
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.terms.get_index_of(&*self.folding.normalize(token))
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.index_of(token).is_some()
    }

    /// Term stored at `index`
    #[inline]
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|t| &**t)
    }

    /// Terms in index order
    pub fn terms(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.terms.iter().map(|t| &**t)
    }
}

impl<'de> Deserialize<'de> for Vocabulary {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct VocabularyRepr {
            terms: Vec<String>,
            folding: CaseFolding,
        }

        let repr = VocabularyRepr::deserialize(deserializer)?;
        Vocabulary::from_terms(&repr.terms, repr.folding).map_err(de::Error::custom)
    }
}
