use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::vectorizer::normalizer::normalize;

/// Position and corpus document frequency of a fitted vocabulary token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyEntry {
    /// Embedding index in `[0, embedding_size)`.
    pub index: usize,
    /// Number of corpus documents containing the token at least once.
    pub document_frequency: u64,
}

/// Fixed, ranked token vocabulary produced by a corpus fit.
///
/// The map is kept in rank order (document frequency descending, ties by
/// first encounter during the corpus scan), so a token's position in the map
/// *is* its embedding index. Serialized as an ordered sequence so the
/// ordering survives a persist/restore round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(with = "indexmap::map::serde_seq")]
    terms: IndexMap<String, u64>,
}

impl Vocabulary {
    /// Look up a token, returning its embedding index and document frequency.
    #[inline]
    pub fn entry(&self, token: &str) -> Option<VocabularyEntry> {
        self.terms
            .get_full(token)
            .map(|(index, _, &document_frequency)| VocabularyEntry {
                index,
                document_frequency,
            })
    }

    /// Number of tokens in the vocabulary (at most the embedding size).
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Tokens in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.terms.iter().map(|(token, &count)| (token.as_str(), count))
    }
}

/// Accumulates document frequencies over a single corpus scan (fit phase).
///
/// Insertion order of the counter map records the order in which tokens were
/// first encountered; the final stable sort relies on it for tie-breaking.
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    document_counts: IndexMap<String, u64>,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self {
            document_counts: IndexMap::new(),
        }
    }

    /// Count one document: each distinct surviving token is counted once,
    /// no matter how often it repeats within the document.
    pub fn scan_document(&mut self, text: &str) {
        let distinct: IndexSet<String> = normalize(text).into_iter().collect();
        for token in distinct {
            *self.document_counts.entry(token).or_insert(0) += 1;
        }
    }

    /// Finalize the vocabulary.
    ///
    /// Returns the ranked vocabulary capped at `embedding_size` tokens and
    /// the total number of distinct tokens that survived stop-word removal.
    /// The total counts tokens beyond the cap as well; it feeds the IDF
    /// denominator and is deliberately not the document count.
    pub fn finish(
        mut self,
        stop_words: &HashSet<String>,
        embedding_size: usize,
    ) -> (Vocabulary, usize) {
        self.document_counts
            .retain(|token, _| !stop_words.contains(token));
        let total_term_count = self.document_counts.len();

        // IndexMap::sort_by is stable, so equal counts keep first-encounter order.
        self.document_counts.sort_by(|_, a, _, b| b.cmp(a));

        let terms: IndexMap<String, u64> = self
            .document_counts
            .into_iter()
            .take(embedding_size)
            .collect();
        (Vocabulary { terms }, total_term_count)
    }
}
