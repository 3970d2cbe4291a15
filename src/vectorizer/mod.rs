pub mod normalizer;
pub mod vocabulary;

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::vectorizer::normalizer::normalize;
use crate::vectorizer::vocabulary::{Vocabulary, VocabularyBuilder};

/// Bag-of-words TF-IDF vectorizer.
///
/// `fit` consumes the corpus once to build a ranked vocabulary; after that,
/// `transform` turns any text (corpus document or query) into a dense vector
/// of exactly `embedding_size` entries. The vocabulary is immutable once
/// fitted; a fresh vectorizer is required to refit.
///
/// `total_term_count` is the number of distinct vocabulary terms that
/// survived stop-word removal, including terms beyond the embedding-size
/// cap. It is the IDF denominator, not the document count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    vocabulary: Vocabulary,
    total_term_count: usize,
    embedding_size: usize,
    stop_words: HashSet<String>,
    fitted: bool,
}

impl TfIdfVectorizer {
    pub fn new(stop_words: HashSet<String>, embedding_size: usize) -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            total_term_count: 0,
            embedding_size,
            stop_words,
            fitted: false,
        }
    }

    /// Fit the vectorizer on the corpus texts. Must be called exactly once.
    pub fn fit<T: AsRef<str>>(&mut self, texts: &[T]) -> Result<()> {
        if self.fitted {
            return Err(EngineError::State(
                "vectorizer is already fitted; build a new one to refit".into(),
            ));
        }
        let mut builder = VocabularyBuilder::new();
        for text in texts {
            builder.scan_document(text.as_ref());
        }
        let (vocabulary, total_term_count) = builder.finish(&self.stop_words, self.embedding_size);
        tracing::info!(
            vocabulary_len = vocabulary.len(),
            total_term_count,
            documents = texts.len(),
            "fitted vectorizer"
        );
        self.vocabulary = vocabulary;
        self.total_term_count = total_term_count;
        self.fitted = true;
        Ok(())
    }

    /// Transform a text into a dense TF-IDF vector of length `embedding_size`.
    ///
    /// Tokens absent from the fitted vocabulary are silently ignored; an
    /// empty token list yields the zero vector.
    pub fn transform(&self, text: &str) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(EngineError::State("transform called before fit".into()));
        }
        let word_list = normalize(text);
        let mut embedding = vec![0.0f64; self.embedding_size];
        if word_list.is_empty() {
            return Ok(embedding);
        }

        let total_words = word_list.len() as f64;
        let mut counts: IndexMap<&str, u64> = IndexMap::new();
        for word in &word_list {
            *counts.entry(word.as_str()).or_insert(0) += 1;
        }

        for (word, count) in counts {
            if let Some(entry) = self.vocabulary.entry(word) {
                // Vocabulary entries always carry a positive document
                // frequency, so membership alone decides the contribution.
                let tf = count as f64 / total_words;
                let idf = (self.total_term_count as f64
                    / (entry.document_frequency as f64 + 1.0))
                    .ln()
                    + 1.0;
                embedding[entry.index] = tf * idf;
            }
        }
        Ok(embedding)
    }

    #[inline]
    pub fn embedding_size(&self) -> usize {
        self.embedding_size
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[inline]
    pub fn total_term_count(&self) -> usize {
        self.total_term_count
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }
}
