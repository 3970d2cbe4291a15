pub mod snapshot;

use std::collections::HashSet;

use rayon::prelude::*;

use crate::corpus::DocumentRecord;
use crate::error::{EngineError, Result};
use crate::scorer::SimilarityScorer;
use crate::vectorizer::TfIdfVectorizer;

/// Fit-once, query-many search engine over a question corpus.
///
/// An engine only exists in the ready state: `build` and
/// [`restore`](SearchEngine::restore) are the sole constructors, and both
/// return a fully initialized value. Document order is identity — the
/// `documents` and `embeddings` vectors stay position-aligned for the
/// engine's lifetime, and similarity ranking indexes into both.
///
/// `query` is a pure read over immutable state, so shared references may
/// query concurrently; replacing the engine (a rebuild or restore) produces
/// a new value and is serialized by ownership.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    documents: Vec<DocumentRecord>,
    embeddings: Vec<Vec<f64>>,
    vectorizer: TfIdfVectorizer,
}

impl SearchEngine {
    /// Fit a vectorizer on the corpus and transform every document.
    ///
    /// An empty corpus is accepted: the vocabulary ends up empty and every
    /// query scores zero against nothing (though `query` then rejects any
    /// `n`).
    pub fn build(
        documents: Vec<DocumentRecord>,
        stop_words: HashSet<String>,
        embedding_size: usize,
    ) -> Result<Self> {
        let mut vectorizer = TfIdfVectorizer::new(stop_words, embedding_size);
        let texts: Vec<&str> = documents.iter().map(|doc| doc.text.as_str()).collect();
        vectorizer.fit(&texts)?;

        // Each document reads the finalized vocabulary and writes its own
        // slot; collect preserves corpus order.
        let embeddings = documents
            .par_iter()
            .map(|doc| vectorizer.transform(&doc.text))
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(documents = documents.len(), "corpus vectorized");

        Ok(Self {
            documents,
            embeddings,
            vectorizer,
        })
    }

    /// Return the top `n` most similar corpus questions for `text`.
    ///
    /// Results come back in ascending score order: the weakest of the top-n
    /// first, the single best match last. Among equal scores the document
    /// occurring later in corpus order sorts later. Scores are rounded to 4
    /// decimal places; texts are returned verbatim.
    pub fn query(&self, text: &str, n: usize) -> Result<Vec<(f64, String)>> {
        if n == 0 || n > self.documents.len() {
            return Err(EngineError::Validation(format!(
                "n must be in 1..={}, got {}",
                self.documents.len(),
                n
            )));
        }

        let query_vectors = [self.vectorizer.transform(text)?];
        let scores = SimilarityScorer::new().cosine_similarity(&query_vectors, &self.embeddings);

        // Stable ascending sort over corpus indices, then the tail slice in
        // that same order.
        let mut order: Vec<usize> = (0..self.documents.len()).collect();
        order.sort_by(|&a, &b| scores[a][0].total_cmp(&scores[b][0]));

        Ok(order[self.documents.len() - n..]
            .iter()
            .map(|&i| (round4(scores[i][0]), self.documents[i].text.clone()))
            .collect())
    }

    #[inline]
    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    #[inline]
    pub fn embeddings(&self) -> &[Vec<f64>] {
        &self.embeddings
    }

    #[inline]
    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[inline]
fn round4(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}
