//! TF-IDF question similarity search.
//!
//! The crate indexes a corpus of short natural-language questions and, given
//! a query text, returns the n most similar corpus entries ranked by cosine
//! similarity over TF-IDF vectors. Fitting is a one-shot batch operation;
//! querying is a pure read over the resulting immutable state.
//!
//! Pipeline: corpus text -> [`vectorizer::normalizer`] ->
//! [`vectorizer::vocabulary`] (fit) -> [`TfIdfVectorizer::transform`]
//! (corpus vectors) -> stored by [`SearchEngine`]. At query time the query
//! text runs through the same transform and [`SimilarityScorer`] ranks it
//! against the stored corpus matrix.

pub mod corpus;
pub mod engine;
pub mod error;
pub mod scorer;
pub mod service;
pub mod vectorizer;

pub use corpus::DocumentRecord;
pub use engine::SearchEngine;
pub use error::{EngineError, Result};
pub use scorer::SimilarityScorer;
pub use vectorizer::TfIdfVectorizer;
