//! Batch query contract for request/response callers.
//!
//! The engine itself only exposes `query(text, n)`; these are the serde
//! shapes a service front end exchanges with clients, kept here so transport
//! code stays a thin adapter.

use serde::{Deserialize, Serialize};

use crate::engine::SearchEngine;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityRequest {
    pub questions: Vec<String>,
}

/// Per-question answer: `(score, text)` pairs in the engine's output order
/// (weakest of the top-n first, best match last).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionMatches {
    pub question: String,
    pub similar_questions: Vec<(f64, String)>,
}

/// Answer a batch of questions against one engine.
///
/// `n` is clamped to the corpus size so a small corpus does not fail the
/// whole batch; an unfitted or empty engine still surfaces its error.
pub fn similar_questions_batch(
    engine: &SearchEngine,
    request: &SimilarityRequest,
    n: usize,
) -> Result<Vec<QuestionMatches>> {
    let n = n.min(engine.len());
    let mut results = Vec::with_capacity(request.questions.len());
    for question in &request.questions {
        let similar_questions = engine.query(question, n)?;
        results.push(QuestionMatches {
            question: question.clone(),
            similar_questions,
        });
    }
    Ok(results)
}
