use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One corpus question. Immutable once loaded; the engine pairs it with an
/// embedding instead of mutating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub text: String,
    pub tags: BTreeSet<String>,
}

impl DocumentRecord {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            tags: BTreeSet::new(),
        }
    }
}

/// Wire shape of one corpus line; `tags` accepts a single string or an array.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    tags: Option<RawTags>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTags {
    One(String),
    Many(Vec<String>),
}

impl RawTags {
    fn into_set(self) -> BTreeSet<String> {
        match self {
            RawTags::One(tag) => BTreeSet::from([tag]),
            RawTags::Many(tags) => tags.into_iter().collect(),
        }
    }
}

/// Load a newline-delimited JSON corpus.
///
/// Parsing is strict: any line that is not a valid record fails the whole
/// load, naming the offending line. A partially trusted corpus is worse than
/// no corpus.
pub fn load_documents(path: impl AsRef<Path>) -> Result<Vec<DocumentRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut documents = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let raw: RawQuestion = serde_json::from_str(&line).map_err(|e| {
            EngineError::Input(format!(
                "{}:{}: malformed corpus line: {}",
                path.display(),
                line_no + 1,
                e
            ))
        })?;
        documents.push(DocumentRecord {
            id: raw.id,
            text: raw.question,
            tags: raw.tags.map(RawTags::into_set).unwrap_or_default(),
        });
    }
    tracing::info!(documents = documents.len(), path = %path.display(), "loaded corpus");
    Ok(documents)
}

/// Load a stop-word list (a JSON array of lower-case strings).
///
/// A missing file is non-fatal: the build proceeds with an empty set and a
/// warning. Malformed JSON in an existing file is an input error.
pub fn load_stop_words(path: impl AsRef<Path>) -> Result<HashSet<String>> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(path = %path.display(), "stop-word file not found, continuing without stop words");
        return Ok(HashSet::new());
    }
    let content = std::fs::read_to_string(path)?;
    let words: Vec<String> = serde_json::from_str(&content).map_err(|e| {
        EngineError::Input(format!(
            "{}: malformed stop-word JSON: {}",
            path.display(),
            e
        ))
    })?;
    Ok(words.into_iter().collect())
}
