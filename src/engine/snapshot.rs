//! Durable engine state.
//!
//! A snapshot bundles the documents, their embeddings and the fitted
//! vectorizer into one versioned CBOR blob. Writes go to a temp file in the
//! target directory followed by a rename, so a reader never observes a
//! partially written snapshot.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corpus::DocumentRecord;
use crate::engine::SearchEngine;
use crate::error::{EngineError, Result};
use crate::vectorizer::TfIdfVectorizer;

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct EngineSnapshot {
    version: u32,
    documents: Vec<DocumentRecord>,
    embeddings: Vec<Vec<f64>>,
    vectorizer: TfIdfVectorizer,
}

impl SearchEngine {
    /// Write the engine state to `path` atomically.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let snapshot = EngineSnapshot {
            version: SNAPSHOT_VERSION,
            documents: self.documents.clone(),
            embeddings: self.embeddings.clone(),
            vectorizer: self.vectorizer.clone(),
        };
        let bytes =
            serde_cbor::to_vec(&snapshot).map_err(|e| io::Error::other(e.to_string()))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "engine".to_string());
        let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

        fs::write(&tmp_path, &bytes)?;
        fs::rename(&tmp_path, path)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "persisted engine snapshot");
        Ok(())
    }

    /// Rebuild an engine from a snapshot without refitting.
    ///
    /// Fails with `NotFound` when the file is absent and `Corrupt` when the
    /// bytes do not decode into the expected structure; callers are expected
    /// to fall back to a fresh `build` in either case.
    pub fn restore(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EngineError::NotFound(path.to_path_buf()));
        }
        let raw = fs::read(path)?;
        let snapshot: EngineSnapshot = serde_cbor::from_slice(&raw)
            .map_err(|e| EngineError::Corrupt(format!("{}: {}", path.display(), e)))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(EngineError::Corrupt(format!(
                "{}: unsupported snapshot version {}",
                path.display(),
                snapshot.version
            )));
        }
        if snapshot.documents.len() != snapshot.embeddings.len() {
            return Err(EngineError::Corrupt(format!(
                "{}: {} documents but {} embeddings",
                path.display(),
                snapshot.documents.len(),
                snapshot.embeddings.len()
            )));
        }
        if !snapshot.vectorizer.is_fitted() {
            return Err(EngineError::Corrupt(format!(
                "{}: snapshot holds an unfitted vectorizer",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), documents = snapshot.documents.len(), "restored engine snapshot");
        Ok(SearchEngine {
            documents: snapshot.documents,
            embeddings: snapshot.embeddings,
            vectorizer: snapshot.vectorizer,
        })
    }
}
