//! In-memory semantic index with snapshot persistence.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use ragmail_core::{
    CorpusMetadata, CorpusSource, CorpusUnit, EmbeddingBackend, Error, Result, Vector,
};

use crate::store::{IndexEntry, IndexSnapshot};

/// Semantic index over the corpus.
///
/// `build` runs once offline and persists the snapshot; the request path
/// only ever calls `load` and `search`. After `load` the index is read-only,
/// so searches from concurrent requests need no locking.
pub struct SemanticIndex {
    path: PathBuf,
    backend: Arc<dyn EmbeddingBackend>,
    entries: Option<Vec<IndexEntry>>,
}

impl SemanticIndex {
    pub fn new(path: impl Into<PathBuf>, backend: Arc<dyn EmbeddingBackend>) -> Self {
        Self {
            path: path.into(),
            backend,
            entries: None,
        }
    }

    /// Whether the index has been built or loaded.
    pub fn is_ready(&self) -> bool {
        self.entries.is_some()
    }

    /// Number of indexed entries. Zero before build/load.
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Location of the persisted snapshot.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Embed the whole corpus and persist the result, replacing any prior
    /// index at the configured path. Leaves the index ready in memory.
    #[instrument(skip(self, corpus), fields(component = "index", op = "build", unit_count = corpus.len()))]
    pub async fn build(&mut self, corpus: &[CorpusUnit]) -> Result<()> {
        let start = Instant::now();

        let texts: Vec<String> = corpus.iter().map(|u| u.text.clone()).collect();
        let vectors = self
            .backend
            .embed_texts(&texts)
            .await
            .map_err(into_build_error)?;

        if vectors.len() != corpus.len() {
            return Err(Error::IndexBuild(format!(
                "embedding backend returned {} vectors for {} units",
                vectors.len(),
                corpus.len()
            )));
        }

        let entries: Vec<IndexEntry> = corpus
            .iter()
            .zip(vectors)
            .map(|(unit, vector)| IndexEntry {
                id: Uuid::new_v4(),
                vector,
                unit: unit.clone(),
            })
            .collect();

        let snapshot = IndexSnapshot {
            model: self.backend.model_name().to_string(),
            dimension: self.backend.dimension(),
            entries,
        };
        snapshot.write(&self.path)?;

        info!(
            entry_count = snapshot.entries.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            path = %self.path.display(),
            "Index built and persisted"
        );
        self.entries = Some(snapshot.entries);
        Ok(())
    }

    /// Attach to a previously persisted index.
    pub async fn load(&mut self) -> Result<()> {
        let snapshot = IndexSnapshot::read(&self.path)?;

        info!(
            entry_count = snapshot.entries.len(),
            model = %snapshot.model,
            path = %self.path.display(),
            "Index loaded"
        );
        self.entries = Some(snapshot.entries);
        Ok(())
    }

    /// Return the k nearest corpus units for the query text.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<CorpusUnit>> {
        self.search_filtered(query, k, |_| true).await
    }

    /// Like [`search`](Self::search), restricted to entries whose metadata
    /// satisfies the predicate.
    ///
    /// Results are ordered by descending cosine similarity; equal scores
    /// keep insertion order, so identical index state and query always
    /// produce the same ranking.
    #[instrument(skip(self, query, filter), fields(component = "index", op = "search"))]
    pub async fn search_filtered<F>(&self, query: &str, k: usize, filter: F) -> Result<Vec<CorpusUnit>>
    where
        F: Fn(&CorpusMetadata) -> bool,
    {
        let entries = self.entries.as_ref().ok_or(Error::IndexNotReady)?;

        let start = Instant::now();
        let query_vector = self.embed_query(query).await?;

        let mut scored: Vec<(usize, f32)> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| filter(&entry.unit.metadata))
            .map(|(i, entry)| (i, cosine_similarity(&query_vector, &entry.vector)))
            .collect();

        // Stable sort: ties keep insertion order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        debug!(
            result_count = scored.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Search complete"
        );
        Ok(scored
            .into_iter()
            .map(|(i, _)| entries[i].unit.clone())
            .collect())
    }

    /// Search restricted to project-sourced entries.
    pub async fn search_projects(&self, query: &str, k: usize) -> Result<Vec<CorpusUnit>> {
        self.search_filtered(query, k, |meta| meta.source == CorpusSource::Projects)
            .await
    }

    async fn embed_query(&self, query: &str) -> Result<Vector> {
        let mut vectors = self
            .backend
            .embed_texts(&[query.to_string()])
            .await
            .map_err(into_request_error)?;

        if vectors.is_empty() {
            return Err(Error::Generation(
                "embedding backend returned no vector for query".to_string(),
            ));
        }
        Ok(vectors.remove(0))
    }
}

/// Embedding failures during the offline build are fatal build errors.
fn into_build_error(err: Error) -> Error {
    match err {
        Error::Embedding(msg) => Error::IndexBuild(msg),
        other => other,
    }
}

/// Embedding failures on the request path fail that request only.
fn into_request_error(err: Error) -> Error {
    match err {
        Error::Embedding(msg) => Error::Generation(msg),
        other => other,
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    (dot / denom) as f32
}
