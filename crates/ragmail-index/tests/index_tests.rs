//! Integration tests for the semantic index: build, load, and search against
//! the deterministic mock embedding backend.

use std::sync::Arc;

use tempfile::TempDir;

use ragmail_core::{CorpusMetadata, CorpusSource, CorpusUnit, Error};
use ragmail_index::SemanticIndex;
use ragmail_inference::MockBackend;

fn project_unit(id: &str, title: &str, domain: &str, text: &str) -> CorpusUnit {
    CorpusUnit {
        text: text.to_string(),
        metadata: CorpusMetadata {
            source: CorpusSource::Projects,
            project_id: Some(id.to_string()),
            title: Some(title.to_string()),
            kind: Some("Project".to_string()),
            domains: vec![domain.to_string()],
            keywords: vec![],
            links: vec![],
        },
    }
}

fn background_unit(source: CorpusSource, text: &str) -> CorpusUnit {
    CorpusUnit {
        text: text.to_string(),
        metadata: CorpusMetadata::background(source),
    }
}

fn sample_corpus() -> Vec<CorpusUnit> {
    vec![
        project_unit(
            "agent-planner",
            "Agent Planner",
            "multi-agent",
            "Project: Agent Planner\nDomain: multi-agent\nCoordinated planning for multi-agent systems and task graphs",
        ),
        project_unit(
            "web-scraper",
            "Web Scraper",
            "web",
            "Project: Web Scraper\nDomain: web\nPolite concurrent crawler extracting structured html data",
        ),
        background_unit(
            CorpusSource::Skills,
            "Skilled in multi-agent systems, distributed computing, and web development",
        ),
    ]
}

#[tokio::test]
async fn build_then_load_then_self_retrieval() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("index.json");
    let backend = Arc::new(MockBackend::new());
    let corpus = sample_corpus();

    let mut index = SemanticIndex::new(&path, backend.clone());
    index.build(&corpus).await.unwrap();

    // Fresh handle, attach to the persisted snapshot
    let mut loaded = SemanticIndex::new(&path, backend);
    loaded.load().await.unwrap();
    assert_eq!(loaded.len(), 3);

    // Querying a unit's own rendered text verbatim returns that unit first
    for unit in &corpus {
        let hits = loaded.search(&unit.text, 1).await.unwrap();
        assert_eq!(hits[0], *unit);
    }
}

#[tokio::test]
async fn search_projects_only_returns_project_units() {
    let tmp = TempDir::new().unwrap();
    let backend = Arc::new(MockBackend::new());

    let mut index = SemanticIndex::new(tmp.path().join("index.json"), backend);
    index.build(&sample_corpus()).await.unwrap();

    // The skills unit shares vocabulary with this query, but must be excluded
    let hits = index
        .search_projects("multi-agent systems", 10)
        .await
        .unwrap();
    assert!(!hits.is_empty());
    for hit in hits {
        assert_eq!(hit.metadata.source, CorpusSource::Projects);
    }
}

#[tokio::test]
async fn search_ranks_by_similarity() {
    let tmp = TempDir::new().unwrap();
    let backend = Arc::new(MockBackend::new());

    let mut index = SemanticIndex::new(tmp.path().join("index.json"), backend);
    index.build(&sample_corpus()).await.unwrap();

    let hits = index
        .search_projects("multi-agent systems", 2)
        .await
        .unwrap();
    assert_eq!(hits[0].metadata.title.as_deref(), Some("Agent Planner"));
}

#[tokio::test]
async fn equal_scores_keep_insertion_order() {
    let tmp = TempDir::new().unwrap();
    let backend = Arc::new(MockBackend::new());

    // Identical texts embed identically, so both score the same
    let corpus = vec![
        project_unit("first", "First", "x", "identical text"),
        project_unit("second", "Second", "x", "identical text"),
    ];

    let mut index = SemanticIndex::new(tmp.path().join("index.json"), backend);
    index.build(&corpus).await.unwrap();

    for _ in 0..3 {
        let hits = index.search("identical text", 2).await.unwrap();
        assert_eq!(hits[0].metadata.project_id.as_deref(), Some("first"));
        assert_eq!(hits[1].metadata.project_id.as_deref(), Some("second"));
    }
}

#[tokio::test]
async fn search_before_build_or_load_is_not_ready() {
    let tmp = TempDir::new().unwrap();
    let index = SemanticIndex::new(tmp.path().join("index.json"), Arc::new(MockBackend::new()));

    let err = index.search("anything", 3).await.unwrap_err();
    assert!(matches!(err, Error::IndexNotReady));
}

#[tokio::test]
async fn load_without_persisted_index_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let mut index =
        SemanticIndex::new(tmp.path().join("index.json"), Arc::new(MockBackend::new()));

    let err = index.load().await.unwrap_err();
    assert!(matches!(err, Error::IndexNotFound(_)));
}

#[tokio::test]
async fn rebuild_replaces_prior_index() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("index.json");
    let backend = Arc::new(MockBackend::new());

    let mut index = SemanticIndex::new(&path, backend.clone());
    index.build(&sample_corpus()).await.unwrap();

    let smaller = vec![project_unit("only", "Only", "x", "the only project left")];
    index.build(&smaller).await.unwrap();

    let mut reloaded = SemanticIndex::new(&path, backend);
    reloaded.load().await.unwrap();
    assert_eq!(reloaded.len(), 1);

    let hits = reloaded.search("the only project left", 10).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].metadata.project_id.as_deref(), Some("only"));
}

#[tokio::test]
async fn build_failure_is_index_build_error() {
    let tmp = TempDir::new().unwrap();
    let backend = Arc::new(MockBackend::new().with_embedding_failure());

    let mut index = SemanticIndex::new(tmp.path().join("index.json"), backend);
    let err = index.build(&sample_corpus()).await.unwrap_err();
    assert!(matches!(err, Error::IndexBuild(_)));
    assert!(!index.is_ready());
}

#[tokio::test]
async fn query_embedding_failure_is_generation_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("index.json");

    // Build with a working backend, then search through a failing one
    let mut index = SemanticIndex::new(&path, Arc::new(MockBackend::new()));
    index.build(&sample_corpus()).await.unwrap();

    let mut broken = SemanticIndex::new(&path, Arc::new(MockBackend::new().with_embedding_failure()));
    broken.load().await.unwrap();

    let err = broken.search("query", 3).await.unwrap_err();
    assert!(matches!(err, Error::Generation(_)));
}

#[tokio::test]
async fn k_larger_than_corpus_returns_everything() {
    let tmp = TempDir::new().unwrap();
    let mut index =
        SemanticIndex::new(tmp.path().join("index.json"), Arc::new(MockBackend::new()));
    index.build(&sample_corpus()).await.unwrap();

    let hits = index.search("anything at all", 100).await.unwrap();
    assert_eq!(hits.len(), 3);
}

#[tokio::test]
async fn filter_excluding_everything_returns_empty() {
    let tmp = TempDir::new().unwrap();
    let mut index =
        SemanticIndex::new(tmp.path().join("index.json"), Arc::new(MockBackend::new()));
    index.build(&sample_corpus()).await.unwrap();

    let hits = index
        .search_filtered("anything", 10, |_| false)
        .await
        .unwrap();
    assert!(hits.is_empty());
}
