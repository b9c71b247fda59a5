//! # ragmail-index
//!
//! Semantic index over the portfolio corpus: embeds every corpus unit
//! through an [`EmbeddingBackend`](ragmail_core::EmbeddingBackend), persists
//! the result as a snapshot at a configured path, and answers
//! nearest-neighbor queries with metadata filtering.
//!
//! Building is a one-time offline operation; the request path only ever
//! loads the snapshot and embeds the query. The snapshot is replaced
//! wholesale on rebuild, never merged.

pub mod index;
pub mod store;

pub use index::SemanticIndex;
pub use store::{IndexEntry, IndexSnapshot};
