//! # ragmail-inference
//!
//! Inference backends for ragmail: text embeddings via a local Ollama
//! instance and chat-based generation via the Groq OpenAI-compatible API.
//!
//! Both backends implement the traits in `ragmail-core`, so the pipeline
//! never depends on a concrete provider. The [`mock`] module provides a
//! deterministic in-process backend for tests.

pub mod groq;
pub mod mock;
pub mod ollama;
pub mod types;

pub use groq::{GroqBackend, GroqConfig};
pub use mock::{MockBackend, MockEmbeddingGenerator};
pub use ollama::{OllamaBackend, OllamaConfig};
