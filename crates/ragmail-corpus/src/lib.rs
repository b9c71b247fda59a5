//! # ragmail-corpus
//!
//! Turns the fixed portfolio (project records plus background text files)
//! into a uniform collection of corpus units ready for indexing.
//!
//! Loading is all-or-nothing: a missing background file or a project record
//! missing a required field fails the whole build, never a partial corpus.

pub mod loader;
pub mod render;

pub use loader::{CorpusLoader, BACKGROUND_FILES};
pub use render::render_project;
