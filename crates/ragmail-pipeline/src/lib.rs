//! # ragmail-pipeline
//!
//! The retrieval-and-selection pipeline: given a professor's research area,
//! find the best-matching portfolio project, have the language model justify
//! the match and draft an alignment paragraph, and splice the paragraph into
//! one of three fixed email templates.
//!
//! The entry point is the caller-owned [`EmailGenerator`] handle: create it
//! at startup, call [`EmailGenerator::load_index`] once, then serve any
//! number of [`EmailGenerator::generate_email`] requests against it.

pub mod composer;
pub mod generator;
pub mod matcher;

pub use generator::EmailGenerator;
pub use matcher::ProjectMatcher;
