//! Centralized default constants for the ragmail system.
//!
//! **This module is the single source of truth** for all shared default
//! values. The other crates reference these constants instead of defining
//! their own magic numbers.

// =============================================================================
// EMBEDDING
// =============================================================================

/// Default Ollama base URL.
pub const OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default embedding model name (Ollama).
pub const EMBED_MODEL: &str = "nomic-embed-text";

/// Default embedding vector dimension for nomic-embed-text.
pub const EMBED_DIMENSION: usize = 768;

/// Timeout for embedding requests in seconds.
pub const EMBED_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// GENERATION
// =============================================================================

/// Default Groq OpenAI-compatible API endpoint.
pub const GROQ_URL: &str = "https://api.groq.com/openai/v1";

/// Default generation model name (Groq).
pub const GEN_MODEL: &str = "llama-3.3-70b-versatile";

/// Timeout for generation requests in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 120;

/// Sampling temperature for generation requests.
pub const GEN_TEMPERATURE: f32 = 0.7;

// =============================================================================
// MATCHING
// =============================================================================

/// Candidate pool size for model-driven project selection.
pub const MATCH_TOP_K: usize = 3;

/// Candidate pool size when the caller forces a specific project. Wider than
/// the default pool so the forced project is likely to appear in it.
pub const FORCED_MATCH_TOP_K: usize = 5;

/// Relevance score substituted when the selection reply cannot be parsed.
pub const FALLBACK_RELEVANCE_SCORE: u8 = 8;

/// Characters of project text included in the paragraph prompt.
pub const PROJECT_PREVIEW_CHARS: usize = 800;

// =============================================================================
// STORAGE
// =============================================================================

/// Default location of the persisted index snapshot.
pub const INDEX_PATH: &str = "ragmail_index.json";

/// Default directory holding projects.json and the background text files.
pub const DATA_DIR: &str = "data";

/// Project records file name within the data directory.
pub const PROJECTS_FILE: &str = "projects.json";
