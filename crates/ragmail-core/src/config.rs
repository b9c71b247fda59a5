//! Environment-style configuration for the email generator.
//!
//! All options are read once at initialization and never renegotiated per
//! request. Recognized variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RAGMAIL_DATA_DIR` | `data` | Directory with projects.json + background files |
//! | `RAGMAIL_INDEX_PATH` | `ragmail_index.json` | Persisted index snapshot location |
//! | `OLLAMA_BASE` | `http://127.0.0.1:11434` | Embedding backend base URL |
//! | `OLLAMA_EMBED_MODEL` | `nomic-embed-text` | Embedding model name |
//! | `OLLAMA_EMBED_DIM` | `768` | Embedding vector dimension |
//! | `GROQ_BASE_URL` | `https://api.groq.com/openai/v1` | Chat completions endpoint |
//! | `GROQ_API_KEY` | (none) | API credential, required |
//! | `GROQ_MODEL` | `llama-3.3-70b-versatile` | Generation model name |
//! | `RAGMAIL_EMBED_TIMEOUT_SECS` | `30` | Embedding request timeout |
//! | `RAGMAIL_GEN_TIMEOUT_SECS` | `120` | Generation request timeout |

use std::path::PathBuf;

use tracing::warn;

use crate::defaults;
use crate::error::{Error, Result};

/// Configuration for the email generator and its backends.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory holding projects.json and the background text files.
    pub data_dir: PathBuf,
    /// Location of the persisted index snapshot.
    pub index_path: PathBuf,
    /// Base URL of the Ollama embedding endpoint.
    pub ollama_base_url: String,
    /// Embedding model name.
    pub embed_model: String,
    /// Expected embedding dimension.
    pub embed_dimension: usize,
    /// Embedding request timeout in seconds.
    pub embed_timeout_secs: u64,
    /// Base URL of the Groq OpenAI-compatible endpoint.
    pub groq_base_url: String,
    /// API credential for the generation backend (required for real use).
    pub groq_api_key: Option<String>,
    /// Generation model name.
    pub gen_model: String,
    /// Generation request timeout in seconds.
    pub gen_timeout_secs: u64,
    /// Sampling temperature for generation requests.
    pub gen_temperature: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(defaults::DATA_DIR),
            index_path: PathBuf::from(defaults::INDEX_PATH),
            ollama_base_url: defaults::OLLAMA_URL.to_string(),
            embed_model: defaults::EMBED_MODEL.to_string(),
            embed_dimension: defaults::EMBED_DIMENSION,
            embed_timeout_secs: defaults::EMBED_TIMEOUT_SECS,
            groq_base_url: defaults::GROQ_URL.to_string(),
            groq_api_key: None,
            gen_model: defaults::GEN_MODEL.to_string(),
            gen_timeout_secs: defaults::GEN_TIMEOUT_SECS,
            gen_temperature: defaults::GEN_TEMPERATURE,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from environment variables with fallback to
    /// defaults, then validate it.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("RAGMAIL_DATA_DIR") {
            config.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("RAGMAIL_INDEX_PATH") {
            config.index_path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("OLLAMA_BASE") {
            config.ollama_base_url = val;
        }
        if let Ok(val) = std::env::var("OLLAMA_EMBED_MODEL") {
            config.embed_model = val;
        }
        if let Ok(val) = std::env::var("OLLAMA_EMBED_DIM") {
            match val.parse::<usize>() {
                Ok(dim) => config.embed_dimension = dim,
                Err(_) => warn!(value = %val, "Invalid OLLAMA_EMBED_DIM, using default"),
            }
        }
        if let Ok(val) = std::env::var("GROQ_BASE_URL") {
            config.groq_base_url = val;
        }
        config.groq_api_key = std::env::var("GROQ_API_KEY").ok();
        if let Ok(val) = std::env::var("GROQ_MODEL") {
            config.gen_model = val;
        }
        if let Ok(val) = std::env::var("RAGMAIL_EMBED_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) => config.embed_timeout_secs = secs,
                Err(_) => warn!(value = %val, "Invalid RAGMAIL_EMBED_TIMEOUT_SECS, using default"),
            }
        }
        if let Ok(val) = std::env::var("RAGMAIL_GEN_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) => config.gen_timeout_secs = secs,
                Err(_) => warn!(value = %val, "Invalid RAGMAIL_GEN_TIMEOUT_SECS, using default"),
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// The API credential and non-empty model names are checked here so that
    /// a misconfigured deployment fails at startup, not on the first request.
    pub fn validate(&self) -> Result<()> {
        match &self.groq_api_key {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(Error::Config(
                    "GROQ_API_KEY is required for the generation backend".to_string(),
                ))
            }
        }
        if self.embed_model.trim().is_empty() {
            return Err(Error::Config("embedding model name is empty".to_string()));
        }
        if self.gen_model.trim().is_empty() {
            return Err(Error::Config("generation model name is empty".to_string()));
        }
        if self.embed_dimension == 0 {
            return Err(Error::Config(
                "embedding dimension must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
