//! Error types for ragmail.

use thiserror::Error;

/// Result type alias using ragmail's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ragmail operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Corpus source data is missing or malformed (fatal at initialization)
    #[error("Corpus load error: {0}")]
    CorpusLoad(String),

    /// Embedding backend failed while building the index (fatal, init-only)
    #[error("Index build error: {0}")]
    IndexBuild(String),

    /// No persisted index at the configured location; build must run first
    #[error("Index not found at {0}; run the index build first")]
    IndexNotFound(String),

    /// Search called before the index was built or loaded
    #[error("Index not ready: call build() or load() before searching")]
    IndexNotReady,

    /// Model backend failure during selection or paragraph generation
    #[error("Generation error: {0}")]
    Generation(String),

    /// A request arrived before the generator finished initializing
    #[error("Generator not ready: index has not been loaded")]
    GeneratorNotReady,

    /// Embedding generation failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_corpus_load() {
        let err = Error::CorpusLoad("projects.json missing".to_string());
        assert_eq!(err.to_string(), "Corpus load error: projects.json missing");
    }

    #[test]
    fn test_error_display_index_build() {
        let err = Error::IndexBuild("embedding backend unavailable".to_string());
        assert_eq!(
            err.to_string(),
            "Index build error: embedding backend unavailable"
        );
    }

    #[test]
    fn test_error_display_index_not_found() {
        let err = Error::IndexNotFound("/var/lib/ragmail/index.json".to_string());
        assert!(err.to_string().contains("/var/lib/ragmail/index.json"));
        assert!(err.to_string().contains("run the index build first"));
    }

    #[test]
    fn test_error_display_index_not_ready() {
        let err = Error::IndexNotReady;
        assert!(err.to_string().contains("build() or load()"));
    }

    #[test]
    fn test_error_display_generation() {
        let err = Error::Generation("model timeout".to_string());
        assert_eq!(err.to_string(), "Generation error: model timeout");
    }

    #[test]
    fn test_error_display_generator_not_ready() {
        let err = Error::GeneratorNotReady;
        assert!(err.to_string().contains("index has not been loaded"));
    }

    #[test]
    fn test_error_display_embedding() {
        let err = Error::Embedding("request failed".to_string());
        assert_eq!(err.to_string(), "Embedding error: request failed");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing API key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API key");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => {
                assert!(!msg.is_empty());
            }
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(get_result().unwrap(), 42);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_debug_format() {
        let err = Error::GeneratorNotReady;
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("GeneratorNotReady"));
    }
}
