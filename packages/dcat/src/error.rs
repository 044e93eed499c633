//! Error types for the DCAT writer.
//!
//! The catalog transformation itself is infallible: missing or malformed
//! item fields degrade to defaults. `DcatError` only covers the I/O edges
//! (reading search pages, loading defaults, writing catalogs and the cache).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the DCAT writer library.
#[derive(Debug, Error)]
pub enum DcatError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error while loading catalog defaults.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// No committed catalog found in the cache directory.
    #[error("No recent DCAT cache found in {}", .0.display())]
    CacheNotFound(PathBuf),

    /// Input that cannot be interpreted as a search result page.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for DCAT writer operations.
pub type Result<T> = std::result::Result<T, DcatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DcatError::InvalidInput("expected an object".to_string());
        assert_eq!(err.to_string(), "Invalid input: expected an object");
    }

    #[test]
    fn test_cache_not_found_display() {
        let err = DcatError::CacheNotFound(PathBuf::from("/tmp/dcat/cache"));
        assert_eq!(
            err.to_string(),
            "No recent DCAT cache found in /tmp/dcat/cache"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DcatError = json_err.into();
        assert!(err.to_string().starts_with("JSON serialization failed"));
    }
}
