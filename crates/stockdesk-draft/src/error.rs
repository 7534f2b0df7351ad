//! # Draft Error Types
//!
//! Error types for draft storage and configuration.

use thiserror::Error;

/// Result type alias for draft and config operations.
pub type DraftResult<T> = Result<T, DraftError>;

/// Draft cache and configuration failures.
#[derive(Debug, Error)]
pub enum DraftError {
    // =========================================================================
    // Draft Errors
    // =========================================================================
    /// Draft ids become file names, so they are restricted.
    #[error("Invalid draft id '{0}': use 1-64 letters, digits, '-' or '_'")]
    InvalidDraftId(String),

    #[error("Draft not found: {0}")]
    NotFound(String),

    /// The store already holds the configured maximum number of drafts.
    #[error("Draft limit reached ({max}). Discard an old draft first.")]
    LimitReached { max: usize },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// No platform data directory and no override configured.
    #[error("Could not determine a data directory; set STOCKDESK_DRAFT_DIR")]
    NoDataDir,

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<toml::de::Error> for DraftError {
    fn from(err: toml::de::Error) -> Self {
        DraftError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for DraftError {
    fn from(err: toml::ser::Error) -> Self {
        DraftError::ConfigSaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DraftError::LimitReached { max: 50 }.to_string(),
            "Draft limit reached (50). Discard an old draft first."
        );
        assert_eq!(
            DraftError::NotFound("abc".into()).to_string(),
            "Draft not found: abc"
        );
    }

    #[test]
    fn test_toml_error_converts() {
        let err: DraftError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, DraftError::ConfigLoadFailed(_)));
    }
}
