//! Error types shared by the API client and the command handlers.

use thiserror::Error;

/// Result alias for parser operations
pub type Result<T> = std::result::Result<T, ParserError>;

#[derive(Debug, Error)]
pub enum ParserError {
    /// A required setting is absent
    #[error("\"{setting}\" setting is not configured")]
    ConfigurationMissing { setting: &'static str },

    /// The user dismissed a prompt
    #[error("cancelled")]
    Cancelled,

    #[error("No \".{extension}\" files found in workspace.")]
    NoMatchingFiles { extension: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed: {status}: {message}")]
    Api { status: u16, message: String },

    /// A successful response is missing a field the operation needs
    #[error("{0}")]
    MalformedResponse(String),

    /// A supplied answer failed its prompt's validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to decode {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParserError {
    /// Errors that abort without any message to the user
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Errors whose message should come with a shortcut to the settings
    pub fn wants_settings(&self) -> bool {
        matches!(self, Self::ConfigurationMissing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matching_files_message() {
        let err = ParserError::NoMatchingFiles {
            extension: "conf".to_string(),
        };
        assert_eq!(err.to_string(), "No \".conf\" files found in workspace.");
    }

    #[test]
    fn test_classification() {
        assert!(ParserError::Cancelled.is_silent());
        assert!(!ParserError::MalformedResponse("x".into()).is_silent());
        assert!(ParserError::ConfigurationMissing { setting: "author" }.wants_settings());
        assert!(!ParserError::Cancelled.wants_settings());
    }
}
