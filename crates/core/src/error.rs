//! Error types for Lexiscore operations.
//!
//! The analysis pipeline itself is total: [`analyze`](crate::analyze) and the
//! components behind it never fail, and degenerate input simply produces zeroed
//! statistics and "problem" findings. [`LexiscoreError`] covers the edges around
//! that pipeline: fetching content, reading files, loading an analysis request
//! and serializing results.
//!
//! # Example
//!
//! ```rust
//! use lexiscore_core::{AnalysisRequest, LexiscoreError};
//!
//! match AnalysisRequest::from_json("{ not json") {
//!     Ok(request) => println!("keywords: {:?}", request.keywords),
//!     Err(LexiscoreError::InvalidRequest(reason)) => println!("bad request: {}", reason),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for everything outside the pure analysis path.
#[derive(Error, Debug)]
pub enum LexiscoreError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid CSS selector handed to the markup wrapper.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Wraps standard I/O errors for file and stdin operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An analysis request document could not be decoded.
    #[error("Invalid analysis request: {0}")]
    InvalidRequest(String),

    /// Analysis results could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Result type alias for LexiscoreError.
pub type Result<T> = std::result::Result<T, LexiscoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LexiscoreError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_invalid_request_error() {
        let err = LexiscoreError::InvalidRequest("missing field `meta`".to_string());
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_timeout_error() {
        let err = LexiscoreError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_file_not_found_error() {
        let err = LexiscoreError::FileNotFound(PathBuf::from("/tmp/missing.html"));
        assert!(err.to_string().contains("missing.html"));
    }
}
