//! Host error type.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the host and its adapters.
pub type HostResult<T> = Result<T, HostError>;

/// Error type for failed host operations.
///
/// Every failure surfaces to the immediate caller. Nothing is retried, since
/// a test that asks for a file the fixtures do not provide should fail loudly.
///
/// # Example
///
/// ```ignore
/// match host.read_file("/app/missing.ts") {
///     Ok(text) => { /* found in some layer */ }
///     Err(HostError::FileNotFound { path }) => eprintln!("no layer has {path}"),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum HostError {
    /// No resolution layer produced content for a read.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The requested path.
        path: String,
    },

    /// A resource load found nothing at the requested path.
    #[error("resource {path} not found")]
    ResourceNotFound {
        /// The requested resource path.
        path: String,
    },

    /// A relative module name was resolved without a containing file.
    #[error("resolution of relative module `{module}` requires a containing file")]
    RelativeWithoutContainingFile {
        /// The relative module name.
        module: String,
    },

    /// A metadata sibling is not valid JSON.
    #[error(transparent)]
    Metadata(#[from] serde_json::Error),

    /// Reading from the real filesystem failed for a reason other than absence.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The on-disk path.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A JSON fixture contained a value that is neither a string nor an object.
    #[error("invalid fixture at `{path}`: expected string or object, found {found}")]
    InvalidFixture {
        /// Slash-joined location of the bad value inside the fixture.
        path: String,
        /// The JSON type that was found.
        found: &'static str,
    },
}

impl HostError {
    /// Create a file-not-found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Check if this error means the path resolved to nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. } | Self::ResourceNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = HostError::not_found("/app/a.ts");
        assert_eq!(err.to_string(), "file not found: /app/a.ts");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_metadata_error_is_transparent() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let expected = parse_err.to_string();
        let err = HostError::from(parse_err);
        assert_eq!(err.to_string(), expected);
        assert!(!err.is_not_found());
    }
}
