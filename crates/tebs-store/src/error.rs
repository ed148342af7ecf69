//! Error types for document-store access
//!
//! The taxonomy mirrors how failures actually surface: credential rejection
//! at token exchange, transport failures during a call, and structured
//! rejections from the remote service.

/// Errors raised by a document store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Credential was rejected or token exchange failed
    #[error("authentication failed: {0}")]
    Auth(#[from] yup_oauth2::Error),

    /// Network failure during a remote call
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote service rejected the request
    #[error("request rejected ({status}): {message}")]
    Api { status: u16, message: String },

    /// Document does not exist
    #[error("document not found: {0}")]
    NotFound(String),

    /// Malformed collection or document path
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// Response payload could not be interpreted
    #[error("decode error: {0}")]
    Decode(String),

    /// Store configuration is unusable
    #[error("configuration error: {0}")]
    Config(&'static str),

    /// Authenticator could not be constructed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create invalid-path error
    #[inline]
    pub fn invalid_path(path: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason,
        }
    }

    /// Create decode error
    #[inline]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_path_display() {
        let err = StoreError::invalid_path("a/b", "collection paths have an odd number of segments");
        assert_eq!(
            err.to_string(),
            "invalid path 'a/b': collection paths have an odd number of segments"
        );
    }

    #[test]
    fn api_error_display() {
        let err = StoreError::Api {
            status: 403,
            message: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("permission denied"));
    }
}
