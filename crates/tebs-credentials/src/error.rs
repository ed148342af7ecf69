//! Error types for credential loading

use std::path::PathBuf;

/// Errors raised while loading credentials from a local env file
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Env file could not be read
    #[error("failed to read credential file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Required assignment missing from the env file
    #[error("missing credential key: {key}")]
    MissingKey { key: String },
}

impl CredentialError {
    /// Create missing-key error
    #[inline]
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_display_names_key() {
        let err = CredentialError::missing_key("FIREBASE_ADMIN_PRIVATE_KEY");
        assert_eq!(
            err.to_string(),
            "missing credential key: FIREBASE_ADMIN_PRIVATE_KEY"
        );
    }
}
