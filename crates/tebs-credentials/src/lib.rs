//! Credential loading for TEBS admin tooling
//!
//! Parses service-account fields out of a local `.env.local`-style text file
//! and assembles the [`yup_oauth2::ServiceAccountKey`] used to authorize
//! Firestore access. Only `KEY="value"` assignments are recognized; values
//! may carry literal `\n` sequences that are unescaped to real newlines
//! (the private key is stored that way).

pub mod env_file;
pub mod error;
pub mod service_account;

pub use env_file::{strip_wrapping_quotes, unescape_newlines, EnvFile};
pub use error::CredentialError;
pub use service_account::{
    service_account_from_env, KEY_CLIENT_EMAIL, KEY_PRIVATE_KEY, KEY_PROJECT_ID, TOKEN_URI,
};
