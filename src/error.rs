//! # Error Types
//!
//! Error handling for token signing and verification.
//!
//! Every fallible operation in the crate returns [`Result`], carrying a
//! [`TokenError`]. The variants map one-to-one onto the ways a token can fail:
//!
//! ## Error Categories
//! - **Malformed tokens**: missing separator or a segment that is not valid codec text
//! - **Signature failures**: a well-formed token whose tag does not match
//! - **Serializer errors**: passed through from the payload serializer
//! - **Configuration errors**: bad TOML, missing secrets, unreadable files
//! - **Entropy errors**: the operating system random source is unavailable
//!
//! Malformed input is reported as [`TokenError::InvalidToken`] no matter which
//! segment failed to decode, so a caller probing the format learns nothing
//! about where the problem was.
//!
//! ## Example Usage
//! ```rust
//! use miller::{Signer, TokenError};
//!
//! let signer = Signer::new("password-reset", b"secret".to_vec());
//! match signer.verify::<String>("not-a-token") {
//!     Err(TokenError::InvalidToken) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Static error messages used on hot error paths.
pub mod constants {
    /// Configuration errors
    pub const ERR_MISSING_SECRET: &str = "No secret configured";
    pub const ERR_EMPTY_TAG: &str = "Namespace tag cannot be empty";
    pub const ERR_INVALID_SECRET: &str = "Secret is not valid unpadded URL-safe base64";

    /// Entropy errors
    pub const ERR_RANDOM_SOURCE: &str = "Secure random source unavailable";
}

/// TokenError is the error type for all token operations
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid signature")]
    Signature,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Codec error: {0}")]
    Codec(#[from] base64::DecodeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Entropy error: {0}")]
    Entropy(String),
}

impl TokenError {
    /// Whether this error came from the token itself rather than from the
    /// serializer or the environment.
    ///
    /// Both malformed and forged tokens count as rejected.
    pub fn is_rejection(&self) -> bool {
        matches!(self, TokenError::InvalidToken | TokenError::Signature)
    }
}

/// Type alias for Results using TokenError
pub type Result<T> = std::result::Result<T, TokenError>;
