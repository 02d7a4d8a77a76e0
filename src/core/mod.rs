//! # Core Token Primitives
//!
//! The building blocks the [`Signer`](crate::Signer) composes into a token.
//!
//! ## Components
//! - **Codec**: padding-free URL-safe base64 for both token segments
//! - **MAC**: HMAC-SHA-512/256 with constant-time tag comparison
//! - **Key**: long-term secrets, per-namespace key derivation, key generation
//! - **Serialization**: the pluggable payload serializer and its built-in formats
//!
//! ## Wire Format
//! ```text
//! base64url(payload) "." base64url(HMAC(derive(secret, tag), payload))
//! ```
//!
//! ## Security
//! - Derived keys and secrets are zeroed when dropped
//! - Tag comparison never branches on secret data
//! - The codec rejects padding, foreign characters and non-canonical trailing bits

pub mod codec;
pub mod key;
pub mod mac;
pub mod serialization;
