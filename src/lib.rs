//! # Miller
//!
//! Tamper-evident tokens for handing opaque values to clients.
//!
//! A token is an application value serialized into bytes, authenticated with a
//! keyed MAC and rendered as compact URL-safe text:
//!
//! ```text
//! ImZvbyI.wrKlSLuPCCrPr-8YMFxEPEKGx8pQ_uW2_n_lyfpkQy8
//! └─────┘ └─────────────────────────────────────────┘
//! payload                  tag
//! ```
//!
//! The client can read the payload but cannot change it, or mint a new
//! token, without the server's secret. Nothing is stored server-side.
//!
//! ## Namespaces
//! Every [`Signer`] is bound to a namespace tag. The signing key is derived
//! from the long-term secret and the tag, so one secret can back many
//! unrelated token uses ("password-reset", "email-verify", ...) and a token
//! from one is rejected by all the others.
//!
//! ## Non-goals
//! Payloads are not encrypted, and tokens do not expire. Put an expiry in the
//! payload if you need one.
//!
//! ## Example
//! ```rust
//! use miller::{generate_key, Signer, TokenError};
//!
//! let secret = generate_key();
//! let resets = Signer::new("password-reset", secret.clone());
//! let token = resets.sign(&42u64)?;
//!
//! let user_id: u64 = resets.verify(&token)?;
//! assert_eq!(user_id, 42);
//!
//! let verifies = Signer::new("email-verify", secret);
//! assert!(matches!(verifies.verify::<u64>(&token), Err(TokenError::Signature)));
//! # Ok::<(), TokenError>(())
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod error;
pub mod signer;
pub mod token;
pub mod utils;

pub use crate::config::{LoggingConfig, MillerConfig, SignerConfig, SignerOverrides};
pub use crate::core::key::{generate_key, try_generate_key, DerivedKey, SecretKey, KEY_SIZE};
pub use crate::core::mac::TAG_SIZE;
pub use crate::core::serialization::{
    Bincode, Json, MessagePack, SerializationFormat, Serializer,
};
pub use crate::error::{Result, TokenError};
pub use crate::signer::{Signer, DEFAULT_TAG};
pub use crate::token::{Token, SEPARATOR};
