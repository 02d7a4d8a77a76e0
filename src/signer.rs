//! # Token Engine
//!
//! [`Signer`] issues and verifies tokens for one namespace.
//!
//! ## Signing
//! 1. Serialize the value into payload bytes
//! 2. Derive the namespace key from the secret and tag
//! 3. MAC the payload under the derived key
//! 4. Render `codec(payload) . codec(tag)`
//!
//! ## Verification
//! 1. Split on the separator and decode both segments (else `InvalidToken`)
//! 2. Recompute the tag over the decoded payload
//! 3. Compare in constant time (else `Signature`)
//! 4. Deserialize the payload (else `Deserialization`)
//!
//! Every call is a pure function of its input and the immutable
//! configuration, so a `Signer` can be shared across threads without locking.
//!
//! ## Example
//! ```rust
//! use miller::Signer;
//!
//! let signer = Signer::new("email-verify", b"an application secret".to_vec());
//! let token = signer.sign(&("ada@example.com", 7u32)).unwrap();
//! let (email, id): (String, u32) = signer.verify(&token).unwrap();
//! assert_eq!((email.as_str(), id), ("ada@example.com", 7));
//! ```

use crate::config::SignerConfig;
use crate::core::key::SecretKey;
use crate::core::serialization::{Json, SerializationFormat, Serializer};
use crate::error::{Result, TokenError};
use crate::token::Token;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{instrument, trace};

/// Default key derivation tag.
pub const DEFAULT_TAG: &str = "miller";

/// Signs and verifies tokens under one namespace tag and secret.
#[derive(Debug, Clone)]
pub struct Signer<S = Json> {
    tag: String,
    secret: SecretKey,
    serializer: S,
}

impl Signer<Json> {
    /// Create a signer that serializes payloads as JSON.
    pub fn new(tag: impl Into<String>, secret: impl Into<SecretKey>) -> Self {
        Self {
            tag: tag.into(),
            secret: secret.into(),
            serializer: Json,
        }
    }
}

impl Signer<SerializationFormat> {
    /// Build a signer from configuration, using the configured format.
    pub fn from_config(config: &SignerConfig) -> Result<Self> {
        let errors = config.validate_required();
        if !errors.is_empty() {
            return Err(TokenError::Config(errors.join("; ")));
        }

        let secret = config.secret_key()?;
        Ok(Signer::new(config.tag.clone(), secret).with_serializer(config.format))
    }
}

impl<S: Serializer> Signer<S> {
    /// Replace the payload serializer.
    pub fn with_serializer<S2: Serializer>(self, serializer: S2) -> Signer<S2> {
        Signer {
            tag: self.tag,
            secret: self.secret,
            serializer,
        }
    }

    /// Namespace tag this signer derives its key from.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Serialize and sign `value`.
    #[instrument(level = "trace", skip_all, fields(tag = %self.tag))]
    pub fn sign<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let payload = self.serializer.encode(value)?;
        let tag = self.secret.derive(&self.tag).sign(&payload);

        let token = Token::new(payload, tag.to_vec());
        trace!(payload_len = token.payload().len(), "token signed");
        Ok(token.to_string())
    }

    /// Verify `token` and deserialize its payload.
    #[instrument(level = "trace", skip_all, fields(tag = %self.tag))]
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T> {
        let token = Token::parse(token)?;
        self.verify_token(&token)
    }

    /// Verify `token` and store the payload in `out`.
    ///
    /// `out` is untouched unless verification and deserialization both succeed.
    pub fn verify_into<T: DeserializeOwned>(&self, token: &str, out: &mut T) -> Result<()> {
        *out = self.verify(token)?;
        Ok(())
    }

    /// Verify an already-parsed token and deserialize its payload.
    pub fn verify_token<T: DeserializeOwned>(&self, token: &Token) -> Result<T> {
        self.authenticate(token)?;
        self.serializer.decode(token.payload())
    }

    /// Check the token's tag without deserializing the payload.
    pub fn authenticate(&self, token: &Token) -> Result<()> {
        let key = self.secret.derive(&self.tag);
        if !key.verify(token.payload(), token.tag()) {
            return Err(TokenError::Signature);
        }
        trace!(payload_len = token.payload().len(), "token authenticated");
        Ok(())
    }
}
