//! Secrets and per-namespace key derivation.
//!
//! One long-term [`SecretKey`] can back any number of token namespaces. Each
//! namespace gets its own [`DerivedKey`], computed on demand as
//! `MAC(key = secret, message = tag)` and never stored. Tokens signed under one
//! namespace tag are meaningless under any other.

use crate::core::codec;
use crate::core::mac::{self, Tag};
use crate::error::{constants, Result, TokenError};
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Byte size of generated secrets.
pub const KEY_SIZE: usize = 32;

/// Long-term signing secret, zeroed on drop.
#[derive(Clone)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse a secret from its codec (unpadded URL-safe base64) form.
    pub fn from_encoded(text: &str) -> Result<Self> {
        codec::decode(text.trim())
            .map(Self)
            .map_err(|_| TokenError::Config(constants::ERR_INVALID_SECRET.to_string()))
    }

    /// Encode the secret for storage in configuration.
    pub fn to_encoded(&self) -> String {
        codec::encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Derive the key for a namespace tag.
    pub fn derive(&self, tag: &str) -> DerivedKey {
        derive(&self.0, tag)
    }
}

impl From<Vec<u8>> for SecretKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for SecretKey {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for SecretKey {
    fn from(bytes: &[u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        // length is public, contents are compared without branching
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([REDACTED; {}])", self.0.len())
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Key scoped to a single namespace, zeroed on drop.
pub struct DerivedKey(Tag);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Authenticate `message` under this key.
    pub fn sign(&self, message: &[u8]) -> Tag {
        mac::mac(&self.0, message)
    }

    /// Check `tag` against `message` in constant time.
    pub fn verify(&self, message: &[u8], tag: &[u8]) -> bool {
        mac::verify(&self.0, message, tag)
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Derive the per-namespace key for `tag` from `secret`.
pub fn derive(secret: &[u8], tag: &str) -> DerivedKey {
    DerivedKey(mac::mac(secret, tag.as_bytes()))
}

/// Fill a fresh secret from the operating system random source.
///
/// A failing random source cannot be recovered from safely; callers that
/// receive [`TokenError::Entropy`] should abort rather than retry.
pub fn try_generate_key() -> Result<SecretKey> {
    let mut key = vec![0u8; KEY_SIZE];
    getrandom::fill(&mut key)
        .map_err(|e| TokenError::Entropy(format!("{}: {e}", constants::ERR_RANDOM_SOURCE)))?;
    Ok(SecretKey(key))
}

/// Generate a fresh 256-bit secret.
///
/// # Panics
///
/// Panics if the operating system random source is unavailable. There is no
/// safe fallback for missing entropy.
pub fn generate_key() -> SecretKey {
    match try_generate_key() {
        Ok(key) => key,
        Err(e) => panic!("{e}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_deterministic() {
        let a = derive(b"secret", "miller");
        let b = derive(b"secret", "miller");
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_derive_separates_namespaces() {
        let reset = derive(b"secret", "password-reset");
        let verify = derive(b"secret", "email-verify");
        assert_ne!(reset.as_bytes(), verify.as_bytes());
    }

    #[test]
    fn test_derive_depends_on_secret() {
        let a = derive(b"secret", "miller");
        let b = derive(b"secreT", "miller");
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_derive_matches_mac() {
        let key = SecretKey::from(b"secret");
        assert_eq!(key.derive("miller").as_bytes(), mac::mac(b"secret", b"miller"));
    }

    #[test]
    fn test_derived_key_sign_verify() {
        let key = derive(b"secret", "miller");
        let tag = key.sign(b"payload");
        assert!(key.verify(b"payload", &tag));
        assert!(!key.verify(b"payloae", &tag));
    }

    #[test]
    fn test_generate_key() {
        let a = generate_key();
        assert_eq!(a.len(), KEY_SIZE);
        for _ in 0..10 {
            let b = generate_key();
            assert_eq!(b.len(), KEY_SIZE);
            assert_ne!(a, b, "should not generate duplicate keys");
        }
    }

    #[test]
    fn test_encoded_roundtrip() {
        let key = generate_key();
        let text = key.to_encoded();
        assert_eq!(SecretKey::from_encoded(&text).unwrap(), key);
    }

    #[test]
    fn test_from_encoded_rejects_garbage() {
        assert!(matches!(
            SecretKey::from_encoded("not base64!"),
            Err(TokenError::Config(_))
        ));
    }

    #[test]
    fn test_secret_equality() {
        assert_eq!(SecretKey::from(b"secret"), SecretKey::from(b"secret"));
        assert_ne!(SecretKey::from(b"secret"), SecretKey::from(b"secreT"));
        assert_ne!(SecretKey::from(b"secret"), SecretKey::from(b"secret!"));
        assert_ne!(SecretKey::from(b""), SecretKey::from(b"\0"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = SecretKey::from(b"hunter2");
        let shown = format!("{key:?}");
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("REDACTED"));
        assert_eq!(format!("{:?}", key.derive("x")), "DerivedKey([REDACTED])");
    }
}
