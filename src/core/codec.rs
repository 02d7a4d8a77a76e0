//! Canonical text encoding for token segments.
//!
//! Tokens travel in URLs, cookies and headers, so both segments use the
//! URL-safe base64 alphabet (`-` and `_` instead of `+` and `/`) with the
//! trailing `=` padding stripped.
//!
//! Decoding is strict: padding characters, characters outside the alphabet,
//! impossible lengths (one leftover symbol) and non-zero trailing bits are all
//! rejected. Every byte sequence therefore has exactly one accepted encoding.

use crate::error::Result;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Encode bytes as unpadded URL-safe base64.
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded URL-safe base64.
///
/// Fails with [`TokenError::Codec`](crate::TokenError::Codec) on malformed input.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    Ok(URL_SAFE_NO_PAD.decode(text)?)
}

/// Length of the encoded form of `len` bytes.
pub fn encoded_len(len: usize) -> usize {
    (len * 4).div_ceil(3)
}
