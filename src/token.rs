//! The two-segment token text form.
//!
//! ```text
//! <base64url(payload)>.<base64url(tag)>
//! ```
//!
//! [`Token::parse`] only checks structure. A parsed token has not been
//! authenticated; use [`Signer::verify`](crate::Signer::verify) for that.

use crate::core::codec;
use crate::error::{Result, TokenError};
use std::fmt;
use std::str::FromStr;

/// Separator between the payload and tag segments.
pub const SEPARATOR: char = '.';

/// A structurally valid, unauthenticated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    payload: Vec<u8>,
    tag: Vec<u8>,
}

impl Token {
    pub fn new(payload: Vec<u8>, tag: Vec<u8>) -> Self {
        Self { payload, tag }
    }

    /// Split `text` on the separator and decode both segments.
    ///
    /// Any structural problem yields [`TokenError::InvalidToken`], whichever
    /// segment caused it.
    pub fn parse(text: &str) -> Result<Self> {
        let (payload, tag) = text
            .split_once(SEPARATOR)
            .ok_or(TokenError::InvalidToken)?;

        // a second separator lands in the tag segment and fails to decode
        let payload = codec::decode(payload).map_err(|_| TokenError::InvalidToken)?;
        let tag = codec::decode(tag).map_err(|_| TokenError::InvalidToken)?;

        Ok(Self { payload, tag })
    }

    /// Decoded payload bytes. Not authenticated.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Decoded tag bytes as supplied by the token holder.
    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.payload, self.tag)
    }

    /// Length of the text form.
    pub fn encoded_len(&self) -> usize {
        codec::encoded_len(self.payload.len()) + 1 + codec::encoded_len(self.tag.len())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}",
            codec::encode(&self.payload),
            codec::encode(&self.tag)
        )
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_segments() {
        let token = Token::parse("Zm9v.YmFy").unwrap();
        assert_eq!(token.payload(), b"foo");
        assert_eq!(token.tag(), b"bar");
    }

    #[test]
    fn test_display_renders_parsed_text() {
        let text = "ImZvbyI.wrKlSLuPCCrPr-8YMFxEPEKGx8pQ_uW2_n_lyfpkQy8";
        let token: Token = text.parse().unwrap();
        assert_eq!(token.to_string(), text);
        assert_eq!(token.encoded_len(), text.len());
    }

    #[test]
    fn test_missing_separator() {
        assert!(matches!(
            Token::parse("no-separator-here"),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_bad_segments_are_indistinguishable() {
        for text in ["bad!chars.more!chars", "Zm9v.bad!", "bad!.Zm9v", "Zm9v.Zm9v.Zm9v"] {
            assert!(
                matches!(Token::parse(text), Err(TokenError::InvalidToken)),
                "{text}"
            );
        }
    }

    #[test]
    fn test_empty_segments_are_structurally_valid() {
        let token = Token::parse(".").unwrap();
        assert!(token.payload().is_empty());
        assert!(token.tag().is_empty());
    }

    #[test]
    fn test_into_parts() {
        let (payload, tag) = Token::new(b"p".to_vec(), b"t".to_vec()).into_parts();
        assert_eq!(payload, b"p");
        assert_eq!(tag, b"t");
    }
}
