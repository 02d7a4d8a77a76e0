//! Keyed message authentication.
//!
//! Tags are HMAC over SHA-512/256: the SHA-512 compression function truncated
//! to a 256-bit output, which is also faster than SHA-256 on 64-bit hardware.

use hmac::{Hmac, Mac};
use sha2::Sha512_256;
use subtle::ConstantTimeEq;

type HmacSha512_256 = Hmac<Sha512_256>;

/// Size in bytes of every authentication tag.
pub const TAG_SIZE: usize = 32;

/// A fixed-length authentication tag.
pub type Tag = [u8; TAG_SIZE];

/// Compute the authentication tag of `message` under `key`.
pub fn mac(key: &[u8], message: &[u8]) -> Tag {
    // HMAC hashes oversized keys and pads short ones, so any length is valid
    let mut mac = match HmacSha512_256::new_from_slice(key) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC accepts keys of any length"),
    };
    mac.update(message);
    mac.finalize().into_bytes().into()
}

/// Compare two tags without branching on their contents.
///
/// Slices of different lengths compare unequal; the length itself is public.
pub fn tags_equal(expected: &[u8], actual: &[u8]) -> bool {
    expected.ct_eq(actual).into()
}

/// Recompute the tag of `message` and compare it against `tag` in constant time.
pub fn verify(key: &[u8], message: &[u8], tag: &[u8]) -> bool {
    tags_equal(&mac(key, message), tag)
}
