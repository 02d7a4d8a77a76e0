#![no_main]

use libfuzzer_sys::fuzz_target;
use miller::core::codec::{decode, encode};

fuzz_target!(|data: &[u8]| {
    // Encoding is total and decoding inverts it
    let encoded = encode(data);
    assert_eq!(decode(&encoded).ok().as_deref(), Some(data));

    // Decoding is canonical: whatever decodes must re-encode identically
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(bytes) = decode(text) {
            assert_eq!(encode(&bytes), text);
        }
    }
});
