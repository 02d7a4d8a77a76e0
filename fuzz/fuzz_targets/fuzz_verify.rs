#![no_main]

use libfuzzer_sys::fuzz_target;
use miller::{Bincode, Signer, Token, TokenError};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Arbitrary text must be rejected, never accepted and never panic
    let signer = Signer::new("fuzz", b"fuzz secret".to_vec());
    match signer.verify::<serde_json::Value>(text) {
        Err(TokenError::InvalidToken) | Err(TokenError::Signature) => {}
        other => panic!("unexpected verify result: {other:?}"),
    }

    // Anything that parses must render back to the same text
    if let Ok(token) = Token::parse(text) {
        assert_eq!(token.to_string(), text);
    }

    // Signing arbitrary bytes always verifies
    let binary = Signer::new("fuzz", b"fuzz secret".to_vec()).with_serializer(Bincode);
    if let Ok(token) = binary.sign(data) {
        let recovered: Vec<u8> = binary.verify(&token).unwrap_or_default();
        assert_eq!(recovered, data);
    }
});
