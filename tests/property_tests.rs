//! Property-based tests using proptest
//!
//! These tests check the token invariants across a wide range of randomly
//! generated payloads, secrets and tags.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use miller::core::codec;
use miller::{Bincode, SerializationFormat, Signer, Token, TokenError};
use proptest::prelude::*;

fn format() -> impl Strategy<Value = SerializationFormat> {
    prop_oneof![
        Just(SerializationFormat::Json),
        Just(SerializationFormat::Bincode),
        Just(SerializationFormat::MessagePack),
    ]
}

// Property: codec decoding inverts encoding
proptest! {
    #[test]
    fn prop_codec_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..2048)) {
        let encoded = codec::encode(&bytes);
        prop_assert!(!encoded.contains('='));
        prop_assert_eq!(codec::decode(&encoded).expect("decode"), bytes);
    }
}

// Property: the codec never accepts characters outside its alphabet
proptest! {
    #[test]
    fn prop_codec_rejects_foreign_characters(
        bytes in prop::collection::vec(any::<u8>(), 1..256),
        foreign in "[^A-Za-z0-9_-]",
        at in any::<prop::sample::Index>(),
    ) {
        let mut encoded = codec::encode(&bytes);
        let i = at.index(encoded.len() + 1);
        encoded.insert_str(i, &foreign);
        prop_assert!(codec::decode(&encoded).is_err());
    }
}

// Property: any value survives sign then verify in every format
proptest! {
    #[test]
    fn prop_sign_verify_roundtrip(
        value in (any::<u64>(), ".*", prop::collection::vec(any::<i32>(), 0..32)),
        secret in prop::collection::vec(any::<u8>(), 0..64),
        tag in ".{0,32}",
        format in format(),
    ) {
        let signer = Signer::new(tag, secret).with_serializer(format);
        let token = signer.sign(&value).expect("sign");
        let recovered: (u64, String, Vec<i32>) = signer.verify(&token).expect("verify");
        prop_assert_eq!(recovered, value);
    }
}

// Property: signing is deterministic
proptest! {
    #[test]
    fn prop_sign_deterministic(payload in prop::collection::vec(any::<u8>(), 0..512)) {
        let signer = Signer::new("determinism", b"secret".to_vec()).with_serializer(Bincode);
        prop_assert_eq!(signer.sign(&payload).expect("sign"), signer.sign(&payload).expect("sign"));
    }
}

// Property: distinct tags never accept each other's tokens
proptest! {
    #[test]
    fn prop_namespace_isolation(
        tag_a in "[a-z-]{1,16}",
        tag_b in "[a-z-]{1,16}",
        payload in ".*",
    ) {
        prop_assume!(tag_a != tag_b);
        let a = Signer::new(tag_a, b"shared".to_vec());
        let b = Signer::new(tag_b, b"shared".to_vec());
        let token = a.sign(&payload).expect("sign");
        prop_assert!(matches!(b.verify::<String>(&token), Err(TokenError::Signature)));
    }
}

// Property: flipping any bit of the decoded payload or tag is detected
proptest! {
    #[test]
    fn prop_bit_flip_detected(
        payload in prop::collection::vec(any::<u8>(), 0..128),
        bit in any::<prop::sample::Index>(),
        in_tag in any::<bool>(),
    ) {
        let signer = Signer::new("flip", b"secret".to_vec()).with_serializer(Bincode);
        let token = Token::parse(&signer.sign(&payload).expect("sign")).expect("parse");
        let (mut body, mut tag) = token.into_parts();

        let target = if in_tag || body.is_empty() { &mut tag } else { &mut body };
        let i = bit.index(target.len() * 8);
        target[i / 8] ^= 1 << (i % 8);

        let forged = Token::new(body, tag).to_string();
        prop_assert!(matches!(
            signer.verify::<Vec<u8>>(&forged),
            Err(TokenError::Signature)
        ));
    }
}

// Property: arbitrary text never verifies and never panics
proptest! {
    #[test]
    fn prop_arbitrary_text_rejected(text in ".*") {
        let signer = Signer::new("fuzz", b"secret".to_vec());
        let result = signer.verify::<serde_json::Value>(&text);
        prop_assert!(matches!(result, Err(TokenError::InvalidToken) | Err(TokenError::Signature)));
    }
}
