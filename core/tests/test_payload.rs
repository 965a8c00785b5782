// Payload codec: plaintext framing and the encrypted envelope, without pixels.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use celfie_core::{
        constants::{DELIMITER, DELIMITER_LEN, HEADER_LEN, MAX_PLAINTEXT_LEN},
        crypto::TAG_LEN,
        headers::{decode_header_be, EnvelopeVersion},
        payload::{build_envelope, build_envelope_with_salt, envelope_len, parse_envelope, HiddenMessage},
        EngineConfig, StegoError,
    };

    const SEED: [u8; 32] = [0x42; 32];
    const SALT: [u8; 16] = [0x17; 16];

    fn split(bytes: &[u8]) -> (&[u8], &[u8]) {
        bytes.split_at(HEADER_LEN)
    }

    // ------------------------------------------------------------
    // Plaintext framing
    // ------------------------------------------------------------

    #[test]
    fn framing_layout() {
        let framed = HiddenMessage::new("hi", Some("x")).frame().unwrap();
        assert_eq!(framed, vec![0, 0, 0, 2, b'h', b'i', 0, 0, 0, 1, b'x']);

        let no_link = HiddenMessage::new("hi", None).frame().unwrap();
        assert_eq!(no_link, vec![0, 0, 0, 2, b'h', b'i', 0, 0, 0, 0]);
    }

    #[test]
    fn empty_link_is_no_link() {
        assert_eq!(HiddenMessage::new("m", Some("")), HiddenMessage::new("m", None));
    }

    #[test]
    fn separator_inside_message_survives_framing() {
        let m = HiddenMessage::new("a\nLINK:b", None);
        let back = HiddenMessage::unframe(&m.frame().unwrap()).unwrap();
        assert_eq!(back, m);
        assert_eq!(back.link, None);
        assert_eq!(back.to_joined(), "a\nLINK:b");
    }

    #[test]
    fn joined_form() {
        let m = HiddenMessage::new("hello", Some("https://x.test"));
        assert_eq!(m.to_joined(), "hello\nLINK:https://x.test");
        assert_eq!(m.to_string(), m.to_joined());
        assert_eq!(HiddenMessage::split_joined(&m.to_joined()), m);
        assert_eq!(HiddenMessage::split_joined("plain"), HiddenMessage::new("plain", None));
    }

    #[test]
    fn malformed_frames_are_corrupt() {
        for bad in [
            vec![],
            vec![0, 0, 0],
            vec![0, 0, 0, 5, b'a'],
            vec![0, 0, 0, 1, b'a', 0, 0, 0, 0, 0xAA],
            vec![0, 0, 0, 1, 0xFF, 0, 0, 0, 0],
        ] {
            assert!(
                matches!(HiddenMessage::unframe(&bad), Err(StegoError::CorruptPayload(_))),
                "{:?} should be corrupt",
                bad
            );
        }
    }

    proptest! {
        #[test]
        fn framing_roundtrip(message in ".*", link in proptest::option::of(".+")) {
            let m = HiddenMessage::new(&message, link.as_deref());
            let back = HiddenMessage::unframe(&m.frame().unwrap()).unwrap();
            prop_assert_eq!(back, m);
        }
    }

    // ------------------------------------------------------------
    // Envelope
    // ------------------------------------------------------------

    #[test]
    fn envelope_layout_and_roundtrip() {
        let cfg = EngineConfig::default();
        let env = build_envelope_with_salt("hello", Some("https://x.test"), &SEED, SALT, &cfg).unwrap();
        let bytes = env.to_bytes().unwrap();

        assert_eq!(bytes.len(), env.encoded_len());
        assert_eq!(bytes.len(), envelope_len("hello", Some("https://x.test"), &cfg).unwrap());
        assert_eq!(&bytes[bytes.len() - DELIMITER_LEN..], &DELIMITER);
        assert_eq!(env.ciphertext.len(), env.sizes.compressed_len + TAG_LEN);

        let header = decode_header_be(&bytes).unwrap();
        assert_eq!(header.salt, SALT);
        assert_eq!(header.data_length as usize, env.ciphertext.len());

        let (h, body) = split(&bytes);
        let back = parse_envelope(h, body, &SEED).unwrap();
        assert_eq!(back.to_joined(), "hello\nLINK:https://x.test");
    }

    #[test]
    fn to_bytes_rejects_inconsistent_length() {
        let mut env = build_envelope_with_salt("x", None, &SEED, SALT, &EngineConfig::default()).unwrap();
        env.ciphertext.push(0);
        assert!(matches!(env.to_bytes(), Err(StegoError::InvalidInput(_))));
    }

    #[test]
    fn fixed_salt_is_deterministic() {
        let cfg = EngineConfig::default();
        let a = build_envelope_with_salt("same", None, &SEED, SALT, &cfg).unwrap();
        let b = build_envelope_with_salt("same", None, &SEED, SALT, &cfg).unwrap();
        assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
    }

    #[test]
    fn random_salts_differ() {
        let cfg = EngineConfig::default();
        let a = build_envelope("same", None, &SEED, &cfg).unwrap();
        let b = build_envelope("same", None, &SEED, &cfg).unwrap();
        assert_ne!(a.header.salt, b.header.salt);
        assert_ne!(a.header.key_material, b.header.key_material);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn aes_gcm_version_roundtrip() {
        let cfg = EngineConfig::default().with_version(EnvelopeVersion::V2Aes256Gcm);
        let env = build_envelope_with_salt("aes", None, &SEED, SALT, &cfg).unwrap();
        assert_eq!(env.header.version, 2);
        let bytes = env.to_bytes().unwrap();
        let (h, body) = split(&bytes);
        assert_eq!(parse_envelope(h, body, &SEED).unwrap(), HiddenMessage::new("aes", None));
    }

    #[test]
    fn wrong_seed_is_tampered_or_wrong_key() {
        let env = build_envelope_with_salt("secret", None, &SEED, SALT, &EngineConfig::default()).unwrap();
        let bytes = env.to_bytes().unwrap();
        let (h, body) = split(&bytes);
        let err = parse_envelope(h, body, &[0x43; 32]).unwrap_err();
        assert!(matches!(err, StegoError::TamperedOrWrongKey));
    }

    #[test]
    fn flipped_ciphertext_bit_fails_authentication() {
        let env = build_envelope_with_salt("secret", None, &SEED, SALT, &EngineConfig::default()).unwrap();
        let mut bytes = env.to_bytes().unwrap();
        bytes[HEADER_LEN + 2] ^= 0x01;
        let (h, body) = split(&bytes);
        assert!(matches!(parse_envelope(h, body, &SEED), Err(StegoError::TamperedOrWrongKey)));
    }

    #[test]
    fn header_is_authenticated() {
        // Swap the version: the fingerprint still matches, the AEAD and AAD do not.
        let env = build_envelope_with_salt("secret", None, &SEED, SALT, &EngineConfig::default()).unwrap();
        let mut bytes = env.to_bytes().unwrap();
        bytes[9] = 2;
        let (h, body) = split(&bytes);
        assert!(matches!(parse_envelope(h, body, &SEED), Err(StegoError::TamperedOrWrongKey)));
    }

    #[test]
    fn unknown_version_is_unsupported() {
        let env = build_envelope_with_salt("secret", None, &SEED, SALT, &EngineConfig::default()).unwrap();
        let mut bytes = env.to_bytes().unwrap();
        bytes[9] = 7;
        let (h, body) = split(&bytes);
        assert!(matches!(
            parse_envelope(h, body, &SEED),
            Err(StegoError::UnsupportedVersion { version: 7 })
        ));
    }

    #[test]
    fn broken_delimiter_is_corrupt() {
        let env = build_envelope_with_salt("secret", None, &SEED, SALT, &EngineConfig::default()).unwrap();
        let mut bytes = env.to_bytes().unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let (h, body) = split(&bytes);
        assert!(matches!(parse_envelope(h, body, &SEED), Err(StegoError::CorruptPayload(_))));
    }

    #[test]
    fn body_length_mismatch_is_corrupt() {
        let env = build_envelope_with_salt("secret", None, &SEED, SALT, &EngineConfig::default()).unwrap();
        let bytes = env.to_bytes().unwrap();
        let (h, body) = split(&bytes);
        let err = parse_envelope(h, &body[..body.len() - 1], &SEED).unwrap_err();
        assert!(matches!(err, StegoError::CorruptPayload(_)));
    }

    #[test]
    fn oversized_payload_rejected_on_build() {
        let cfg = EngineConfig::default().with_max_data_len(TAG_LEN as u64);
        let err = build_envelope_with_salt("too long for the limit", None, &SEED, SALT, &cfg).unwrap_err();
        assert!(matches!(err, StegoError::InvalidInput(_)));
    }

    #[test]
    fn plaintext_over_decode_limit_rejected_on_build() {
        // Framing adds two 4-byte length prefixes.
        let message = "a".repeat(MAX_PLAINTEXT_LEN - 8 + 1);
        let cfg = EngineConfig::default();

        let err = build_envelope_with_salt(&message, None, &SEED, SALT, &cfg).unwrap_err();
        assert!(matches!(err, StegoError::InvalidInput(_)));
        let err = envelope_len(&message, None, &cfg).unwrap_err();
        assert!(matches!(err, StegoError::InvalidInput(_)));
    }

    #[test]
    fn compression_level_changes_nothing_on_decode() {
        let text = "abcabcabcabcabcabcabcabcabcabcabcabcabcabcabc";
        let stored = EngineConfig::default().with_compression_level(0);
        let packed = EngineConfig::default();
        assert!(envelope_len(text, None, &stored).unwrap() > envelope_len(text, None, &packed).unwrap());

        let env = build_envelope_with_salt(text, None, &SEED, SALT, &stored).unwrap();
        let bytes = env.to_bytes().unwrap();
        let (h, body) = split(&bytes);
        assert_eq!(parse_envelope(h, body, &SEED).unwrap().message, text);
    }
}
