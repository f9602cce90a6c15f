use super::{scenario_credential, scenario_descriptor, scenario_signer, scenario_time};
use chrono::TimeDelta;
use pretty_assertions::assert_eq;
use s3put_aws_v4::{CanonicalHeaders, Credential, RequestSigner};
use s3put_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use s3put_core::ErrorKind;
use std::collections::HashSet;

#[test]
fn test_sign_is_deterministic() {
    let signer = scenario_signer();
    let desc = scenario_descriptor(b"hello");

    let first = signer
        .sign_at(&desc, &scenario_credential(), scenario_time())
        .unwrap();
    for _ in 0..16 {
        let again = signer
            .sign_at(&desc, &scenario_credential(), scenario_time())
            .unwrap();
        assert_eq!(first.authorization, again.authorization);
        assert_eq!(first.amz_date, again.amz_date);
        assert_eq!(first.payload_hash_hex, again.payload_hash_hex);
    }
}

#[test]
fn test_signature_changes_with_time() {
    let signer = scenario_signer();
    let desc = scenario_descriptor(b"hello");

    let now = signer
        .sign_at(&desc, &scenario_credential(), scenario_time())
        .unwrap();
    let later = signer
        .sign_at(
            &desc,
            &scenario_credential(),
            scenario_time() + TimeDelta::try_seconds(1).expect("in bounds"),
        )
        .unwrap();

    assert_ne!(now.authorization, later.authorization);
    assert_eq!(later.amz_date, "20240115T103001Z");
}

#[test]
fn test_canonical_headers_ignore_supply_order() {
    let host = ("host", "my-bucket.s3.us-east-1.amazonaws.com");
    let sha = ("x-amz-content-sha256", hex_sha256(b"hello"));
    let date = ("x-amz-date", "20240115T103000Z".to_string());

    let natural: CanonicalHeaders = vec![
        (host.0, host.1.to_string()),
        (sha.0, sha.1.clone()),
        (date.0, date.1.clone()),
    ]
    .into_iter()
    .collect();
    let reversed: CanonicalHeaders = vec![
        (date.0, date.1.clone()),
        (sha.0, sha.1.clone()),
        (host.0, host.1.to_string()),
    ]
    .into_iter()
    .collect();
    let shouting: CanonicalHeaders = vec![
        ("X-Amz-Date", date.1.clone()),
        ("Host", host.1.to_string()),
        ("X-AMZ-CONTENT-SHA256", sha.1.clone()),
    ]
    .into_iter()
    .collect();

    assert_eq!(natural, reversed);
    assert_eq!(natural, shouting);
    assert_eq!(natural.to_block(), reversed.to_block());
    assert_eq!(
        natural.signed_headers(),
        "host;x-amz-content-sha256;x-amz-date"
    );
}

#[test]
fn test_single_byte_tampering_is_detected() {
    let signer = scenario_signer();
    let original = b"The quick brown fox jumps over the lazy dog".to_vec();

    let mut seen = HashSet::new();
    let base = signer
        .sign_at(
            &scenario_descriptor(&original),
            &scenario_credential(),
            scenario_time(),
        )
        .unwrap();
    seen.insert(base.authorization.clone());

    for i in 0..original.len() {
        let mut tampered = original.clone();
        tampered[i] ^= 0x01;

        let req = signer
            .sign_at(
                &scenario_descriptor(&tampered),
                &scenario_credential(),
                scenario_time(),
            )
            .unwrap();
        assert_ne!(req.payload_hash_hex, base.payload_hash_hex);
        assert!(
            seen.insert(req.authorization),
            "byte {i} flipped must produce a new signature"
        );
    }
}

#[test]
fn test_hmac_hex_round_trip() {
    for (key, msg) in [
        (&b"AWS4secretEXAMPLE"[..], &b"20240115"[..]),
        (&b""[..], &b""[..]),
        (&b"k"[..], &b"aws4_request"[..]),
    ] {
        let raw = hmac_sha256(key, msg);
        let decoded = hex::decode(hex_hmac_sha256(key, msg)).unwrap();
        assert_eq!(decoded, raw.to_vec());
    }
}

#[test]
fn test_empty_credentials_are_rejected() {
    let signer = RequestSigner::new("s3", "us-east-1");

    let err = signer
        .sign_at(
            &scenario_descriptor(b"hello"),
            &Credential::default(),
            scenario_time(),
        )
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingCredentials);
    assert!(err.is_permanent());
}
