use base64ct::{Base64Url, Encoding};
use time::{Duration, OffsetDateTime};
use crate::config::app_config::CookieSecret;
use crate::identity::UserId;
use crate::token::{SignedTokenCodec, TokenError};

fn codec() -> SignedTokenCodec {
    SignedTokenCodec::new(&CookieSecret::new("test secret"))
}

fn now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
}

fn decode(token: &str) -> String {
    String::from_utf8(Base64Url::decode_vec(token).unwrap()).unwrap()
}

fn encode(raw: &str) -> String {
    Base64Url::encode_string(raw.as_bytes())
}

#[test]
fn issued_token_validates() {
    let codec = codec();
    for id in [0, 1, 42, i64::MAX] {
        let token = codec.issue_at(UserId::new(id), now());
        assert_eq!(codec.validate_at(&token, now()), Ok(UserId::new(id)));
    }
}

#[test]
fn issue_and_validate_use_the_clock() {
    let codec = codec();
    let token = codec.issue(UserId::new(7));
    assert_eq!(codec.validate(&token), Ok(UserId::new(7)));
}

#[test]
fn token_layout() {
    let token = codec().issue_at(UserId::new(42), now());
    let raw = decode(&token);
    let fields: Vec<&str> = raw.split('.').collect();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0], "42");
    assert_eq!(
        fields[1],
        (now() + Duration::days(7)).unix_timestamp().to_string(),
    );
    assert!(!fields[2].is_empty());
}

#[test]
fn token_is_cookie_safe() {
    let token = codec().issue_at(UserId::new(123456), now());
    assert!(
        token.chars().all(|c| c.is_ascii_alphanumeric() || "-_=".contains(c)),
        "{token}",
    );
}

#[test]
fn valid_until_expiration_inclusive() {
    let codec = codec();
    let token = codec.issue_at(UserId::new(1), now());
    let expires_at = now() + Duration::days(7);
    assert_eq!(codec.validate_at(&token, expires_at), Ok(UserId::new(1)));
    assert_eq!(
        codec.validate_at(&token, expires_at + Duration::seconds(1)),
        Err(TokenError::Expired),
    );
}

#[test]
fn old_token_expired() {
    let codec = codec();
    let token = codec.issue_at(UserId::new(1), now() - Duration::days(8));
    assert_eq!(codec.validate_at(&token, now()), Err(TokenError::Expired));
}

#[test]
fn tampered_identity_rejected() {
    let codec = codec();
    let raw = decode(&codec.issue_at(UserId::new(1), now()));
    let forged = encode(&raw.replacen('1', "2", 1));
    assert_eq!(
        codec.validate_at(&forged, now()),
        Err(TokenError::InvalidSignature),
    );
}

#[test]
fn any_payload_change_rejected() {
    let codec = codec();
    let raw = decode(&codec.issue_at(UserId::new(31337), now()));
    let payload_len = raw.rfind('.').unwrap();
    for i in 0..payload_len {
        let original = raw.as_bytes()[i];
        if !original.is_ascii_digit() {
            continue;
        }
        let replacement = if original == b'9' { '0' } else { (original + 1) as char };
        let mut forged = raw.clone();
        forged.replace_range(i..i + 1, &replacement.to_string());
        assert_eq!(
            codec.validate_at(&encode(&forged), now()),
            Err(TokenError::InvalidSignature),
            "position {i} of {raw}",
        );
    }
}

#[test]
fn extended_expiration_rejected() {
    let codec = codec();
    let token = codec.issue_at(UserId::new(1), now() - Duration::days(30));
    let raw = decode(&token);
    let (payload, signature) = raw.rsplit_once('.').unwrap();
    let (user, _) = payload.split_once('.').unwrap();
    let far_future = (now() + Duration::days(365)).unix_timestamp();
    let forged = encode(&format!("{user}.{far_future}.{signature}"));
    assert_eq!(
        codec.validate_at(&forged, now()),
        Err(TokenError::InvalidSignature),
    );
}

#[test]
fn other_secret_rejected() {
    let token = codec().issue_at(UserId::new(1), now());
    let other = SignedTokenCodec::new(&CookieSecret::new("another secret"));
    assert_eq!(
        other.validate_at(&token, now()),
        Err(TokenError::InvalidSignature),
    );
}

#[test]
fn garbage_signature_rejected() {
    let codec = codec();
    let expires_at = (now() + Duration::days(1)).unix_timestamp();
    for signature in ["", "!!!", "c2lnbmF0dXJl"] {
        let forged = encode(&format!("1.{expires_at}.{signature}"));
        assert_eq!(
            codec.validate_at(&forged, now()),
            Err(TokenError::InvalidSignature),
            "{signature:?}",
        );
    }
}

#[test]
fn malformed_tokens_rejected() {
    let codec = codec();
    let cases = [
        String::new(),
        "not base64 at all!".to_owned(),
        encode("1.2"),
        encode("1.2.3.4"),
        encode("no separators"),
        Base64Url::encode_string(&[0xff, 0xfe, b'.', b'1', b'.', b'x']),
    ];
    for token in cases {
        assert_eq!(
            codec.validate_at(&token, now()),
            Err(TokenError::MalformedToken),
            "{token:?}",
        );
    }
}

#[test]
fn signed_but_unparseable_fields_rejected() {
    let codec = codec();
    let expires_at = (now() + Duration::days(1)).unix_timestamp();

    let payload = "1.tomorrow";
    let token = encode(&format!("{payload}.{}", codec.sign(payload)));
    assert_eq!(codec.validate_at(&token, now()), Err(TokenError::MalformedToken));

    let payload = format!("alice.{expires_at}");
    let token = encode(&format!("{payload}.{}", codec.sign(&payload)));
    assert_eq!(codec.validate_at(&token, now()), Err(TokenError::MalformedToken));
}
