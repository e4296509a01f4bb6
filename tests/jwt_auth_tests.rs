// SPDX-License-Identifier: MIT

//! JWT compatibility tests.
//!
//! These verify that tokens issued by `create_jwt` decode with the exact
//! claims shape the auth middleware expects, catching drift early.

use bikeguard::middleware::auth::{create_jwt, Claims};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

#[test]
fn test_jwt_roundtrip() {
    let user_id = Uuid::new_v4();
    let token = create_jwt(user_id, SIGNING_KEY).expect("Failed to create JWT");

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, user_id.to_string());
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_jwt_sub_parses_back_to_uuid() {
    let user_id = Uuid::new_v4();
    let token = create_jwt(user_id, SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    let parsed: Uuid = token_data
        .claims
        .sub
        .parse()
        .expect("sub claim should be a uuid");
    assert_eq!(parsed, user_id);
}

#[test]
fn test_jwt_expires_in_seven_days() {
    use std::time::{SystemTime, UNIX_EPOCH};

    let token = create_jwt(Uuid::new_v4(), SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false; // We'll check manually

    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    // Seven days out, give or take the test's own runtime
    assert!(token_data.claims.exp > now + 86400 * 6);
    assert!(token_data.claims.exp <= now + 86400 * 7 + 60);
}

#[test]
fn test_jwt_rejects_wrong_key() {
    let token = create_jwt(Uuid::new_v4(), SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(b"a_completely_different_key_here!");
    let validation = Validation::new(Algorithm::HS256);

    assert!(decode::<Claims>(&token, &key, &validation).is_err());
}
