use super::*;
use jsonwebtoken::{EncodingKey, Header, encode};
use std::env;

fn set_env_vars() {
    unsafe {
        env::set_var("JWT_SECRET", "supersecretjwtsecretforunittesting123");
    }
}

#[test]
fn test_issue_and_validate_token_roundtrip() {
    set_env_vars();
    let user_id = Uuid::new_v4();

    let token = issue_token(user_id, "buyer@campus.edu", "user").expect("Token should be issued");
    let claims = validate_token(&token).expect("Valid token should pass");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "buyer@campus.edu");
    assert_eq!(claims.role, "user");
}

#[test]
fn test_validate_token_expired() {
    set_env_vars();
    let secret = "supersecretjwtsecretforunittesting123";
    let my_claims = Claims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        role: "user".to_string(),
        email: "test@campus.edu".to_string(),
        exp: 1, // past
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    let result = validate_token(&token);
    assert!(result.is_err());
}

#[test]
fn test_validate_token_invalid_signature() {
    set_env_vars();
    let secret = "wrongsecret";
    let my_claims = Claims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        role: "user".to_string(),
        email: "test@campus.edu".to_string(),
        exp: 9999999999,
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    let result = validate_token(&token);
    assert!(result.is_err());
}

#[test]
fn test_password_hash_and_verify() {
    let hashed = hash_password("hunter2hunter2").unwrap();

    assert!(verify_password("hunter2hunter2", &hashed).unwrap());
    assert!(!verify_password("not-the-password", &hashed).unwrap());
}
