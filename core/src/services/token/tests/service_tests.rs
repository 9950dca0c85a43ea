//! Unit tests for the stateless token service.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

const TEST_SECRET: &str = "unit-test-secret-0123456789abcdef";

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig {
        jwt_secret: TEST_SECRET.to_string(),
        ..TokenServiceConfig::default()
    })
}

fn sign_raw(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_access_token_round_trip() {
    let service = service();
    let id = Uuid::new_v4();

    let pair = service
        .generate_token_pair(id, "doctor", "doc@example.com")
        .unwrap();
    assert_eq!(pair.token_type, "Bearer");
    assert_eq!(pair.expires_in, 900);

    let claims = service.validate_access_token(&pair.access_token).unwrap();
    assert_eq!(claims.identity_id().unwrap(), id);
    assert_eq!(claims.kind, TokenKind::Access);
    assert_eq!(claims.role.as_deref(), Some("doctor"));
    assert_eq!(claims.email.as_deref(), Some("doc@example.com"));
}

#[test]
fn test_refresh_token_round_trip() {
    let service = service();
    let id = Uuid::new_v4();

    let pair = service
        .generate_token_pair(id, "patient", "p@example.com")
        .unwrap();

    let claims = service.validate_refresh_token(&pair.refresh_token).unwrap();
    assert_eq!(claims.identity_id().unwrap(), id);
    assert_eq!(claims.kind, TokenKind::Refresh);
    assert!(claims.role.is_none());
    assert!(claims.email.is_none());
}

#[test]
fn test_refresh_token_rejected_on_access_path() {
    let service = service();
    let pair = service
        .generate_token_pair(Uuid::new_v4(), "patient", "p@example.com")
        .unwrap();

    let result = service.validate_access_token(&pair.refresh_token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenInvalid))
    ));
}

#[test]
fn test_access_token_rejected_on_refresh_path() {
    let service = service();
    let pair = service
        .generate_token_pair(Uuid::new_v4(), "patient", "p@example.com")
        .unwrap();

    let result = service.validate_refresh_token(&pair.access_token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenInvalid))
    ));
}

#[test]
fn test_expired_access_token_rejected() {
    let service = service();
    // Expired an hour ago, well past the default decode leeway
    let mut claims = Claims::new_access_token(Uuid::new_v4(), "patient", "p@example.com");
    claims.iat = Utc::now().timestamp() - 7200;
    claims.nbf = claims.iat;
    claims.exp = Utc::now().timestamp() - 3600;

    let token = sign_raw(&claims, TEST_SECRET);
    let result = service.validate_access_token(&token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[test]
fn test_expired_refresh_token_rejected() {
    let service = service();
    let mut claims = Claims::new_refresh_token(Uuid::new_v4());
    claims.iat = Utc::now().timestamp() - 7200;
    claims.nbf = claims.iat;
    claims.exp = Utc::now().timestamp() - 3600;

    let token = sign_raw(&claims, TEST_SECRET);
    let result = service.validate_refresh_token(&token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[test]
fn test_expired_access_shaped_token_is_invalid_on_refresh_path() {
    let service = service();
    // Wrong kind outranks staleness
    let mut claims = Claims::new_access_token(Uuid::new_v4(), "patient", "p@example.com");
    claims.iat = Utc::now().timestamp() - 7200;
    claims.nbf = claims.iat;
    claims.exp = Utc::now().timestamp() - 3600;

    let token = sign_raw(&claims, TEST_SECRET);
    let result = service.validate_refresh_token(&token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenInvalid))
    ));
}

#[test]
fn test_wrong_secret_rejected() {
    let service = service();
    let claims = Claims::new_access_token(Uuid::new_v4(), "patient", "p@example.com");
    let token = sign_raw(&claims, "some-other-secret");

    let result = service.validate_access_token(&token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenInvalid))
    ));
}

#[test]
fn test_garbage_token_rejected() {
    let service = service();
    let result = service.validate_access_token("not.a.jwt");
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenInvalid))
    ));
}

#[test]
fn test_custom_config_drives_claims_and_expiry() {
    let custom = TokenService::new(TokenServiceConfig {
        jwt_secret: TEST_SECRET.to_string(),
        access_token_expiry_minutes: 5,
        issuer: "clinic-portal".to_string(),
        audience: "clinic-portal-api".to_string(),
        ..TokenServiceConfig::default()
    });

    let pair = custom
        .generate_token_pair(Uuid::new_v4(), "patient", "p@example.com")
        .unwrap();
    assert_eq!(pair.expires_in, 300);

    let claims = custom.validate_access_token(&pair.access_token).unwrap();
    assert_eq!(claims.iss, "clinic-portal");
    assert_eq!(claims.aud, "clinic-portal-api");
    assert_eq!(claims.exp - claims.iat, 300);

    // A service pinning the default issuer must not accept it
    let result = service().validate_access_token(&pair.access_token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenInvalid))
    ));
}

#[test]
fn test_wrong_issuer_rejected() {
    let service = service();
    let mut claims = Claims::new_access_token(Uuid::new_v4(), "patient", "p@example.com");
    claims.iss = "someone-else".to_string();

    let token = sign_raw(&claims, TEST_SECRET);
    let result = service.validate_access_token(&token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenInvalid))
    ));
}
