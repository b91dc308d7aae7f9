//! Unit tests for token service

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::Role;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        ..TokenServiceConfig::default()
    })
}

#[test]
fn test_issue_and_authenticate() {
    let service = service();
    let user_id = Uuid::new_v4();

    let token = service.issue(user_id, Role::Livreur).unwrap();
    let caller = service.authenticate(&token).unwrap();

    assert_eq!(caller.user_id, user_id);
    assert_eq!(caller.role, Role::Livreur);
}

#[test]
fn test_default_lifetime_is_seven_days() {
    let service = service();
    let token = service.issue(Uuid::new_v4(), Role::Client).unwrap();
    let claims = service.verify(&token).unwrap();

    assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
}

#[test]
fn test_expired_token_is_rejected() {
    let service = service();
    let mut claims = Claims::new(Uuid::new_v4(), Role::Client, 60, "delivery-marketplace");
    claims.iat = (Utc::now() - Duration::days(8)).timestamp();
    claims.exp = (Utc::now() - Duration::days(1)).timestamp();
    let token = service.encode_jwt(&claims).unwrap();

    assert!(matches!(
        service.verify(&token),
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let other = TokenService::new(TokenServiceConfig {
        jwt_secret: "another-secret".to_string(),
        ..TokenServiceConfig::default()
    });
    let token = other.issue(Uuid::new_v4(), Role::Admin).unwrap();

    assert!(matches!(
        service().verify(&token),
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[test]
fn test_garbage_token_is_rejected() {
    assert!(matches!(
        service().authenticate("not-a-jwt"),
        Err(DomainError::Token(_))
    ));
}

#[test]
fn test_non_uuid_subject_is_rejected() {
    let service = service();
    let mut claims = Claims::new(Uuid::new_v4(), Role::Client, 60, "delivery-marketplace");
    claims.sub = "42".to_string();
    let token = service.encode_jwt(&claims).unwrap();

    assert!(matches!(
        service.authenticate(&token),
        Err(DomainError::Token(TokenError::InvalidClaims))
    ));
}
