//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::Role;
use crate::domain::value_objects::Caller;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for signing and verifying JWT credentials
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Token lifetime in seconds
    pub fn expiry_seconds(&self) -> i64 {
        self.config.expiry_seconds
    }

    /// Issues a signed credential for a user
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The encoded JWT
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String, DomainError> {
        let claims = Claims::new(user_id, role, self.config.expiry_seconds, &self.config.issuer);
        self.encode_jwt(&claims)
    }

    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(self.config.algorithm), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies signature, issuer and expiry and returns the claims
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                ErrorKind::InvalidIssuer | ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                    DomainError::Token(TokenError::InvalidClaims)
                }
                _ => DomainError::Token(TokenError::InvalidToken),
            })
    }

    /// Verifies a credential and resolves the caller it identifies
    pub fn authenticate(&self, token: &str) -> Result<Caller, DomainError> {
        let claims = self.verify(token)?;
        let user_id = claims
            .user_id()
            .ok_or(DomainError::Token(TokenError::InvalidClaims))?;
        Ok(Caller::new(user_id, claims.role))
    }
}
