//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::errors::{DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Service for issuing and validating stateless JWTs.
///
/// Both validations pin issuer and audience. The lenient one skips the
/// expiry check so the refresh path can inspect the token's kind before
/// deciding between `TokenInvalid` and `TokenExpired`.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lenient_validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        let mut lenient_validation = validation.clone();
        lenient_validation.validate_exp = false;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            lenient_validation,
        }
    }

    /// Issues an access/refresh pair for the given identity.
    pub fn generate_token_pair(
        &self,
        identity_id: Uuid,
        role: &str,
        email: &str,
    ) -> DomainResult<TokenPair> {
        let expires_in = self.config.access_token_expiry_minutes * 60;

        let mut access_claims = Claims::new_access_token(identity_id, role, email);
        access_claims.exp = access_claims.iat + expires_in;
        self.stamp(&mut access_claims);

        let mut refresh_claims = Claims::new_refresh_token(identity_id);
        refresh_claims.exp = refresh_claims.iat + self.config.refresh_token_expiry_days * 86_400;
        self.stamp(&mut refresh_claims);

        let access_token = self.sign(&access_claims)?;
        let refresh_token = self.sign(&refresh_claims)?;

        Ok(TokenPair::new(access_token, refresh_token, expires_in))
    }

    /// Validates an access token: signature, issuer, audience, time window
    /// and kind.
    pub fn validate_access_token(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.decode_with(token, &self.validation)?;
        if claims.kind != TokenKind::Access {
            return Err(TokenError::TokenInvalid.into());
        }
        Ok(claims)
    }

    /// Decodes a refresh token.
    ///
    /// The kind check runs before the expiry check: an access-shaped token
    /// on the refresh path is invalid regardless of freshness.
    pub fn validate_refresh_token(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.decode_with(token, &self.lenient_validation)?;
        if claims.kind != TokenKind::Refresh {
            return Err(TokenError::TokenInvalid.into());
        }
        if claims.is_expired() {
            return Err(TokenError::TokenExpired.into());
        }
        Ok(claims)
    }

    fn stamp(&self, claims: &mut Claims) {
        claims.iss = self.config.issuer.clone();
        claims.aud = self.config.audience.clone();
    }

    fn sign(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            warn!(error = %e, "JWT signing failed");
            TokenError::TokenGenerationFailed.into()
        })
    }

    fn decode_with(&self, token: &str, validation: &Validation) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    TokenError::TokenExpired.into()
                }
                _ => TokenError::TokenInvalid.into(),
            })
    }
}
