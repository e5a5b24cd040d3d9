//! Issuing and verifying the HS256 access/refresh token pair.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user id
    pub sub: String,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token is invalid or expired")]
    Invalid(#[from] jsonwebtoken::errors::Error),
    #[error("Token has wrong type")]
    WrongType,
    #[error("Token contained no recognizable user identification")]
    BadSubject,
}

pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn issue_pair(&self, user_id: i32) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access: self.issue_access(user_id)?,
            refresh: self.issue(user_id, TokenType::Refresh, self.refresh_ttl)?,
        })
    }

    pub fn issue_access(&self, user_id: i32) -> Result<String, TokenError> {
        self.issue(user_id, TokenType::Access, self.access_ttl)
    }

    /// Checks signature, expiry and token type, returning the user id
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<i32, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)?.claims;
        if claims.token_type != expected {
            return Err(TokenError::WrongType);
        }

        claims.sub.parse().map_err(|_| TokenError::BadSubject)
    }

    fn issue(&self, user_id: i32, token_type: TokenType, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().simple().to_string(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::new(b"test-secret", Duration::days(10), Duration::days(30))
    }

    #[test]
    fn test_pair_verifies() {
        let keys = keys();
        let pair = keys.issue_pair(42).unwrap();

        assert_eq!(keys.verify(&pair.access, TokenType::Access).unwrap(), 42);
        assert_eq!(keys.verify(&pair.refresh, TokenType::Refresh).unwrap(), 42);
        assert_ne!(pair.access, pair.refresh);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let keys = keys();
        let pair = keys.issue_pair(7).unwrap();

        assert!(matches!(
            keys.verify(&pair.refresh, TokenType::Access),
            Err(TokenError::WrongType)
        ));
        assert!(matches!(
            keys.verify(&pair.access, TokenType::Refresh),
            Err(TokenError::WrongType)
        ));
    }

    #[test]
    fn test_foreign_and_expired_tokens() {
        let keys = keys();
        let other = TokenKeys::new(b"another-secret", Duration::days(10), Duration::days(30));
        let token = other.issue_access(1).unwrap();
        assert!(matches!(
            keys.verify(&token, TokenType::Access),
            Err(TokenError::Invalid(_))
        ));

        // Well past the default leeway
        let stale = TokenKeys::new(b"test-secret", Duration::minutes(-5), Duration::days(30));
        let token = stale.issue_access(1).unwrap();
        assert!(matches!(
            keys.verify(&token, TokenType::Access),
            Err(TokenError::Invalid(_))
        ));

        assert!(keys.verify("not-a-token", TokenType::Access).is_err());
    }
}
