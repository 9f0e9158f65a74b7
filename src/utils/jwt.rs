use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub username: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn user_id(&self) -> Result<i32> {
        self.sub
            .parse::<i32>()
            .context("Session subject is not a user id")
    }
}

pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn create_jwt(
        &self,
        user_id: i32,
        username: &str,
        expires_in_seconds: i64,
    ) -> Result<(String, SessionClaims)> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + expires_in_seconds,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .context("Failed to sign session token")?;

        Ok((token, claims))
    }

    /// Verifies signature and expiry.
    pub fn decode_jwt(&self, token: &str) -> Result<SessionClaims> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .context("Invalid session token")?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_decodes_to_same_claims() {
        let manager = JwtManager::new("test-secret");
        let (token, claims) = manager.create_jwt(7, "teacher", 3600).unwrap();
        let decoded = manager.decode_jwt(&token).unwrap();
        assert_eq!(decoded, claims);
        assert_eq!(decoded.user_id().unwrap(), 7);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let (token, _) = JwtManager::new("one").create_jwt(1, "a", 3600).unwrap();
        assert!(JwtManager::new("two").decode_jwt(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let manager = JwtManager::new("test-secret");
        let (token, _) = manager.create_jwt(1, "a", -3600).unwrap();
        assert!(manager.decode_jwt(&token).is_err());
    }
}
