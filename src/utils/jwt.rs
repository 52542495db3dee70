use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::ShortenerError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (account id)
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub iat: usize,  // Issued at (as UTC timestamp)
}

/// Signing keys for session tokens.
///
/// Losing the secret invalidates every outstanding session, which is what a
/// process-random secret gives on restart.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_days: i64,
}

impl SessionKeys {
    pub fn new(secret: &[u8], ttl_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_days,
        }
    }

    pub fn random(ttl_days: i64) -> Self {
        let mut secret = [0u8; 64];
        rand::rng().fill(&mut secret[..]);
        Self::new(&secret, ttl_days)
    }

    pub fn from_config(secret: Option<&str>, ttl_days: i64) -> Self {
        match secret {
            Some(secret) => Self::new(secret.as_bytes(), ttl_days),
            None => Self::random(ttl_days),
        }
    }

    pub fn issue(&self, account_id: &str) -> Result<String, ShortenerError> {
        let now = chrono::Utc::now();
        let expiry = chrono::Duration::try_days(self.ttl_days)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                ShortenerError::Internal(format!("session ttl of {} days", self.ttl_days))
            })?;

        let claims = Claims {
            sub: account_id.to_string(),
            exp: expiry.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, ShortenerError> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }
}
