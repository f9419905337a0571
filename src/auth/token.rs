//! Signed session tokens: HS256 claims with a short expiry.

use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claim set carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the exec's record id.
    pub sub: String,
    pub user: String,
    pub role: String,
    pub iat: usize,
    pub exp: usize,
}

/// Issues and validates session tokens with one symmetric key. The signing
/// algorithm is pinned to HS256 on both sides, so a token substituting a
/// different algorithm fails validation.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl: chrono::Duration) -> Self {
        TokenSigner {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, id: i64, username: &str, role: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: id.to_string(),
            user: username.to_string(),
            role: role.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Hashing(format!("token encoding: {e}")))
    }

    /// Verify signature and expiry. Every failure reason collapses into the
    /// same generic authentication error; the cause is logged at debug only.
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            tracing::debug!(reason = %e, "token rejected");
            AppError::Auth
        })?;
        Ok(data.claims)
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(ttl_secs: i64) -> TokenSigner {
        TokenSigner::new("test-secret", chrono::Duration::seconds(ttl_secs))
    }

    #[test]
    fn issued_token_validates_immediately() {
        let s = signer(600);
        let token = s.issue(42, "ada", "admin").unwrap();
        let claims = s.validate(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user, "ada");
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Negative TTL backdates the expiry past jsonwebtoken's default leeway.
        let s = signer(-120);
        let token = s.issue(1, "ada", "admin").unwrap();
        assert!(matches!(s.validate(&token), Err(AppError::Auth)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = signer(600).issue(1, "ada", "admin").unwrap();
        let other = TokenSigner::new("other-secret", chrono::Duration::seconds(600));
        assert!(matches!(other.validate(&token), Err(AppError::Auth)));
    }

    #[test]
    fn non_hs256_algorithm_is_rejected() {
        // A token whose header claims HS384 must fail even with the right key.
        let s = signer(600);
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "1".into(),
            user: "ada".into(),
            role: "admin".into(),
            iat: now,
            exp: now + 600,
        };
        let forged = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(s.validate(&forged), Err(AppError::Auth)));
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let s = signer(600);
        assert!(matches!(s.validate(""), Err(AppError::Auth)));
        assert!(matches!(s.validate("a.b"), Err(AppError::Auth)));
    }
}
