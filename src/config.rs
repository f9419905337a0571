//! Environment-driven configuration, collected once at startup.

use crate::error::ConfigError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub reset_token_ttl: chrono::Duration,
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// Read config from the environment. `DATABASE_URL` and `JWT_SECRET`
    /// are required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
        let token_ttl_secs: i64 = parsed_or("TOKEN_TTL_SECS", 900)?;
        let reset_token_ttl_mins: i64 = parsed_or("RESET_TOKEN_TTL_MINS", 15)?;
        let max_body_bytes: usize = parsed_or("MAX_BODY_BYTES", 1 << 20)?;

        Ok(AppConfig {
            database_url,
            bind_addr,
            jwt_secret,
            token_ttl: chrono::Duration::seconds(token_ttl_secs),
            reset_token_ttl: chrono::Duration::minutes(reset_token_ttl_mins),
            max_body_bytes,
        })
    }
}

fn parsed_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid(key, raw)),
        Err(_) => Ok(default),
    }
}
