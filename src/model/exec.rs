//! Exec (administrative user) record and request shapes.
//!
//! Credential columns live on the execs table but are never part of the
//! public record: `Exec` carries no password hash, reset token, or reset
//! expiry, so they cannot leak through success responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Exec {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub inactive: bool,
    pub role: String,
    pub user_created_at: Option<DateTime<Utc>>,
    pub password_changed_at: Option<DateTime<Utc>>,
}

/// Credential row used by the auth flows only. Not serializable, and no
/// Debug: the encoded hash must not end up in logs.
#[derive(sqlx::FromRow)]
pub struct ExecCredentials {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub password: String,
    pub inactive: bool,
}

// No Debug: carries the plaintext password.
#[derive(Deserialize)]
pub struct NewExec {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub inactive: bool,
}

fn default_role() -> String {
    "exec".to_string()
}

/// Full update of profile fields; absent fields keep their current values.
/// Password changes go through the dedicated password flows.
#[derive(Debug, Default, Deserialize)]
pub struct ExecUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub inactive: Option<bool>,
}

impl ExecUpdate {
    pub fn merge(self, existing: Exec) -> Exec {
        Exec {
            id: existing.id,
            first_name: self.first_name.unwrap_or(existing.first_name),
            last_name: self.last_name.unwrap_or(existing.last_name),
            email: self.email.unwrap_or(existing.email),
            username: self.username.unwrap_or(existing.username),
            role: self.role.unwrap_or(existing.role),
            inactive: self.inactive.unwrap_or(existing.inactive),
            user_created_at: existing.user_created_at,
            password_changed_at: existing.password_changed_at,
        }
    }
}
