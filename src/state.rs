//! Shared application state for all routes.

use crate::auth::TokenSigner;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: Arc<TokenSigner>,
    /// How long an issued password-reset token stays valid.
    pub reset_token_ttl: chrono::Duration,
}
