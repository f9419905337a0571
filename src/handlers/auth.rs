//! Login, logout, and the password flows.
//!
//! Wrong password, unknown username, and bad reset codes all surface as the
//! same generic authentication failure, so responses cannot be used to
//! enumerate accounts.

use crate::auth::{self, ResetToken};
use crate::error::AppError;
use crate::extractors::{AuthClaims, SESSION_COOKIE};
use crate::repo::ExecRepo;
use crate::response::success_one;
use crate::state::AppState;
use crate::validate;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginData {
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate::required("username", &body.username)?;
    validate::required("password", &body.password)?;

    let creds = ExecRepo::credentials_by_username(&state.pool, &body.username)
        .await?
        .ok_or(AppError::Auth)?;

    if !auth::verify_password(body.password, creds.password).await? {
        return Err(AppError::Auth);
    }
    // Checked only after the password verified, so account state is not
    // observable with bad credentials.
    if creds.inactive {
        return Err(AppError::BadRequest("account is inactive".into()));
    }

    let token = state.tokens.issue(creds.id, &creds.username, &creds.role)?;
    let cookie = session_cookie(&token, state.tokens.ttl().num_seconds());
    Ok((
        [(header::SET_COOKIE, cookie)],
        success_one(LoginData { token }),
    ))
}

pub async fn logout() -> impl IntoResponse {
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Secure; SameSite=Strict; Max-Age=0");
    ([(header::SET_COOKIE, cookie)], StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Change the caller's own password. Requires a valid session whose subject
/// matches the path id.
pub async fn update_password(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(id): Path<i64>,
    Json(body): Json<UpdatePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    if claims.sub != id.to_string() {
        return Err(AppError::Auth);
    }
    validate::required("current_password", &body.current_password)?;
    validate::password(&body.new_password)?;

    let creds = ExecRepo::credentials_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Auth)?;
    if !auth::verify_password(body.current_password, creds.password).await? {
        return Err(AppError::Auth);
    }

    let encoded = auth::hash_password(body.new_password).await?;
    ExecRepo::set_password(&state.pool, id, &encoded).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Issue a password-reset token. The response is identical whether or not
/// the email belongs to an account; delivery of the reset link is the mail
/// collaborator's job (stood in for by the log here).
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate::email(&body.email)?;

    if let Some(id) = ExecRepo::id_by_email(&state.pool, &body.email).await? {
        let reset = ResetToken::generate();
        let expires = Utc::now() + state.reset_token_ttl;
        ExecRepo::set_reset_token(&state.pool, id, &reset.digest, expires).await?;
        tracing::info!(
            exec_id = id,
            reset_path = %format!("/execs/reset-password/{}", reset.token),
            expires = %expires,
            "password reset issued"
        );
    }

    Ok(success_one(serde_json::json!({
        "message": "if the account exists, a reset link has been issued"
    })))
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate::password(&body.new_password)?;
    if body.new_password != body.confirm_password {
        return Err(AppError::Validation("passwords do not match".into()));
    }

    let digest = auth::reset::digest(&code)?;
    let id = ExecRepo::id_by_reset_digest(&state.pool, &digest, Utc::now())
        .await?
        .ok_or(AppError::Auth)?;

    let encoded = auth::hash_password(body.new_password).await?;
    ExecRepo::reset_password(&state.pool, id, &encoded).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; Secure; SameSite=Strict; Max-Age={max_age_secs}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_http_only_and_secure() {
        let cookie = session_cookie("abc.def.ghi", 900);
        assert!(cookie.starts_with("Bearer=abc.def.ghi;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=900"));
    }
}
