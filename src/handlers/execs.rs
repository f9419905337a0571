//! Exec CRUD handlers. Account creation hashes the supplied password; the
//! auth flows live in `handlers::auth`.

use super::ListParams;
use crate::auth;
use crate::error::AppError;
use crate::model::{ExecUpdate, NewExec};
use crate::repo::ExecRepo;
use crate::response::{success_created, success_one, success_page};
use crate::state::AppState;
use crate::validate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let p = ListParams::from_query(params);
    let (rows, meta) =
        ExecRepo::list(&state.pool, &p.filters, p.search.as_deref(), &p.sort, &p.page).await?;
    Ok(success_page(rows, meta))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exec = ExecRepo::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("exec {id}")))?;
    Ok(success_one(exec))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewExec>,
) -> Result<impl IntoResponse, AppError> {
    validate::required("first_name", &body.first_name)?;
    validate::required("last_name", &body.last_name)?;
    validate::required("username", &body.username)?;
    validate::email(&body.email)?;
    validate::password(&body.password)?;
    if ExecRepo::email_exists(&state.pool, &body.email).await? {
        return Err(AppError::Conflict("an exec with this email already exists".into()));
    }
    let encoded = auth::hash_password(body.password.clone()).await?;
    let id = ExecRepo::insert(&state.pool, &body, &encoded).await?;
    let exec = ExecRepo::find(&state.pool, id)
        .await?
        .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
    Ok(success_created(exec))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ExecUpdate>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(email) = &body.email {
        validate::email(email)?;
    }
    let exec = ExecRepo::update(&state.pool, id, body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("exec {id}")))?;
    Ok(success_one(exec))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !ExecRepo::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("exec {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}
