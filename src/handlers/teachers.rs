//! Teacher CRUD and bulk handlers.

use super::ListParams;
use crate::error::AppError;
use crate::model::{NewTeacher, TeacherPatch, TeacherUpdate};
use crate::repo::TeacherRepo;
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
        TeacherRepo::list(&state.pool, &p.filters, p.search.as_deref(), &p.sort, &p.page).await?;
    Ok(success_page(rows, meta))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let teacher = TeacherRepo::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("teacher {id}")))?;
    Ok(success_one(teacher))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewTeacher>,
) -> Result<impl IntoResponse, AppError> {
    validate::required("first_name", &body.first_name)?;
    validate::required("last_name", &body.last_name)?;
    validate::email(&body.email)?;
    let id = TeacherRepo::insert(&state.pool, &body).await?;
    let teacher = TeacherRepo::find(&state.pool, id)
        .await?
        .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
    Ok(success_created(teacher))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<TeacherUpdate>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(email) = &body.email {
        validate::email(email)?;
    }
    let teacher = TeacherRepo::update(&state.pool, id, body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("teacher {id}")))?;
    Ok(success_one(teacher))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !TeacherRepo::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("teacher {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_many(
    State(state): State<AppState>,
    Json(ids): Json<Vec<i64>>,
) -> Result<StatusCode, AppError> {
    TeacherRepo::delete_many(&state.pool, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn patch_many(
    State(state): State<AppState>,
    Json(updates): Json<Vec<TeacherPatch>>,
) -> Result<StatusCode, AppError> {
    TeacherRepo::patch_many(&state.pool, &updates).await?;
    Ok(StatusCode::NO_CONTENT)
}
