//! Student CRUD and bulk handlers.

use super::ListParams;
use crate::error::AppError;
use crate::model::{NewStudent, StudentPatch, StudentUpdate};
use crate::repo::StudentRepo;
use crate::response::{success_created, success_one, success_page};
use crate::state::AppState;
use crate::validate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let p = ListParams::from_query(params);
    let (rows, meta) =
        StudentRepo::list(&state.pool, &p.filters, p.search.as_deref(), &p.sort, &p.page).await?;
    Ok(success_page(rows, meta))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let student = StudentRepo::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {id}")))?;
    Ok(success_one(student))
}

#[derive(Deserialize)]
pub struct OfTeacherParams {
    pub teacher_id: i64,
}

/// Students in the class taught by the given teacher.
pub async fn of_teacher(
    State(state): State<AppState>,
    Query(params): Query<OfTeacherParams>,
) -> Result<impl IntoResponse, AppError> {
    let students = StudentRepo::of_teacher(&state.pool, params.teacher_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("teacher {}", params.teacher_id)))?;
    Ok(success_one(students))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewStudent>,
) -> Result<impl IntoResponse, AppError> {
    validate::required("first_name", &body.first_name)?;
    validate::required("last_name", &body.last_name)?;
    validate::email(&body.email)?;
    let id = StudentRepo::insert(&state.pool, &body).await?;
    let student = StudentRepo::find(&state.pool, id)
        .await?
        .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
    Ok(success_created(student))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<StudentUpdate>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(email) = &body.email {
        validate::email(email)?;
    }
    let student = StudentRepo::update(&state.pool, id, body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {id}")))?;
    Ok(success_one(student))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !StudentRepo::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("student {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_many(
    State(state): State<AppState>,
    Json(ids): Json<Vec<i64>>,
) -> Result<StatusCode, AppError> {
    StudentRepo::delete_many(&state.pool, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn patch_many(
    State(state): State<AppState>,
    Json(updates): Json<Vec<StudentPatch>>,
) -> Result<StatusCode, AppError> {
    StudentRepo::patch_many(&state.pool, &updates).await?;
    Ok(StatusCode::NO_CONTENT)
}
