//! Entity CRUD routes. Bulk operations live under `/{entity}/bulk` so the
//! literal segment wins over the `:id` parameter.

use crate::handlers::{auth, execs, students, teachers};
use crate::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};

pub fn teacher_routes(state: AppState) -> Router {
    Router::new()
        .route("/teachers", get(teachers::list).post(teachers::create))
        .route(
            "/teachers/bulk",
            patch(teachers::patch_many).delete(teachers::delete_many),
        )
        .route(
            "/teachers/:id",
            get(teachers::read).put(teachers::update).delete(teachers::delete),
        )
        .with_state(state)
}

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/students", get(students::list).post(students::create))
        .route(
            "/students/bulk",
            patch(students::patch_many).delete(students::delete_many),
        )
        .route("/students/of-teacher", get(students::of_teacher))
        .route(
            "/students/:id",
            get(students::read).put(students::update).delete(students::delete),
        )
        .with_state(state)
}

pub fn exec_routes(state: AppState) -> Router {
    Router::new()
        .route("/execs", get(execs::list).post(execs::create))
        .route("/execs/login", post(auth::login))
        .route("/execs/logout", post(auth::logout))
        .route("/execs/forgot-password", post(auth::forgot_password))
        .route("/execs/reset-password/:code", post(auth::reset_password))
        .route(
            "/execs/:id",
            get(execs::read).put(execs::update).delete(execs::delete),
        )
        .route("/execs/:id/update-password", post(auth::update_password))
        .with_state(state)
}
