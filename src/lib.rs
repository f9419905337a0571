//! Record-management backend: teachers, students, and execs over PostgreSQL.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod repo;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;
pub mod validate;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use response::{success_created, success_one, success_page};
pub use routes::{common_routes, exec_routes, student_routes, teacher_routes};
pub use sql::{PageMeta, PageRequest};
pub use state::AppState;
pub use store::ensure_tables;
