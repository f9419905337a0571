//! Route registration per entity.

mod common;
mod entities;

pub use common::common_routes;
pub use entities::{exec_routes, student_routes, teacher_routes};
