//! Data access per entity, plus the shared bulk-mutation error type.

mod bulk;
mod execs;
mod students;
mod teachers;

pub use bulk::BulkError;
pub use execs::ExecRepo;
pub use students::StudentRepo;
pub use teachers::TeacherRepo;
