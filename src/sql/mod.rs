//! Safe SQL composition: columns from static whitelists only, values as parameters.

mod builder;
mod fields;
mod page;
mod sort;

pub use builder::ListQuery;
pub use fields::{FieldMap, EXEC_FIELDS, STUDENT_FIELDS, TEACHER_FIELDS};
pub use page::{PageMeta, PageRequest};
pub use sort::{parse_sort, SortDir, SortKey};
