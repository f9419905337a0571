//! Entity records and their create/update/patch request shapes.

mod exec;
mod student;
mod teacher;

pub use exec::{Exec, ExecCredentials, ExecUpdate, NewExec};
pub use student::{NewStudent, Student, StudentPatch, StudentUpdate};
pub use teacher::{NewTeacher, Teacher, TeacherPatch, TeacherUpdate};

use serde::{Deserialize, Deserializer};

/// Deserialize a record identity that may arrive as an integer or as a
/// float-encoded integer (loosely typed JSON producers emit `3.0` for `3`).
/// Fractional or non-numeric values are an error, so a malformed identity is
/// rejected before any transaction opens.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let n = serde_json::Number::deserialize(deserializer)?;
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    if let Some(f) = n.as_f64() {
        if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            return Ok(f as i64);
        }
    }
    Err(serde::de::Error::custom("id must be an integer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct WithId {
        #[serde(deserialize_with = "lenient_id")]
        id: i64,
    }

    #[test]
    fn accepts_integer_and_float_encoded_integer() {
        let v: WithId = serde_json::from_value(json!({ "id": 7 })).unwrap();
        assert_eq!(v.id, 7);
        let v: WithId = serde_json::from_value(json!({ "id": 7.0 })).unwrap();
        assert_eq!(v.id, 7);
    }

    #[test]
    fn rejects_fractional_and_non_numeric_ids() {
        assert!(serde_json::from_value::<WithId>(json!({ "id": 7.5 })).is_err());
        assert!(serde_json::from_value::<WithId>(json!({ "id": "7" })).is_err());
        assert!(serde_json::from_value::<WithId>(json!({})).is_err());
    }
}
