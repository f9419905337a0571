//! Student record and request shapes. Students belong to a class; reads
//! return the class name alongside the id.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class_id: i64,
    /// Class name, joined from the classes table.
    pub class: String,
}

#[derive(Debug, Deserialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class_id: i64,
}

/// Full update: absent fields keep their current values.
#[derive(Debug, Default, Deserialize)]
pub struct StudentUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub class_id: Option<i64>,
}

impl StudentUpdate {
    pub fn merge(self, existing: Student) -> Student {
        Student {
            id: existing.id,
            first_name: self.first_name.unwrap_or(existing.first_name),
            last_name: self.last_name.unwrap_or(existing.last_name),
            email: self.email.unwrap_or(existing.email),
            class_id: self.class_id.unwrap_or(existing.class_id),
            class: existing.class,
        }
    }
}

/// One item of a bulk patch batch.
#[derive(Debug, Deserialize)]
pub struct StudentPatch {
    #[serde(deserialize_with = "super::lenient_id")]
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub class_id: Option<i64>,
}

impl StudentPatch {
    pub fn apply(&self, row: &mut Student) {
        if let Some(v) = &self.first_name {
            row.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            row.last_name = v.clone();
        }
        if let Some(v) = &self.email {
            row.email = v.clone();
        }
        if let Some(v) = self.class_id {
            row.class_id = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_accepts_float_encoded_ids() {
        let patch: StudentPatch =
            serde_json::from_value(json!({ "id": 12.0, "class_id": 3 })).unwrap();
        assert_eq!(patch.id, 12);
        assert_eq!(patch.class_id, Some(3));
    }

    #[test]
    fn merge_keeps_class_id_when_absent() {
        let existing = Student {
            id: 5,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@school.test".into(),
            class_id: 2,
            class: "10B".into(),
        };
        let update: StudentUpdate =
            serde_json::from_value(json!({ "last_name": "H." })).unwrap();
        let merged = update.merge(existing);
        assert_eq!(merged.last_name, "H.");
        assert_eq!(merged.class_id, 2);
    }
}
