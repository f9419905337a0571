//! Teacher record and request shapes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Teacher {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class: String,
    pub subject: String,
}

#[derive(Debug, Deserialize)]
pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class: String,
    pub subject: String,
}

/// Full update: absent fields keep their current values.
#[derive(Debug, Default, Deserialize)]
pub struct TeacherUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub class: Option<String>,
    pub subject: Option<String>,
}

impl TeacherUpdate {
    pub fn merge(self, existing: Teacher) -> Teacher {
        Teacher {
            id: existing.id,
            first_name: self.first_name.unwrap_or(existing.first_name),
            last_name: self.last_name.unwrap_or(existing.last_name),
            email: self.email.unwrap_or(existing.email),
            class: self.class.unwrap_or(existing.class),
            subject: self.subject.unwrap_or(existing.subject),
        }
    }
}

/// One item of a bulk patch batch: identity plus the fields to overwrite.
#[derive(Debug, Deserialize)]
pub struct TeacherPatch {
    #[serde(deserialize_with = "super::lenient_id")]
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub class: Option<String>,
    pub subject: Option<String>,
}

impl TeacherPatch {
    /// Overwrite only the fields present in the patch.
    pub fn apply(&self, row: &mut Teacher) {
        if let Some(v) = &self.first_name {
            row.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            row.last_name = v.clone();
        }
        if let Some(v) = &self.email {
            row.email = v.clone();
        }
        if let Some(v) = &self.class {
            row.class = v.clone();
        }
        if let Some(v) = &self.subject {
            row.subject = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> Teacher {
        Teacher {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@school.test".into(),
            class: "10A".into(),
            subject: "Math".into(),
        }
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let patch: TeacherPatch =
            serde_json::from_value(json!({ "id": 1, "subject": "Physics" })).unwrap();
        let mut r = row();
        patch.apply(&mut r);
        assert_eq!(r.subject, "Physics");
        assert_eq!(r.first_name, "Ada");
        assert_eq!(r.class, "10A");
    }

    #[test]
    fn patch_is_idempotent() {
        let patch: TeacherPatch = serde_json::from_value(
            json!({ "id": 1, "first_name": "Ada", "email": "ada@school.test" }),
        )
        .unwrap();
        let mut once = row();
        patch.apply(&mut once);
        let mut twice = once.clone();
        patch.apply(&mut twice);
        assert_eq!(once.first_name, twice.first_name);
        assert_eq!(once.email, twice.email);
        assert_eq!(once.subject, twice.subject);
    }

    #[test]
    fn update_merge_keeps_existing_for_absent_fields() {
        let update: TeacherUpdate =
            serde_json::from_value(json!({ "class": "11B" })).unwrap();
        let merged = update.merge(row());
        assert_eq!(merged.class, "11B");
        assert_eq!(merged.email, "ada@school.test");
        assert_eq!(merged.id, 1);
    }
}
