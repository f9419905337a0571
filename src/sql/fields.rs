//! Per-entity field whitelists: the only identifiers that may reach SQL text.
//!
//! Each map pairs the logical field name clients use with the storage column
//! it resolves to. Anything not listed here is silently ignored by the query
//! builder, so arbitrary column names can never be injected through filter or
//! sort parameters.

pub struct FieldMap {
    /// (logical field, storage column) pairs, valid for both filtering and sorting.
    pub columns: &'static [(&'static str, &'static str)],
    /// Columns matched by the free-text search clause.
    pub search: &'static [&'static str],
}

impl FieldMap {
    pub fn column(&self, field: &str) -> Option<&'static str> {
        self.columns
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, col)| *col)
    }
}

pub const TEACHER_FIELDS: FieldMap = FieldMap {
    columns: &[
        ("first_name", "first_name"),
        ("last_name", "last_name"),
        ("email", "email"),
        ("class", "class"),
        ("subject", "subject"),
    ],
    search: &["first_name", "last_name", "subject", "email", "class"],
};

// Students are listed through a join; logical "class" resolves to the class name.
pub const STUDENT_FIELDS: FieldMap = FieldMap {
    columns: &[
        ("first_name", "s.first_name"),
        ("last_name", "s.last_name"),
        ("email", "s.email"),
        ("class", "c.name"),
    ],
    search: &["s.first_name", "s.last_name", "s.email", "c.name"],
};

pub const EXEC_FIELDS: FieldMap = FieldMap {
    columns: &[
        ("first_name", "first_name"),
        ("last_name", "last_name"),
        ("email", "email"),
        ("username", "username"),
    ],
    search: &["first_name", "last_name", "email", "username"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_field_resolves_to_column() {
        assert_eq!(STUDENT_FIELDS.column("class"), Some("c.name"));
        assert_eq!(TEACHER_FIELDS.column("subject"), Some("subject"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert_eq!(TEACHER_FIELDS.column("id; DROP TABLE teachers"), None);
        assert_eq!(EXEC_FIELDS.column("password"), None);
    }
}
