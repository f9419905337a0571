//! Builds the parameterized predicate shared by a list query and its COUNT twin.

use super::fields::FieldMap;
use super::page::PageRequest;
use super::sort::SortKey;
use std::fmt::Write;

/// A composed list query: predicate with `$n` placeholders, the argument list
/// in placeholder order, an optional ORDER BY clause, and clamped pagination.
///
/// Filter and search values only ever enter `args`; SQL text is assembled
/// exclusively from whitelist columns and fixed fragments.
pub struct ListQuery {
    predicate: String,
    pub args: Vec<String>,
    order: String,
    pub limit: i64,
    pub offset: i64,
}

impl ListQuery {
    /// Compose from request parameters. Filters with empty values or
    /// non-whitelisted names are skipped; sort keys referencing unknown
    /// fields are dropped; page/limit arrive pre-clamped via `PageRequest`.
    pub fn compose(
        fields: &FieldMap,
        filters: &[(String, String)],
        search: Option<&str>,
        sort: &[SortKey],
        page: &PageRequest,
    ) -> Self {
        let mut q = ListQuery {
            predicate: String::from("WHERE 1=1"),
            args: Vec::new(),
            order: String::new(),
            limit: page.limit,
            offset: page.offset(),
        };

        for (field, value) in filters {
            if value.is_empty() {
                continue;
            }
            let Some(column) = fields.column(field) else { continue };
            let n = q.push_arg(value.clone());
            let _ = write!(q.predicate, " AND {column} = ${n}");
        }

        if let Some(term) = search {
            if !term.is_empty() && !fields.search.is_empty() {
                let n = q.push_arg(format!("%{term}%"));
                let clause = fields
                    .search
                    .iter()
                    .map(|column| format!("{column} ILIKE ${n}"))
                    .collect::<Vec<_>>()
                    .join(" OR ");
                let _ = write!(q.predicate, " AND ({clause})");
            }
        }

        let order_parts: Vec<String> = sort
            .iter()
            .filter_map(|key| {
                fields
                    .column(&key.field)
                    .map(|column| format!("{column} {}", key.dir.keyword()))
            })
            .collect();
        if !order_parts.is_empty() {
            q.order = format!(" ORDER BY {}", order_parts.join(", "));
        }

        q
    }

    fn push_arg(&mut self, value: String) -> usize {
        self.args.push(value);
        self.args.len()
    }

    /// Full data query: `select_from` is the fixed SELECT ... FROM head for
    /// the entity. LIMIT/OFFSET bind after the predicate arguments.
    pub fn data_sql(&self, select_from: &str) -> String {
        let n = self.args.len();
        format!(
            "{select_from} {}{} LIMIT ${} OFFSET ${}",
            self.predicate,
            self.order,
            n + 1,
            n + 2
        )
    }

    /// COUNT query sharing the same predicate and arguments.
    pub fn count_sql(&self, count_from: &str) -> String {
        format!("{count_from} {}", self.predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{parse_sort, STUDENT_FIELDS, TEACHER_FIELDS};

    fn page() -> PageRequest {
        PageRequest::new(None, None)
    }

    fn filters(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn filter_values_never_appear_in_sql_text() {
        let q = ListQuery::compose(
            &TEACHER_FIELDS,
            &filters(&[("email", "evil'; DROP TABLE teachers; --"), ("class", "10A")]),
            Some("term' OR '1'='1"),
            &[],
            &page(),
        );
        let sql = q.data_sql("SELECT id FROM teachers");
        assert!(!sql.contains("evil"));
        assert!(!sql.contains("DROP"));
        assert!(!sql.contains("term"));
        assert_eq!(
            q.args,
            vec![
                "evil'; DROP TABLE teachers; --".to_string(),
                "10A".to_string(),
                "%term' OR '1'='1%".to_string(),
            ]
        );
    }

    #[test]
    fn predicate_combines_filters_and_search() {
        let q = ListQuery::compose(
            &TEACHER_FIELDS,
            &filters(&[("first_name", "Ada"), ("subject", "Math")]),
            Some("ada"),
            &[],
            &page(),
        );
        let sql = q.data_sql("SELECT id FROM teachers");
        assert!(sql.starts_with(
            "SELECT id FROM teachers WHERE 1=1 AND first_name = $1 AND subject = $2 AND (first_name ILIKE $3 OR last_name ILIKE $3 OR subject ILIKE $3 OR email ILIKE $3 OR class ILIKE $3)"
        ));
        assert!(sql.ends_with("LIMIT $4 OFFSET $5"));
    }

    #[test]
    fn empty_and_unknown_filters_are_skipped() {
        let q = ListQuery::compose(
            &TEACHER_FIELDS,
            &filters(&[("email", ""), ("not_a_field", "x"), ("class", "10B")]),
            None,
            &[],
            &page(),
        );
        assert_eq!(q.args, vec!["10B".to_string()]);
        assert_eq!(
            q.data_sql("SELECT id FROM teachers"),
            "SELECT id FROM teachers WHERE 1=1 AND class = $1 LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn sort_keys_outside_whitelist_are_dropped() {
        let sort = parse_sort(&[
            "last_name:asc".to_string(),
            "password:desc".to_string(),
            "email:desc".to_string(),
        ]);
        let q = ListQuery::compose(&TEACHER_FIELDS, &[], None, &sort, &page());
        let sql = q.data_sql("SELECT id FROM teachers");
        assert!(sql.contains(" ORDER BY last_name ASC, email DESC "));
        assert!(!sql.contains("password"));
    }

    #[test]
    fn no_valid_sort_keys_means_no_order_by() {
        let sort = parse_sort(&["bogus:asc".to_string()]);
        let q = ListQuery::compose(&TEACHER_FIELDS, &[], None, &sort, &page());
        assert!(!q.data_sql("SELECT id FROM teachers").contains("ORDER BY"));
    }

    #[test]
    fn count_query_shares_predicate_without_pagination() {
        let q = ListQuery::compose(
            &STUDENT_FIELDS,
            &filters(&[("class", "10A")]),
            Some("smith"),
            &[],
            &page(),
        );
        let count = q.count_sql("SELECT COUNT(*) FROM students s JOIN classes c ON s.class_id = c.id");
        assert_eq!(
            count,
            "SELECT COUNT(*) FROM students s JOIN classes c ON s.class_id = c.id WHERE 1=1 AND c.name = $1 AND (s.first_name ILIKE $2 OR s.last_name ILIKE $2 OR s.email ILIKE $2 OR c.name ILIKE $2)"
        );
        assert!(!count.contains("LIMIT"));
        assert!(!count.contains("OFFSET"));
    }

    #[test]
    fn pagination_is_clamped_before_offset() {
        let q = ListQuery::compose(
            &TEACHER_FIELDS,
            &[],
            None,
            &[],
            &PageRequest::new(Some(-2), Some(0)),
        );
        assert_eq!(q.limit, PageRequest::DEFAULT_LIMIT);
        assert_eq!(q.offset, 0);

        let q = ListQuery::compose(
            &TEACHER_FIELDS,
            &[],
            None,
            &[],
            &PageRequest::new(Some(3), Some(20)),
        );
        assert_eq!(q.offset, 40);
    }
}
