//! Sort parameter parsing: `field:direction` tokens.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    /// SQL keyword for the direction. The keyword is emitted from this enum,
    /// never from request text, so ORDER BY can only contain `ASC`/`DESC`.
    pub fn keyword(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub dir: SortDir,
}

/// Parse `sort_by=field:direction` tokens in request order. Malformed tokens
/// (no colon, unknown direction, empty field) are dropped, not rejected.
/// Field names are validated against the whitelist later, when the ORDER BY
/// clause is built.
pub fn parse_sort(tokens: &[String]) -> Vec<SortKey> {
    tokens
        .iter()
        .filter_map(|token| {
            let (field, dir) = token.split_once(':')?;
            if field.is_empty() {
                return None;
            }
            let dir = match dir {
                "asc" => SortDir::Asc,
                "desc" => SortDir::Desc,
                _ => return None,
            };
            Some(SortKey {
                field: field.to_string(),
                dir,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_valid_tokens_in_order() {
        let keys = parse_sort(&tokens(&["last_name:asc", "email:desc"]));
        assert_eq!(
            keys,
            vec![
                SortKey { field: "last_name".into(), dir: SortDir::Asc },
                SortKey { field: "email".into(), dir: SortDir::Desc },
            ]
        );
    }

    #[test]
    fn drops_malformed_tokens() {
        let keys = parse_sort(&tokens(&[
            "last_name",            // no direction
            "email:descending",     // unknown direction
            ":asc",                 // empty field
            "first_name:asc:extra", // trailing junk makes the direction invalid
            "subject:desc",
        ]));
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].field, "subject");
        assert_eq!(keys[0].dir, SortDir::Desc);
    }

    #[test]
    fn empty_input_yields_no_keys() {
        assert!(parse_sort(&[]).is_empty());
    }
}
