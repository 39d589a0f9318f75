use std::fmt;

use uuid::Uuid;

/// One way of locating a record from a free-form term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    /// Catalog index
    No(u32),
    /// Storage identifier
    Id(Uuid),
    /// Trimmed, lowercased name
    Name(String),
}

impl LookupKey {
    /// Keys to try for `term`, in order. A numeric term is tried as a catalog
    /// index before it is ever compared as a name. The name key is always
    /// present and always last.
    pub fn plan(term: &str) -> Vec<LookupKey> {
        let mut keys = Vec::with_capacity(3);

        if let Ok(no) = term.trim().parse::<u32>() {
            keys.push(LookupKey::No(no));
        }
        if let Ok(id) = Uuid::parse_str(term) {
            keys.push(LookupKey::Id(id));
        }
        keys.push(LookupKey::Name(term.trim().to_lowercase()));

        keys
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::No(no) => write!(f, "no={}", no),
            LookupKey::Id(id) => write!(f, "id={}", id),
            LookupKey::Name(name) => write!(f, "name={}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_term_tries_index_before_name() {
        assert_eq!(
            LookupKey::plan("6"),
            vec![LookupKey::No(6), LookupKey::Name("6".to_string())]
        );
    }

    #[test]
    fn test_numeric_term_with_whitespace() {
        assert_eq!(
            LookupKey::plan(" 25 "),
            vec![LookupKey::No(25), LookupKey::Name("25".to_string())]
        );
    }

    #[test]
    fn test_identifier_term() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            LookupKey::plan("550e8400-e29b-41d4-a716-446655440000"),
            vec![
                LookupKey::Id(id),
                LookupKey::Name("550e8400-e29b-41d4-a716-446655440000".to_string())
            ]
        );
    }

    #[test]
    fn test_name_term_is_trimmed_and_lowercased() {
        assert_eq!(
            LookupKey::plan("  Pikachu "),
            vec![LookupKey::Name("pikachu".to_string())]
        );
    }

    #[test]
    fn test_negative_and_fractional_terms_are_names() {
        assert_eq!(LookupKey::plan("-1"), vec![LookupKey::Name("-1".to_string())]);
        assert_eq!(LookupKey::plan("1.5"), vec![LookupKey::Name("1.5".to_string())]);
    }
}
