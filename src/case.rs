//! Case conversion for field names: camelCase wire keys -> snake_case columns and readable labels.

/// Convert a single identifier from camelCase to snake_case.
/// e.g. "clientsCount" -> "clients_count", "createdAt" -> "created_at"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Human-readable label for a field, used in validation messages.
/// e.g. "clientsCount" -> "clients count", "created_at" -> "created at"
pub fn field_label(field: &str) -> String {
    to_snake_case(field)
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_from_camel() {
        assert_eq!(to_snake_case("clientsCount"), "clients_count");
        assert_eq!(to_snake_case("name"), "name");
        assert_eq!(to_snake_case("updatedAt"), "updated_at");
    }

    #[test]
    fn labels() {
        assert_eq!(field_label("clientsCount"), "clients count");
        assert_eq!(field_label("name"), "name");
        assert_eq!(field_label("clients_count"), "clients count");
    }
}
