//! ID prefix constants.
//!
//! IDs are `<prefix>-<8 hex chars>`, generated by the database layer.

pub const PREFIX_ISSUE: &str = "iss";
pub const PREFIX_COMMENT: &str = "cmt";

pub const ALL_PREFIXES: &[&str] = &[PREFIX_ISSUE, PREFIX_COMMENT];

/// Format an ID from a prefix and random hex suffix.
#[must_use]
pub fn format_id(prefix: &str, hex: &str) -> String {
    format!("{prefix}-{hex}")
}

/// Check that `id` looks like `<prefix>-<hex>` for a known prefix.
#[must_use]
pub fn has_known_prefix(id: &str) -> bool {
    id.split_once('-').is_some_and(|(prefix, rest)| {
        ALL_PREFIXES.contains(&prefix)
            && !rest.is_empty()
            && rest.chars().all(|c| c.is_ascii_hexdigit())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_id_joins_with_dash() {
        assert_eq!(format_id(PREFIX_ISSUE, "a3f8b2c1"), "iss-a3f8b2c1");
    }

    #[test]
    fn known_prefix_detection() {
        assert!(has_known_prefix("iss-a3f8b2c1"));
        assert!(has_known_prefix("cmt-00ff"));
        assert!(!has_known_prefix("usr-a3f8b2c1"));
        assert!(!has_known_prefix("iss-"));
        assert!(!has_known_prefix("iss-zzzz"));
        assert!(!has_known_prefix("1"));
    }
}
