//! Attribute extraction with fallback candidates

use super::DirectoryEntry;

/// Value of the first candidate attribute whose first value is non-empty.
///
/// Multi-valued attributes contribute only their first element; an empty
/// first element moves on to the next candidate. Returns `default` when no
/// candidate qualifies.
pub fn first_value(entry: &DirectoryEntry, candidates: &[&str], default: &str) -> String {
    candidates
        .iter()
        .filter_map(|name| entry.values(name)?.first())
        .find(|value| !value.is_empty())
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> DirectoryEntry {
        DirectoryEntry::new("uid=einstein,dc=example,dc=com")
            .with_attr("uid", ["einstein"])
            .with_attr("cn", ["Albert Einstein"])
            .with_attr("mail", ["einstein@ldap.forumsys.com", "ae@example.com"])
            .with_attr("description", Vec::<String>::new())
            .with_attr("info", [""])
    }

    #[test]
    fn default_when_no_candidate_present() {
        assert_eq!(first_value(&entry(), &["givenName", "sn"], "none"), "none");
        assert_eq!(first_value(&entry(), &[], "none"), "none");
    }

    #[test]
    fn default_when_all_candidates_empty() {
        assert_eq!(first_value(&entry(), &["info", "description"], "-"), "-");
    }

    #[test]
    fn multi_valued_returns_first_element() {
        assert_eq!(
            first_value(&entry(), &["mail"], ""),
            "einstein@ldap.forumsys.com"
        );
    }

    #[test]
    fn candidates_are_tried_in_order() {
        assert_eq!(
            first_value(&entry(), &["sAMAccountName", "uid", "cn"], "unknown"),
            "einstein"
        );
        assert_eq!(first_value(&entry(), &["info", "cn"], ""), "Albert Einstein");
    }

    #[test]
    fn empty_first_element_skips_to_next_candidate() {
        let entry = DirectoryEntry::new("x")
            .with_attr("info", ["", "second"])
            .with_attr("description", ["desc"]);
        assert_eq!(first_value(&entry, &["info", "description"], ""), "desc");
    }
}
