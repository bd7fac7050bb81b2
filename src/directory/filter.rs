//! Search filter construction

use super::SearchCriteria;

/// Object class every match must carry
const PERSON_CLASS: &str = "person";

/// Escape special characters in LDAP filter values (RFC 4515).
pub fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\5c"),
            '*' => escaped.push_str("\\2a"),
            '(' => escaped.push_str("\\28"),
            ')' => escaped.push_str("\\29"),
            '\0' => escaped.push_str("\\00"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Fuzzy person filter: surname contains the last name, common name contains
/// the first name. Substring matching on `sn`/`cn` is case-insensitive on
/// standard schemas.
pub fn build_filter(criteria: &SearchCriteria) -> String {
    format!(
        "(&(objectClass={})(sn=*{}*)(cn=*{}*))",
        PERSON_CLASS,
        escape_filter_value(&criteria.last_name),
        escape_filter_value(&criteria.first_name)
    )
}
