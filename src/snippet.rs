//! Clipboard snippet built from a selected directory entry
//!
//! The snippet is a fixed four-line assignment block:
//!
//! ```text
//! username := "jsmith"
//! firstname := StrUpper("JOHN")
//! lastname := StrUpper("SMITH")
//! info := "Room 101"
//! ```

use crate::directory::{first_value, DirectoryEntry};
use std::fmt;

/// Fields extracted from an entry, in template order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub info: String,
}

impl Snippet {
    /// Extract fields with their fallback chains
    pub fn from_entry(entry: &DirectoryEntry) -> Self {
        let username = first_value(entry, &["sAMAccountName", "uid"], "unknown");

        // givenName, else the leading token of cn
        let mut first_name = first_value(entry, &["givenName"], "");
        if first_name.is_empty() {
            first_name = first_value(entry, &["cn"], "")
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string();
        }

        let last_name = first_value(entry, &["sn"], "");
        let info = first_value(entry, &["info", "description"], "");

        Self {
            username,
            first_name,
            last_name,
            info,
        }
    }

    /// Render the four-line block
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "username := \"{}\"", single_line(&self.username))?;
        writeln!(
            f,
            "firstname := StrUpper(\"{}\")",
            single_line(&self.first_name).to_uppercase()
        )?;
        writeln!(
            f,
            "lastname := StrUpper(\"{}\")",
            single_line(&self.last_name).to_uppercase()
        )?;
        write!(f, "info := \"{}\"", single_line(&self.info))
    }
}

/// Line terminators a paste target may honor, lone CR included
const LINE_BREAKS: [char; 5] = ['\r', '\n', '\u{0B}', '\u{2028}', '\u{2029}'];

/// Collapse line breaks so every field stays on its own line
fn single_line(value: &str) -> String {
    value
        .split(LINE_BREAKS)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result row label: "<cn> (<uid>)", cn falling back to sn
pub fn display_label(entry: &DirectoryEntry) -> String {
    let name = first_value(entry, &["cn", "sn"], "");
    let uid = first_value(entry, &["uid"], "");
    format!("{} ({})", name, uid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smith() -> DirectoryEntry {
        DirectoryEntry::new("uid=jsmith,ou=people,dc=example,dc=com")
            .with_attr("givenName", ["John"])
            .with_attr("sn", ["Smith"])
            .with_attr("uid", ["jsmith"])
            .with_attr("cn", ["John Smith"])
            .with_attr("description", ["Building 4"])
    }

    #[test]
    fn renders_four_lines_in_field_order() {
        let text = Snippet::from_entry(&smith()).render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"username := "jsmith""#,
                r#"firstname := StrUpper("JOHN")"#,
                r#"lastname := StrUpper("SMITH")"#,
                r#"info := "Building 4""#,
            ]
        );
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn sam_account_name_wins_over_uid() {
        let entry = smith().with_attr("sAMAccountName", ["SMITHJ"]);
        assert_eq!(Snippet::from_entry(&entry).username, "SMITHJ");
    }

    #[test]
    fn username_defaults_to_unknown() {
        let entry = DirectoryEntry::new("cn=x").with_attr("cn", ["X Y"]);
        assert_eq!(Snippet::from_entry(&entry).username, "unknown");
    }

    #[test]
    fn first_name_falls_back_to_leading_cn_token() {
        let entry = DirectoryEntry::new("uid=tesla")
            .with_attr("cn", ["Nikola Tesla"])
            .with_attr("sn", ["Tesla"]);
        let snippet = Snippet::from_entry(&entry);
        assert_eq!(snippet.first_name, "Nikola");
        assert!(snippet.render().contains(r#"firstname := StrUpper("NIKOLA")"#));
    }

    #[test]
    fn info_prefers_info_over_description() {
        let entry = smith().with_attr("info", ["Ext. 4411"]);
        assert_eq!(Snippet::from_entry(&entry).info, "Ext. 4411");
    }

    #[test]
    fn multiline_values_stay_on_one_line() {
        let entry = smith().with_attr("info", ["line one\r\nline two\n"]);
        let text = Snippet::from_entry(&entry).render();
        assert_eq!(text.lines().count(), 4);
        assert!(text.ends_with(r#"info := "line one line two""#));
    }

    #[test]
    fn lone_carriage_returns_and_blank_lines_collapse() {
        let entry = smith().with_attr("info", ["Room 1\rBldg 2"]);
        let text = Snippet::from_entry(&entry).render();
        assert!(!text.contains('\r'));
        assert!(text.ends_with(r#"info := "Room 1 Bldg 2""#));

        let entry = DirectoryEntry::new("uid=x").with_attr("description", ["a\n\nb\u{2028}c"]);
        assert!(Snippet::from_entry(&entry)
            .render()
            .ends_with(r#"info := "a b c""#));
    }

    #[test]
    fn empty_entry_still_has_four_lines() {
        let text = Snippet::from_entry(&DirectoryEntry::new("cn=empty")).render();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with(r#"username := "unknown""#));
    }

    #[test]
    fn label_uses_cn_then_sn() {
        assert_eq!(display_label(&smith()), "John Smith (jsmith)");

        let no_cn = DirectoryEntry::new("x").with_attr("sn", ["Curie"]);
        assert_eq!(display_label(&no_cn), "Curie ()");
    }
}
