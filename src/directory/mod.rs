//! Directory access: search criteria, entries, and the LDAP client
//!
//! The form and the headless CLI only ever see the plain-data types here
//! ([`SearchCriteria`], [`DirectoryEntry`]); the network lives in [`client`].

pub mod client;
pub mod extract;
pub mod filter;

pub use client::LdapDirectory;
pub use extract::first_value;
pub use filter::build_filter;

use serde::Serialize;
use std::collections::BTreeMap;

/// Attributes every search requests
pub const BASE_ATTRIBUTES: [&str; 4] = ["givenName", "sn", "uid", "cn"];

/// Resolved connection settings (all required values present)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySettings {
    pub server: String,
    pub username: String,
    pub search_base: String,
    pub port: u16,
    pub use_ssl: bool,
    pub tls_verify: bool,
    pub extra_attributes: Vec<String>,
}

impl DirectorySettings {
    /// Connection URL; a scheme already present on `server` is replaced
    pub fn url(&self) -> String {
        let host = self
            .server
            .trim()
            .trim_start_matches("ldaps://")
            .trim_start_matches("ldap://")
            .trim_end_matches('/');
        let scheme = if self.use_ssl { "ldaps" } else { "ldap" };
        format!("{}://{}:{}", scheme, host, self.port)
    }

    /// Attribute projection: the base four, then configured extras (deduplicated)
    pub fn attributes(&self) -> Vec<String> {
        let mut attrs: Vec<String> = BASE_ATTRIBUTES.iter().map(|a| a.to_string()).collect();
        for extra in &self.extra_attributes {
            let extra = extra.trim();
            if !extra.is_empty() && !attrs.iter().any(|a| a.eq_ignore_ascii_case(extra)) {
                attrs.push(extra.to_string());
            }
        }
        attrs
    }
}

/// First/last name fragments typed into the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub first_name: String,
    pub last_name: String,
}

impl SearchCriteria {
    /// Trimmed criteria, or `None` when either fragment is blank
    pub fn new(first_name: &str, last_name: &str) -> Option<Self> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return None;
        }
        Some(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }
}

/// One record returned by a search
///
/// Attribute names are case-insensitive in LDAP; they are stored lower-cased
/// and looked up the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub dn: String,
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl DirectoryEntry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder used by tests and the client conversion
    pub fn with_attr<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.attributes
            .entry(name.to_lowercase())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// All values of an attribute, in server order
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.attributes
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
    }
}

impl From<ldap3::SearchEntry> for DirectoryEntry {
    fn from(entry: ldap3::SearchEntry) -> Self {
        entry
            .attrs
            .into_iter()
            .fold(DirectoryEntry::new(entry.dn), |acc, (name, values)| {
                acc.with_attr(&name, values)
            })
    }
}
