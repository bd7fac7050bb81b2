//! Error types shared across modules
//!
//! Configuration errors are fatal at startup. Directory errors end a single
//! search and are shown to the user; the form stays usable.

use thiserror::Error;

/// Configuration could not be turned into usable directory settings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required settings are unset or blank
    #[error("{} must be set (environment, .env file, or config file)", join_names(.0))]
    Missing(Vec<&'static str>),

    /// LDAP_PORT / [ldap].port is not a valid port number
    #[error("invalid LDAP port {0:?}")]
    InvalidPort(String),
}

/// A directory search failed
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The server rejected the bind (rc 49 = invalid credentials)
    #[error("bind failed with code {code}: {message}")]
    Bind { code: u32, message: String },

    /// Transport, TLS, or protocol failure reported by the client library
    #[error(transparent)]
    Protocol(#[from] ldap3::LdapError),
}

/// "A", "A and B", "A, B, and C"
fn join_names(names: &[&'static str]) -> String {
    match names {
        [] => String::new(),
        [one] => (*one).to_string(),
        [a, b] => format!("{} and {}", a, b),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}
