//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Quote a string as a TOML basic string
fn quoted(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// `key = "value"`, or a commented example line when unset
fn optional_line(key: &str, value: Option<&str>, example: &str) -> String {
    match value {
        Some(v) => format!("{} = {}", key, quoted(v)),
        None => format!("# {} = {}", key, quoted(example)),
    }
}

impl Config {
    /// Template written by `config --init`
    pub fn default_template() -> String {
        Self::default().to_toml()
    }

    /// Render this configuration in config-file form
    pub fn to_toml(&self) -> String {
        let ldap = &self.ldap;
        let extra: Vec<String> = ldap.extra_attributes.iter().map(|a| quoted(a)).collect();

        format!(
            r#"# ldap-clip configuration
#
# Environment variables (LDAP_SERVER, LDAP_USERNAME, LDAP_SEARCH_BASE,
# LDAP_PORT, LDAP_USE_SSL, LDAP_TLS_VERIFY) override values in this file.

# Theme: dark, light, terminal
theme = {theme}

[ldap]
{server}
{username}
{search_base}
port = {port}
use_ssl = {use_ssl}
# Verify the server certificate when use_ssl = true
tls_verify = {tls_verify}
# Requested in addition to givenName, sn, uid, cn.
# sAMAccountName, info and description feed the username/info lines.
extra_attributes = [{extra}]

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to the log pane or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = {log_file_rotation}  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            theme = quoted(&self.theme),
            server = optional_line("server", ldap.server.as_deref(), "ldap.example.com"),
            username = optional_line(
                "username",
                ldap.username.as_deref(),
                "cn=reader,dc=example,dc=com"
            ),
            search_base = optional_line(
                "search_base",
                ldap.search_base.as_deref(),
                "dc=example,dc=com"
            ),
            port = ldap.port,
            use_ssl = ldap.use_ssl,
            tls_verify = ldap.tls_verify,
            extra = extra.join(", "),
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = quoted(self.logging.file_rotation.as_str()),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
