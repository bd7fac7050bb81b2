//! Configuration tests
//!
//! Environment lookups are injected through `Config::from_sources` so these
//! tests never touch the process environment.

use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn required_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("LDAP_SERVER", "ldap.forumsys.com"),
        ("LDAP_USERNAME", "cn=read-only-admin,dc=example,dc=com"),
        ("LDAP_SEARCH_BASE", "dc=example,dc=com"),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// The template written by `config --init` must parse back.
#[test]
fn test_config_roundtrip_default() {
    let toml_str = Config::default_template();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    // Unset required values are written as comments, not empty strings
    let file = parsed.unwrap();
    let ldap = file.ldap.expect("[ldap] section should be present");
    assert!(ldap.server.is_none());
    assert_eq!(ldap.port, Some(DEFAULT_PORT));
}

#[test]
fn test_config_roundtrip_populated() {
    let mut config = Config::default();
    config.ldap.server = Some("ldap.example.com".to_string());
    config.ldap.username = Some(r#"EXAMPLE\reader "svc""#.to_string());
    config.ldap.search_base = Some("ou=people,dc=example,dc=com".to_string());
    config.ldap.port = 636;
    config.ldap.use_ssl = true;
    config.ldap.extra_attributes = vec!["sAMAccountName".to_string(), "info".to_string()];
    config.logging.file_rotation = LogRotation::Hourly;

    let toml_str = config.to_toml();
    let file: FileConfig = toml::from_str(&toml_str)
        .unwrap_or_else(|e| panic!("should parse:\n{}\n{}", toml_str, e));

    let reloaded = Config::from_sources(file, env_from(&[])).unwrap();
    assert_eq!(reloaded.ldap.server, config.ldap.server);
    assert_eq!(reloaded.ldap.username, config.ldap.username);
    assert_eq!(reloaded.ldap.search_base, config.ldap.search_base);
    assert_eq!(reloaded.ldap.port, 636);
    assert!(reloaded.ldap.use_ssl);
    assert_eq!(reloaded.ldap.extra_attributes, config.ldap.extra_attributes);
    assert_eq!(reloaded.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_defaults_without_sources() {
    let config = Config::from_sources(FileConfig::default(), env_from(&[])).unwrap();
    assert_eq!(config.ldap.port, 389);
    assert!(!config.ldap.use_ssl);
    assert!(!config.ldap.tls_verify);
    assert_eq!(config.theme, DEFAULT_THEME);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_unset_theme_matches_default_config() {
    let config = Config::from_sources(FileConfig::default(), env_from(&[])).unwrap();
    assert_eq!(config.theme, Config::default().theme);
}

#[test]
fn test_use_ssl_truthy_values() {
    for value in ["true", "TRUE", "1", "t", "T", " True "] {
        let config =
            Config::from_sources(FileConfig::default(), env_from(&[("LDAP_USE_SSL", value)]))
                .unwrap();
        assert!(config.ldap.use_ssl, "{:?} should be truthy", value);
    }
    for value in ["false", "0", "yes", "on", "f"] {
        let config =
            Config::from_sources(FileConfig::default(), env_from(&[("LDAP_USE_SSL", value)]))
                .unwrap();
        assert!(!config.ldap.use_ssl, "{:?} should be falsy", value);
    }
}

#[test]
fn test_port_parsing() {
    let config =
        Config::from_sources(FileConfig::default(), env_from(&[("LDAP_PORT", "636")])).unwrap();
    assert_eq!(config.ldap.port, 636);

    for bad in ["abc", "70000", "0", "-1"] {
        let err = Config::from_sources(FileConfig::default(), env_from(&[("LDAP_PORT", bad)]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort(bad.to_string()));
    }
}

#[test]
fn test_blank_port_falls_back_to_default() {
    let config =
        Config::from_sources(FileConfig::default(), env_from(&[("LDAP_PORT", "  ")])).unwrap();
    assert_eq!(config.ldap.port, DEFAULT_PORT);
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
theme = "light"
[ldap]
server = "file.example.com"
username = "file-user"
search_base = "dc=file"
port = 10389
use_ssl = true
"#,
    )
    .unwrap();

    let config = Config::from_sources(
        file,
        env_from(&[
            ("LDAP_SERVER", "env.example.com"),
            ("LDAP_USE_SSL", "false"),
            ("LDAP_CLIP_THEME", "terminal"),
        ]),
    )
    .unwrap();

    assert_eq!(config.ldap.server.as_deref(), Some("env.example.com"));
    assert_eq!(config.ldap.username.as_deref(), Some("file-user"));
    assert_eq!(config.ldap.port, 10389);
    assert!(!config.ldap.use_ssl);
    assert_eq!(config.theme, "terminal");
}

#[test]
fn test_log_level_env_override() {
    let config = Config::from_sources(
        FileConfig::default(),
        env_from(&[("LDAP_CLIP_LOG", "debug")]),
    )
    .unwrap();
    assert_eq!(config.logging.level, "debug");
}

// ─────────────────────────────────────────────────────────────────────────────
// Required settings
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_directory_settings_complete() {
    let config = Config::from_sources(FileConfig::default(), env_from(&required_env())).unwrap();
    let settings = config.directory_settings().unwrap();
    assert_eq!(settings.server, "ldap.forumsys.com");
    assert_eq!(settings.search_base, "dc=example,dc=com");
    assert_eq!(settings.port, 389);
}

#[test]
fn test_directory_settings_reports_all_missing() {
    let config = Config::from_sources(FileConfig::default(), env_from(&[])).unwrap();
    assert_eq!(
        config.directory_settings().unwrap_err(),
        ConfigError::Missing(vec!["LDAP_SERVER", "LDAP_USERNAME", "LDAP_SEARCH_BASE"])
    );
}

#[test]
fn test_blank_required_value_counts_as_missing() {
    let mut env = required_env();
    env.retain(|(k, _)| *k != "LDAP_USERNAME");
    env.push(("LDAP_USERNAME", "   "));

    let config = Config::from_sources(FileConfig::default(), env_from(&env)).unwrap();
    assert_eq!(
        config.directory_settings().unwrap_err(),
        ConfigError::Missing(vec!["LDAP_USERNAME"])
    );
}
