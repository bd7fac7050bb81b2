//! Configuration for the directory lookup
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority, `.env` in the working directory included)
//! 2. Config file (~/.config/ldap-clip/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::directory::DirectorySettings;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod serialization;

#[cfg(test)]
mod tests;

pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Standard LDAP port, used when nothing else is configured
pub const DEFAULT_PORT: u16 = 389;

/// Palette used when neither env nor file picks one
pub const DEFAULT_THEME: &str = "dark";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory server connection settings
    pub ldap: LdapConfig,

    /// Theme name: "dark", "light", "terminal"
    pub theme: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ldap: LdapConfig::default(),
            theme: DEFAULT_THEME.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Directory connection settings as configured (required fields may be unset)
#[derive(Debug, Clone)]
pub struct LdapConfig {
    /// Server host name (a leading ldap:// or ldaps:// is tolerated)
    pub server: Option<String>,
    /// Bind username (DN or UPN, whatever the server accepts)
    pub username: Option<String>,
    /// Search base DN
    pub search_base: Option<String>,
    pub port: u16,
    /// Connect with ldaps://
    pub use_ssl: bool,
    /// Verify the server certificate on TLS connections
    pub tls_verify: bool,
    /// Attributes requested in addition to givenName, sn, uid, cn
    pub extra_attributes: Vec<String>,
}

impl Default for LdapConfig {
    fn default() -> Self {
        Self {
            server: None,
            username: None,
            search_base: None,
            port: DEFAULT_PORT,
            use_ssl: false,
            tls_verify: false,
            extra_attributes: Vec::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,

    /// Optional [ldap] section
    pub ldap: Option<FileLdap>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// [ldap] section as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileLdap {
    pub server: Option<String>,
    pub username: Option<String>,
    pub search_base: Option<String>,
    pub port: Option<u16>,
    pub use_ssl: Option<bool>,
    pub tls_verify: Option<bool>,
    pub extra_attributes: Option<Vec<String>>,
}

/// Truthy strings accepted for boolean environment flags
fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "t")
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/ldap-clip/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("ldap-clip").join("config.toml"))
    }

    /// Write the default template if no config file exists yet.
    /// Returns the path and whether a file was created.
    pub fn ensure_config_exists() -> std::io::Result<(PathBuf, bool)> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine home directory",
            )
        })?;

        // Don't overwrite existing config
        if path.exists() {
            return Ok((path, false));
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, Self::default_template())?;
        Ok((path, true))
    }

    /// Load file config if it exists
    ///
    /// A file that exists but cannot be read or parsed is fatal: the process
    /// exits with a clear message rather than silently using defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Invalid boolean values (use true/false)");
                    eprintln!("    - Port numbers outside 1-65535");
                    eprintln!("    - Typos in section names\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: .env -> file -> env vars -> defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is the normal case; variables already set win
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => eprintln!("Warning: could not load .env file: {}", e),
        }

        let file = Self::load_file_config();
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with an environment lookup
    pub(crate) fn from_sources(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        // Blank environment values count as unset
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let file_ldap = file.ldap.unwrap_or_default();

        let port = match env("LDAP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or(ConfigError::InvalidPort(raw))?,
            None => match file_ldap.port {
                Some(0) => return Err(ConfigError::InvalidPort("0".to_string())),
                Some(p) => p,
                None => DEFAULT_PORT,
            },
        };

        let ldap = LdapConfig {
            server: env("LDAP_SERVER").or(file_ldap.server),
            username: env("LDAP_USERNAME").or(file_ldap.username),
            search_base: env("LDAP_SEARCH_BASE").or(file_ldap.search_base),
            port,
            use_ssl: env("LDAP_USE_SSL")
                .map(|v| is_truthy(&v))
                .or(file_ldap.use_ssl)
                .unwrap_or(false),
            tls_verify: env("LDAP_TLS_VERIFY")
                .map(|v| is_truthy(&v))
                .or(file_ldap.tls_verify)
                .unwrap_or(false),
            extra_attributes: file_ldap.extra_attributes.unwrap_or_default(),
        };

        let theme = env("LDAP_CLIP_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env("LDAP_CLIP_LOG") {
            logging.level = level;
        }

        Ok(Self {
            ldap,
            theme,
            logging,
        })
    }

    /// Resolve the settings a search needs, listing every missing one
    pub fn directory_settings(&self) -> Result<DirectorySettings, ConfigError> {
        fn present(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        let server = present(&self.ldap.server);
        let username = present(&self.ldap.username);
        let search_base = present(&self.ldap.search_base);

        let mut missing = Vec::new();
        if server.is_none() {
            missing.push("LDAP_SERVER");
        }
        if username.is_none() {
            missing.push("LDAP_USERNAME");
        }
        if search_base.is_none() {
            missing.push("LDAP_SEARCH_BASE");
        }

        match (server, username, search_base) {
            (Some(server), Some(username), Some(search_base)) => Ok(DirectorySettings {
                server,
                username,
                search_base,
                port: self.ldap.port,
                use_ssl: self.ldap.use_ssl,
                tls_verify: self.ldap.tls_verify,
                extra_attributes: self.ldap.extra_attributes.clone(),
            }),
            _ => Err(ConfigError::Missing(missing)),
        }
    }
}
