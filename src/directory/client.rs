//! LDAP client adapter: one connection, one bind, one search
//!
//! Every search opens its own connection and unbinds afterwards. There is
//! no pooling, no retry, and no timeout beyond the library defaults.

use super::{build_filter, DirectoryEntry, DirectorySettings, SearchCriteria};
use crate::error::DirectoryError;
use ldap3::{LdapConnAsync, LdapConnSettings, Scope, SearchEntry};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// LDAP result code for sizeLimitExceeded: entries up to the limit are valid
const RC_SIZE_LIMIT_EXCEEDED: u32 = 4;

/// Directory handle shared with background search tasks
#[derive(Clone)]
pub struct LdapDirectory {
    settings: Arc<DirectorySettings>,
    password: Arc<String>,
}

impl LdapDirectory {
    /// `password` is the bind credential captured once at startup
    pub fn new(settings: DirectorySettings, password: String) -> Self {
        Self {
            settings: Arc::new(settings),
            password: Arc::new(password),
        }
    }

    pub fn settings(&self) -> &DirectorySettings {
        &self.settings
    }

    /// Bind and run one fuzzy person search, returning entries in server order
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        let url = self.settings.url();
        let filter = build_filter(criteria);
        let attributes = self.settings.attributes();

        debug!(url = %url, "Connecting to LDAP server");

        let conn_settings = LdapConnSettings::new().set_no_tls_verify(!self.settings.tls_verify);
        let (conn, mut ldap) = LdapConnAsync::with_settings(conn_settings, &url).await?;

        // Drive the connection in the background until the handle is dropped
        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                warn!(error = %e, "LDAP connection driver error");
            }
        });

        let bind = ldap
            .simple_bind(&self.settings.username, &self.password)
            .await?;
        if bind.rc != 0 {
            return Err(DirectoryError::Bind {
                code: bind.rc,
                message: if bind.text.is_empty() {
                    ldap_result_name(bind.rc).to_string()
                } else {
                    bind.text
                },
            });
        }
        debug!(username = %self.settings.username, "LDAP bind successful");

        let result = ldap
            .search(&self.settings.search_base, Scope::Subtree, &filter, attributes)
            .await;

        // Unbind regardless of the search outcome; a failed unbind changes nothing
        if let Err(e) = ldap.unbind().await {
            debug!(error = %e, "LDAP unbind failed");
        }

        let ldap3::SearchResult(raw_entries, status) = result?;
        match status.rc {
            0 => {}
            RC_SIZE_LIMIT_EXCEEDED => warn!(
                returned = raw_entries.len(),
                "Size limit exceeded, showing partial results"
            ),
            _ => {
                status.success()?;
            }
        }

        let entries: Vec<DirectoryEntry> = raw_entries
            .into_iter()
            .map(SearchEntry::construct)
            .map(DirectoryEntry::from)
            .collect();

        info!(
            filter = %filter,
            count = entries.len(),
            "LDAP search completed"
        );

        Ok(entries)
    }
}

/// Readable name for the bind result codes users actually hit
fn ldap_result_name(rc: u32) -> &'static str {
    match rc {
        7 => "authMethodNotSupported",
        8 => "strongerAuthRequired",
        13 => "confidentialityRequired",
        48 => "inappropriateAuthentication",
        49 => "invalidCredentials",
        50 => "insufficientAccessRights",
        51 => "busy",
        52 => "unavailable",
        53 => "unwillingToPerform",
        _ => "unexpected result",
    }
}
