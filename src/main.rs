// ldap-clip - directory name lookup that copies a formatted snippet
//
// Architecture:
// - Config: env (.env included) > config file > defaults
// - Directory: one ldap3 connection per search (bind, subtree search, unbind)
// - Snippet: four-line template built from the selected entry
// - TUI (ratatui): name form, results list, output pane, system logs
// - Searches run on spawned tasks and report back over an mpsc channel

mod cli;
mod config;
mod directory;
mod error;
mod logging;
mod snippet;
mod theme;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, SearchArgs};
use config::{Config, LogRotation, LoggingConfig};
use directory::LdapDirectory;
use logging::{LogBuffer, TuiLogLayer};
use std::io::IsTerminal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use tui::app::{App, Identity};
use tui::clipboard::SystemClipboard;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Config commands don't need a directory connection
    if let Some(Commands::Config { show, path, init }) = cli.command {
        cli::handle_config(show, path, init);
        return;
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let search = match cli.command {
        Some(Commands::Search {
            first,
            last,
            select,
            json,
            no_copy,
        }) => Some(SearchArgs {
            first,
            last,
            select,
            json,
            no_copy,
        }),
        _ => None,
    };

    // In form mode logs go to the in-memory buffer so they never garble the screen
    let form_mode = search.is_none();
    let log_buffer = LogBuffer::new();
    let file_guard = init_tracing(&config.logging, form_mode, &log_buffer);

    let settings = match config.directory_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "Incomplete directory configuration");
            eprintln!("Configuration error: {}", e);
            drop(file_guard);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config, settings, search, log_buffer).await {
        tracing::error!(error = %e, "Fatal error");
        eprintln!("Error: {:#}", e);
        drop(file_guard);
        wait_for_enter(form_mode);
        std::process::exit(1);
    }
}

async fn run(
    config: Config,
    settings: directory::DirectorySettings,
    search: Option<SearchArgs>,
    log_buffer: LogBuffer,
) -> Result<()> {
    let prompt = format!("LDAP password for {}: ", settings.username);
    let password = rpassword::prompt_password(prompt).context("Failed to read password")?;

    let directory = LdapDirectory::new(settings, password);
    let settings = directory.settings();

    tracing::info!(
        url = %settings.url(),
        user = %settings.username,
        base = %settings.search_base,
        "Directory configured"
    );
    if settings.use_ssl && !settings.tls_verify {
        tracing::warn!("TLS certificate verification is disabled");
    }

    match search {
        Some(args) => cli::run_search(&directory, args).await,
        None => {
            let app = App::new(
                log_buffer,
                theme::Theme::by_name(&config.theme),
                Identity::from(directory.settings()),
                Box::new(SystemClipboard),
            );
            tui::run_tui(app, directory).await
        }
    }
}

/// Initialize tracing
///
/// Form mode captures into the log buffer; headless mode writes to stderr.
/// File logging (JSON, rotating) is added on top when enabled. The returned
/// guard must live until exit so buffered lines are flushed.
///
/// Precedence: RUST_LOG env var > config file / LDAP_CLIP_LOG > default "info"
fn init_tracing(
    logging: &LoggingConfig,
    form_mode: bool,
    log_buffer: &LogBuffer,
) -> Option<WorkerGuard> {
    let default_filter = format!("ldap_clip={},ldap3=warn", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let console = if form_mode {
        TuiLogLayer::new(log_buffer.clone()).boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = match file_writer(logging) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    guard
}

/// Rolling, non-blocking file writer when file logging is enabled
fn file_writer(
    logging: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    Some(tracing_appender::non_blocking(appender))
}

/// Keep the form's error on screen when launched from a desktop shortcut
fn wait_for_enter(form_mode: bool) {
    if pause_on_error(form_mode, std::io::stdin().is_terminal()) {
        eprintln!("Press Enter to exit...");
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
    }
}

/// Scripted searches exit straight away; only the form pauses
fn pause_on_error(form_mode: bool, stdin_is_terminal: bool) -> bool {
    form_mode && stdin_is_terminal
}
