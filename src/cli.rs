// CLI module - command-line argument parsing and handlers
//
// No subcommand runs the interactive form. Subcommands:
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --init: Write the default config template (never overwrites)
// - search: Headless lookup, optionally formatting and copying one row

use crate::config::{Config, VERSION};
use crate::directory::{DirectoryEntry, LdapDirectory, SearchCriteria};
use crate::snippet::{display_label, Snippet};
use crate::tui::clipboard::{ClipboardSink, HoldingClipboard, HOLDS_UNTIL_REPLACED};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

/// ldap-clip - find a directory entry by name and copy a formatted snippet
#[derive(Parser)]
#[command(name = "ldap-clip")]
#[command(version = VERSION)]
#[command(
    about = "Fuzzy LDAP name search that copies a formatted snippet to the clipboard",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },

    /// Search without the form and print the results
    Search {
        /// First name fragment (matched against cn)
        #[arg(long)]
        first: String,

        /// Last name fragment (matched against sn)
        #[arg(long)]
        last: String,

        /// Format row N (1-based) and copy it
        #[arg(long, value_name = "N")]
        select: Option<usize>,

        /// Print entries as JSON instead of labels
        #[arg(long)]
        json: bool,

        /// Print the snippet without touching the clipboard
        #[arg(long)]
        no_copy: bool,
    },
}

/// Handle `config`; exits non-zero on failure
pub fn handle_config(show: bool, path: bool, init: bool) {
    if path {
        handle_config_path();
    } else if show {
        handle_config_show();
    } else if init {
        handle_config_init();
    } else {
        // No flag provided, show help
        println!("Usage: ldap-clip config [--show|--path|--init]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --path    Show config file path");
        println!("  --init    Write a default config file (keeps an existing one)");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_init() {
    match Config::ensure_config_exists() {
        Ok((path, true)) => println!("Created config file: {}", path.display()),
        Ok((path, false)) => println!("Config file already exists: {}", path.display()),
        Err(e) => {
            eprintln!("Error writing config: {}", e);
            std::process::exit(1);
        }
    }
}

/// Options for a headless search
#[derive(Debug, Clone)]
pub struct SearchArgs {
    pub first: String,
    pub last: String,
    pub select: Option<usize>,
    pub json: bool,
    pub no_copy: bool,
}

/// Run one search and print the outcome to stdout
pub async fn run_search(directory: &LdapDirectory, args: SearchArgs) -> Result<()> {
    let Some(criteria) = SearchCriteria::new(&args.first, &args.last) else {
        bail!("Please enter both First Name and Last Name.");
    };

    let entries = directory
        .search(&criteria)
        .await
        .context("LDAP search failed")?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).context("Failed to encode entries")?
        );
    } else if entries.is_empty() {
        println!("No matching entries");
    } else {
        for (i, entry) in entries.iter().enumerate() {
            println!("{:>3}. {}", i + 1, display_label(entry));
        }
    }

    let Some(row) = args.select else {
        return Ok(());
    };

    let text = snippet_for_row(&entries, row)?;

    println!();
    println!("{}", text);

    if args.no_copy {
        return Ok(());
    }

    if HOLDS_UNTIL_REPLACED {
        eprintln!("Holding the snippet on the clipboard until another program replaces it (Ctrl+C to stop)");
    }
    let copy = tokio::task::spawn_blocking(move || {
        let mut clipboard = HoldingClipboard;
        copy_snippet(&mut clipboard, &text)
    });
    copy.await.context("Clipboard task failed")??;
    tracing::info!(row, "Copied snippet to clipboard");
    if !HOLDS_UNTIL_REPLACED {
        eprintln!("Text copied to clipboard.");
    }

    Ok(())
}

/// Render the snippet for a 1-based row
fn snippet_for_row(entries: &[DirectoryEntry], row: usize) -> Result<String> {
    let entry = row
        .checked_sub(1)
        .and_then(|i| entries.get(i))
        .with_context(|| format!("Row {} is out of range (1-{})", row, entries.len()))?;
    Ok(Snippet::from_entry(entry).render())
}

fn copy_snippet(clipboard: &mut dyn ClipboardSink, text: &str) -> Result<()> {
    clipboard.copy(text).context("Failed to copy snippet")
}
