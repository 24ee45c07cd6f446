//! CLI command implementations for the jupysec terminal client.
//!
//! Provides subcommand handlers for:
//! - `jupysec open` — activate the plugin and show the report page
//! - `jupysec refresh` — ping the scorecard endpoint once
//! - `jupysec health` — check config and server reachability
//! - `jupysec history` — recent refresh outcomes from the refresh log
//! - `jupysec config show|init|set|reset` — configuration management

use std::time::Instant;

use anyhow::Result;
use colored::Colorize;

use crate::api::{ApiClient, ParsedBody, SCORECARD_ENDPOINT, ServerSettings};
use crate::config;
use crate::host::{BrowserShell, TerminalHost};
use crate::panel::summarize_body;
use crate::plugin::{Capabilities, JupysecPlugin};
use crate::refresh_log::{self, RefreshLogEntry};

/// Output format for list commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// jupysec open
// ---------------------------------------------------------------------------

/// Activate the plugin against the terminal host and open the report.
///
/// Mirrors what a host application does at startup: inject capabilities,
/// activate, then execute the registered command. The browser shell shows
/// the report page.
pub fn run_open() -> Result<()> {
    let cfg = config::load();
    let plugin = JupysecPlugin::new(&cfg);

    let mut host = TerminalHost::default();
    let mut caps = Capabilities {
        commands: &mut host.commands,
        palette: &mut host.palette,
        launcher: Some(&mut host.launcher),
    };
    plugin.activate(&mut caps);

    let mut shell = BrowserShell::default();
    let panel = plugin.open_report(&mut shell);

    println!();
    println!(
        "  {} {} command(s), {} palette entr(ies), {} launcher tile(s) registered",
        "·".dimmed(),
        host.commands.commands.len(),
        host.palette.items.len(),
        host.launcher.items.len(),
    );
    println!("  {} report page: {}", "·".dimmed(), panel.url);

    Ok(())
}

// ---------------------------------------------------------------------------
// jupysec refresh
// ---------------------------------------------------------------------------

/// Ping the scorecard refresh endpoint once and print the result.
///
/// Unlike a panel refresh this surfaces the failure to the exit code —
/// a human at a terminal wants to know.
pub fn run_refresh() -> Result<()> {
    let cfg = config::load();
    let client = ApiClient::new(ServerSettings::from_config(&cfg));
    let target = client.endpoint_url(SCORECARD_ENDPOINT);

    let start = Instant::now();
    let outcome = client.get(SCORECARD_ENDPOINT);
    let latency_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(body) => {
            println!(
                "{} scorecard refresh requested ({latency_ms} ms)",
                "✓".green().bold()
            );
            match &body {
                ParsedBody::Json(value) => println!("{}", serde_json::to_string_pretty(value)?),
                ParsedBody::Text(text) => println!("{text}"),
                ParsedBody::Empty => println!("{}", "(empty response)".dimmed()),
            }
            refresh_log::record(&RefreshLogEntry::success(
                SCORECARD_ENDPOINT,
                &target,
                summarize_body(&body),
                latency_ms,
            ));
            Ok(())
        }
        Err(err) => {
            refresh_log::record(&RefreshLogEntry::failure(
                SCORECARD_ENDPOINT,
                &target,
                err.status(),
                err.message(),
                latency_ms,
            ));
            Err(anyhow::Error::new(err).context("scorecard refresh failed"))
        }
    }
}

// ---------------------------------------------------------------------------
// jupysec health
// ---------------------------------------------------------------------------

/// Check config and server reachability.
pub fn run_health() -> Result<()> {
    println!("{}", "jupysec Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    // 0. Config file status
    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.jupysec/config.toml found"
        } else {
            "not found (run `jupysec config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".jupysec.toml found"
        } else {
            "none (optional)"
        },
    );
    print_health_item("Server", true, &cfg.server.base_url);
    let token_set = !cfg.server.token.is_empty();
    print_health_item(
        "Token",
        token_set,
        if token_set {
            "set"
        } else {
            "not set (fine for unauthenticated servers)"
        },
    );

    // 1. Extension reachability — ping the namespace root. A response with
    // any status means the server is up; only a transport failure counts
    // as unreachable.
    let client = ApiClient::new(ServerSettings::from_config(&cfg));
    let (reachable, detail) = match client.get("") {
        Ok(_) => (true, "extension responded at namespace root".to_string()),
        Err(err) if err.is_network() => (
            false,
            "not reachable — is the Jupyter server running?".to_string(),
        ),
        Err(err) => (
            true,
            format!(
                "server up (status {} at namespace root)",
                err.status().unwrap_or(0)
            ),
        ),
    };
    print_health_item("Extension", reachable, &detail);

    // 2. Refresh log
    let log_exists = refresh_log::refresh_log_path()
        .map(|p| p.exists())
        .unwrap_or(false);
    let log_detail = if log_exists {
        format!("{} entries", refresh_log::read_all_entries().len())
    } else {
        "no log file yet".to_string()
    };
    print_health_item("Refresh log", log_exists, &log_detail);

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<15} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// jupysec history
// ---------------------------------------------------------------------------

/// Show recent refresh outcomes, newest first.
pub fn run_history(format: OutputFormat, limit: usize) -> Result<()> {
    let entries = refresh_log::read_all_entries();

    if entries.is_empty() {
        println!(
            "{}",
            "No refresh history yet. Run `jupysec refresh` or open the report.".yellow()
        );
        return Ok(());
    }

    let recent: Vec<&RefreshLogEntry> = entries.iter().rev().take(limit).collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&recent)?);
        }
        OutputFormat::Table => print_history_table(&recent),
    }

    Ok(())
}

fn print_history_table(entries: &[&RefreshLogEntry]) {
    println!("{}", "jupysec Refresh History".bold().cyan());
    println!("{}", "=".repeat(72));
    println!(
        "  {:<20} {:>2} {:>6} {:>8} Detail",
        "Timestamp", "", "Status", "Latency"
    );
    println!("  {}", "-".repeat(70));

    for (i, entry) in entries.iter().enumerate() {
        let mark = if entry.success {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        let status = entry
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "—".to_string());
        let line = format!(
            "{:<20} {:>6} {:>6}ms {}",
            &entry.timestamp[..entry.timestamp.len().min(19)],
            status,
            entry.latency_ms,
            entry.detail,
        );
        if i % 2 == 0 {
            println!("  {mark} {line}");
        } else {
            println!("  {mark} {}", line.dimmed());
        }
    }
}

// ---------------------------------------------------------------------------
// jupysec config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective jupysec Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    if global_exists {
        println!("  {} {}", "✓".green(), "~/.jupysec/config.toml".dimmed());
    } else {
        println!(
            "  {} {}",
            "·".dimmed(),
            "~/.jupysec/config.toml (not found)".dimmed()
        );
    }
    if project_exists {
        println!("  {} {}", "✓".green(), ".jupysec.toml".dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), ".jupysec.toml (not found)".dimmed());
    }
    println!(
        "  {} {}",
        "·".dimmed(),
        "JUPYSEC_* environment variables".dimmed()
    );

    Ok(())
}

/// Initialize a default config file at `~/.jupysec/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!(
        "  {}",
        "Edit the file to point at your Jupyter server.".dimmed()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str_opt(Some("unknown")),
            OutputFormat::Table
        );
    }
}
