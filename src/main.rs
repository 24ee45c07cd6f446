use anyhow::Result;
use clap::{Parser, Subcommand};

use jupysec::cli;

#[derive(Debug, Parser)]
#[command(name = "jupysec")]
#[command(about = "Terminal client for the jupysec security scorecard extension")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Activate the plugin and open the security report in a browser
    Open,
    /// Ping the scorecard refresh endpoint once and print the result
    Refresh,
    /// Check config and server reachability
    Health,
    /// Show recent refresh outcomes from the refresh log
    History {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
        /// Only show the most recent N entries
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective merged configuration
    Show,
    /// Write the default config to ~/.jupysec/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a single value, e.g. `jupysec config set server.base_url http://box:8888/`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Open => cli::run_open(),
        Commands::Refresh => cli::run_refresh(),
        Commands::Health => cli::run_health(),
        Commands::History { format, limit } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_history(fmt, limit)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
