//! In-process host capabilities for the terminal client.
//!
//! `jupysec open` has no JupyterLab shell to hand the panel to, so the
//! binary registers the plugin against these implementations: bookkeeping
//! tables for commands, palette, and launcher, plus a shell that "inserts"
//! the panel by opening its URL in the system default browser.

use std::collections::HashMap;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::panel::ReportPanel;
use crate::plugin::{CommandPalette, CommandRegistry, CommandSpec, Launcher, Shell, ShellArea};

// ---------------------------------------------------------------------------
// Bookkeeping capability implementations
// ---------------------------------------------------------------------------

/// Command registry backed by a plain map.
#[derive(Debug, Default)]
pub struct CommandTable {
    pub commands: HashMap<String, CommandSpec>,
}

impl CommandRegistry for CommandTable {
    fn add_command(&mut self, id: &str, spec: CommandSpec) {
        self.commands.insert(id.to_string(), spec);
    }
}

/// Palette entries as `(command, category)` pairs.
#[derive(Debug, Default)]
pub struct PaletteEntries {
    pub items: Vec<(String, String)>,
}

impl CommandPalette for PaletteEntries {
    fn add_item(&mut self, command: &str, category: &str) {
        self.items.push((command.to_string(), category.to_string()));
    }
}

/// Launcher tiles as `(command, category)` pairs.
#[derive(Debug, Default)]
pub struct LauncherTiles {
    pub items: Vec<(String, String)>,
}

impl Launcher for LauncherTiles {
    fn add_item(&mut self, command: &str, category: &str) {
        self.items.push((command.to_string(), category.to_string()));
    }
}

/// The terminal host: all capability tables in one place, with fields
/// borrowable independently for [`crate::plugin::Capabilities`].
#[derive(Debug, Default)]
pub struct TerminalHost {
    pub commands: CommandTable,
    pub palette: PaletteEntries,
    pub launcher: LauncherTiles,
}

// ---------------------------------------------------------------------------
// Browser shell
// ---------------------------------------------------------------------------

/// Shell that shows a panel by opening its source URL in the default
/// browser.
#[derive(Debug, Default)]
pub struct BrowserShell {
    /// URLs handed to the browser, newest last.
    pub opened: Vec<String>,
}

impl Shell for BrowserShell {
    fn add(&mut self, panel: &ReportPanel, _area: ShellArea) {
        println!(
            "{} opening {} — {}",
            "→".cyan().bold(),
            panel.title.bold(),
            panel.url
        );
        if let Err(err) = open_browser(&panel.url) {
            eprintln!("{} could not open a browser: {err:#}", "✗".red().bold());
            eprintln!("  open this URL manually: {}", panel.url);
        }
        self.opened.push(panel.url.clone());
    }
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
