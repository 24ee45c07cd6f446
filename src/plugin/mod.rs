//! Plugin surface: capability interfaces and the activation entry point.
//!
//! The host application owns command registration, the palette, the
//! launcher, and the display shell. It injects those capabilities at
//! activation time; nothing here reimplements the host's plugin discovery
//! or widget machinery. The `jupysec` binary ships its own terminal-host
//! implementations in [`crate::host`].

use colored::Colorize;

use crate::api::{ApiClient, SCORECARD_ENDPOINT, ServerSettings};
use crate::config::JupysecConfig;
use crate::panel::ReportPanel;

/// Identifier of the single command this plugin registers.
pub const COMMAND_OPEN_REPORT: &str = "jupysec:security-report";

/// Command label and caption.
pub const COMMAND_LABEL: &str = "Security Report";

/// Palette and launcher category.
pub const CATEGORY: &str = "Security";

// ---------------------------------------------------------------------------
// Host capabilities
// ---------------------------------------------------------------------------

/// Registration metadata for a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub label: String,
    pub caption: String,
}

/// Host command registry.
pub trait CommandRegistry {
    fn add_command(&mut self, id: &str, spec: CommandSpec);
}

/// Host command palette.
pub trait CommandPalette {
    fn add_item(&mut self, command: &str, category: &str);
}

/// Host launcher. Optional — not every deployment has one.
pub trait Launcher {
    fn add_item(&mut self, command: &str, category: &str);
}

/// Region of the host shell a panel can be inserted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellArea {
    Main,
    Left,
    Right,
    Bottom,
}

/// Host display shell.
pub trait Shell {
    fn add(&mut self, panel: &ReportPanel, area: ShellArea);
}

/// Capabilities injected by the host at activation time.
pub struct Capabilities<'a> {
    pub commands: &'a mut dyn CommandRegistry,
    pub palette: &'a mut dyn CommandPalette,
    pub launcher: Option<&'a mut dyn Launcher>,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// The jupysec front-end plugin.
///
/// Holds the API client built from the resolved configuration and wires the
/// report command into whatever capabilities the host provides.
pub struct JupysecPlugin {
    client: ApiClient,
    panel_title: String,
}

impl JupysecPlugin {
    pub fn new(config: &JupysecConfig) -> Self {
        Self {
            client: ApiClient::new(ServerSettings::from_config(config)),
            panel_title: config.panel.title.clone(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Activate the plugin against the host's capabilities.
    ///
    /// Registers the report command, its palette entry, and — when the host
    /// has a launcher — a launcher tile under the same category. Finishes
    /// with a best-effort scorecard ping so the report is warm by the time
    /// it is first opened; a failed ping is logged and swallowed.
    pub fn activate(&self, caps: &mut Capabilities) {
        caps.commands.add_command(
            COMMAND_OPEN_REPORT,
            CommandSpec {
                label: COMMAND_LABEL.to_string(),
                caption: COMMAND_LABEL.to_string(),
            },
        );
        caps.palette.add_item(COMMAND_OPEN_REPORT, CATEGORY);
        if let Some(launcher) = caps.launcher.as_deref_mut() {
            launcher.add_item(COMMAND_OPEN_REPORT, CATEGORY);
        }

        match self.client.get(SCORECARD_ENDPOINT) {
            Ok(_) => println!("{} jupysec plugin activated", "✓".green().bold()),
            Err(err) => eprintln!(
                "{} jupysec plugin activated; initial scorecard ping failed: {err}",
                "!".yellow().bold()
            ),
        }
    }

    /// Execute the report command: create the panel, fire a best-effort
    /// refresh, and insert the panel into the shell's main area.
    pub fn open_report(&self, shell: &mut dyn Shell) -> ReportPanel {
        let panel = ReportPanel::create(self.client.settings(), &self.panel_title);
        panel.refresh(&self.client);
        shell.add(&panel, ShellArea::Main);
        panel
    }
}
