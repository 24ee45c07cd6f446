//! Configuration schema and defaults.
//!
//! Defines the TOML-serializable configuration with its sections:
//! `[server]`, `[panel]`, and `[log]`. Every field has a built-in default;
//! users only set the values they want to override.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level jupysec configuration.
///
/// Maps directly to the `~/.jupysec/config.toml` and `.jupysec.toml` file
/// schemas. All sections and fields are optional — missing values fall back
/// to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JupysecConfig {
    pub server: ServerConfig,
    pub panel: PanelConfig,
    pub log: LogConfig,
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

/// Where the Jupyter server and its jupysec extension live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the Jupyter server, including any path prefix
    /// (JupyterHub deployments mount under `/user/<name>/`).
    pub base_url: String,
    /// API token, attached as `Authorization: token <value>`. Leave empty
    /// for unauthenticated local servers.
    pub token: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8888/".to_string(),
            token: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// [panel]
// ---------------------------------------------------------------------------

/// Report panel presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Tab title for the report panel.
    pub title: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: "Report Card".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [log]
// ---------------------------------------------------------------------------

/// Structured refresh log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Append refresh outcomes to `~/.jupysec/refresh-log.jsonl`.
    /// Can also be toggled via `JUPYSEC_LOG=0`.
    pub enabled: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// Annotated default config
// ---------------------------------------------------------------------------

impl JupysecConfig {
    /// The annotated default config written by `jupysec config init`.
    pub fn default_toml() -> &'static str {
        r#"# jupysec configuration
# Layered: built-in defaults <- this file <- .jupysec.toml <- JUPYSEC_* env vars.

[server]
# Base URL of the Jupyter server, including any path prefix.
# JupyterHub example: "https://hub.example.org/user/alice/"
base_url = "http://localhost:8888/"
# API token, sent as "Authorization: token <value>". Empty = no auth header.
token = ""

[panel]
# Tab title for the security report panel.
title = "Report Card"

[log]
# Record scorecard refresh outcomes to ~/.jupysec/refresh-log.jsonl.
enabled = true
"#
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_server() {
        let config = JupysecConfig::default();
        assert_eq!(config.server.base_url, "http://localhost:8888/");
        assert!(config.server.token.is_empty());
        assert_eq!(config.panel.title, "Report Card");
        assert!(config.log.enabled);
    }

    #[test]
    fn default_toml_parses_back_to_defaults() {
        let parsed: JupysecConfig = toml::from_str(JupysecConfig::default_toml()).unwrap();
        let defaults = JupysecConfig::default();
        assert_eq!(parsed.server.base_url, defaults.server.base_url);
        assert_eq!(parsed.server.token, defaults.server.token);
        assert_eq!(parsed.panel.title, defaults.panel.title);
        assert_eq!(parsed.log.enabled, defaults.log.enabled);
    }

    #[test]
    fn partial_toml_falls_back_per_field() {
        let parsed: JupysecConfig =
            toml::from_str("[server]\nbase_url = \"http://box:9999/\"\n").unwrap();
        assert_eq!(parsed.server.base_url, "http://box:9999/");
        assert!(parsed.server.token.is_empty());
        assert_eq!(parsed.panel.title, "Report Card");
    }

    #[test]
    fn unknown_sections_are_tolerated() {
        let parsed: Result<JupysecConfig, _> = toml::from_str("[future]\nx = 1\n");
        assert!(parsed.is_ok());
    }
}
