//! jupysec — client-side glue for the jupysec security scorecard server
//! extension.
//!
//! The companion Jupyter server extension computes a security "score card"
//! and serves it as a static report page under a fixed URL namespace. This
//! crate provides everything a host application needs on the client side:
//!
//! - [`api`] — the HTTP client that talks to the extension's REST endpoints
//! - [`panel`] — the embedded-frame panel that displays the report page
//! - [`plugin`] — capability interfaces and the activation entry point
//! - [`config`] — layered TOML configuration (`~/.jupysec/config.toml`)
//! - [`refresh_log`] — JSONL log of scorecard refresh outcomes
//!
//! The `jupysec` binary is a terminal host for the plugin: it can open the
//! report in a browser, trigger refreshes, and inspect health and history.

pub mod api;
pub mod cli;
pub mod config;
pub mod host;
pub mod panel;
pub mod plugin;
pub mod refresh_log;
