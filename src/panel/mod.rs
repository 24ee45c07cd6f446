//! Report panel controller.
//!
//! Owns the embedded-frame surface that displays the static security score
//! card page served by the extension. The page fetches and renders its own
//! data, so the panel never pushes content into it — `refresh` only pings
//! the scorecard endpoint so the server regenerates the page, and records
//! the outcome.

use std::time::Instant;

use colored::Colorize;

use crate::api::{ApiClient, NAMESPACE, ParsedBody, REPORT_PAGE, SCORECARD_ENDPOINT, ServerSettings};
use crate::api::url::url_path_join;
use crate::refresh_log::{self, RefreshLogEntry};

/// Stable widget identifier for the report panel.
pub const PANEL_ID: &str = "jupysec";

// ---------------------------------------------------------------------------
// Panel descriptor
// ---------------------------------------------------------------------------

/// Embedded-frame panel bound to the static report page.
///
/// Composition over the host's frame surface: the host shell receives this
/// descriptor and owns the actual rendering. The panel is user-closable
/// and allows vertical overflow so long reports scroll.
#[derive(Debug, Clone)]
pub struct ReportPanel {
    pub id: String,
    pub title: String,
    /// Source URL of the embedded frame.
    pub url: String,
    pub closable: bool,
    pub vertical_scroll: bool,
}

impl ReportPanel {
    /// Build the panel descriptor from the ambient server settings.
    pub fn create(settings: &ServerSettings, title: &str) -> Self {
        Self {
            id: PANEL_ID.to_string(),
            title: title.to_string(),
            url: url_path_join(&[&settings.base_url, NAMESPACE, REPORT_PAGE]),
            closable: true,
            vertical_scroll: true,
        }
    }

    /// Ping the scorecard refresh endpoint, best-effort.
    ///
    /// Success and both failure kinds are logged and swallowed — this never
    /// fails to its caller. The worst outcome of a failed refresh is a
    /// stale report page.
    pub fn refresh(&self, client: &ApiClient) {
        let target = client.endpoint_url(SCORECARD_ENDPOINT);
        let start = Instant::now();
        let outcome = client.get(SCORECARD_ENDPOINT);
        let latency_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(body) => {
                let detail = summarize_body(&body);
                println!(
                    "{} scorecard refresh: {} ({latency_ms} ms)",
                    "✓".green().bold(),
                    detail.dimmed()
                );
                refresh_log::record(&RefreshLogEntry::success(
                    SCORECARD_ENDPOINT,
                    &target,
                    detail,
                    latency_ms,
                ));
            }
            Err(err) => {
                eprintln!("{} scorecard refresh failed: {err}", "✗".red().bold());
                refresh_log::record(&RefreshLogEntry::failure(
                    SCORECARD_ENDPOINT,
                    &target,
                    err.status(),
                    err.message(),
                    latency_ms,
                ));
            }
        }
    }
}

/// One-line summary of a response body for console and log output.
pub(crate) fn summarize_body(body: &ParsedBody) -> String {
    match body {
        ParsedBody::Json(value) => value.to_string(),
        ParsedBody::Text(text) => {
            let trimmed = text.trim();
            match trimmed.char_indices().nth(120) {
                Some((cut, _)) => format!("{}…", &trimmed[..cut]),
                None => trimmed.to_string(),
            }
        }
        ParsedBody::Empty => "empty response".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base_url: &str) -> ServerSettings {
        ServerSettings {
            base_url: base_url.to_string(),
            token: None,
            headers: Vec::new(),
        }
    }

    #[test]
    fn create_binds_the_static_report_url() {
        let panel = ReportPanel::create(&settings("http://localhost:8888/"), "Report Card");
        assert_eq!(panel.id, "jupysec");
        assert_eq!(panel.title, "Report Card");
        assert_eq!(panel.url, "http://localhost:8888/jupysec/public/score.html");
        assert!(panel.closable);
        assert!(panel.vertical_scroll);
    }

    #[test]
    fn create_handles_base_without_trailing_slash() {
        let panel = ReportPanel::create(&settings("http://localhost:8888"), "Report Card");
        assert_eq!(panel.url, "http://localhost:8888/jupysec/public/score.html");
    }

    #[test]
    fn summarize_truncates_long_text() {
        let long = "x".repeat(500);
        let summary = summarize_body(&ParsedBody::Text(long));
        assert!(summary.len() <= 124);
        assert!(summary.ends_with('…'));
    }

    #[test]
    fn summarize_renders_json_compact() {
        let body = ParsedBody::from_text(r#"{ "data": "complete" }"#.to_string());
        assert_eq!(summarize_body(&body), r#"{"data":"complete"}"#);
    }

    #[test]
    fn summarize_names_the_empty_body() {
        assert_eq!(summarize_body(&ParsedBody::Empty), "empty response");
    }
}
