//! HTTP client for the jupysec server extension API.
//!
//! All of the extension's REST routes live under a single fixed URL
//! namespace on the Jupyter server. This module resolves endpoint paths
//! against that namespace, issues the request with the ambient session
//! context (API token, default headers) attached, and normalizes the
//! response into [`ParsedBody`] or a typed [`ApiError`].
//!
//! Uses the synchronous `ureq` HTTP client. No retries, no timeout policy,
//! no caching — each call is independent and stateless, and the response
//! body is always fully drained before the call returns.

pub mod error;
pub mod url;

use serde_json::Value;

pub use error::ApiError;
use url::url_path_join;

use crate::config::JupysecConfig;

/// Fixed URL namespace for the server extension's routes.
///
/// Must match the prefix the server extension mounts its handlers under;
/// a mismatch turns every request into a 404.
pub const NAMESPACE: &str = "jupysec";

/// Endpoint (relative to the namespace) that recomputes the scorecard.
pub const SCORECARD_ENDPOINT: &str = "scorecard_update";

/// Path (relative to the namespace) of the static report page.
pub const REPORT_PAGE: &str = "public/score.html";

// ---------------------------------------------------------------------------
// Ambient session context
// ---------------------------------------------------------------------------

/// Connection settings established once per process and attached to every
/// request: the server's base URL plus whatever auth context the deployment
/// uses. The client treats these as read-only.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Base URL of the Jupyter server, including any path prefix.
    pub base_url: String,
    /// API token, sent as `Authorization: token <value>` when present.
    pub token: Option<String>,
    /// Extra headers attached to every request.
    pub headers: Vec<(String, String)>,
}

impl ServerSettings {
    /// Build the ambient context from the resolved configuration.
    pub fn from_config(config: &JupysecConfig) -> Self {
        let token = if config.server.token.is_empty() {
            None
        } else {
            Some(config.server.token.clone())
        };
        Self {
            base_url: config.server.base_url.clone(),
            token,
            headers: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Request options
// ---------------------------------------------------------------------------

/// HTTP verb for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        }
    }
}

/// Per-call options. The default is a GET with no body and no extra
/// headers beyond the ambient session context.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    /// Opaque string payload, sent verbatim.
    pub body: Option<String>,
    /// Per-call headers, attached after the ambient ones.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// POST with the given body.
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            body: Some(body.into()),
            headers: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Response normalization
// ---------------------------------------------------------------------------

/// A fully-drained response body in normalized form.
///
/// A non-empty body that fails to parse as JSON is kept as raw text — the
/// extension's endpoints are JSON, but a non-JSON body is not an error by
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    Json(Value),
    Text(String),
    Empty,
}

impl ParsedBody {
    /// Classify a drained body: empty, valid JSON, or raw text.
    pub fn from_text(text: String) -> Self {
        if text.is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The string `message` field, when the body is a JSON object carrying
    /// one. Used for error extraction from failed responses.
    pub fn message_field(&self) -> Option<&str> {
        match self {
            Self::Json(Value::Object(map)) => map.get("message").and_then(Value::as_str),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous client for the extension's namespaced REST API.
///
/// Cheap to construct; the settings are immutable for the lifetime of the
/// client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    settings: ServerSettings,
}

impl ApiClient {
    pub fn new(settings: ServerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// Resolve an endpoint path against the base URL and namespace.
    ///
    /// The empty path resolves to the namespace root.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        url_path_join(&[&self.settings.base_url, NAMESPACE, endpoint])
    }

    /// GET an endpoint with default options.
    pub fn get(&self, endpoint: &str) -> Result<ParsedBody, ApiError> {
        self.request(endpoint, &RequestOptions::default())
    }

    /// Issue a request against a namespaced endpoint.
    ///
    /// Returns the normalized body on any 2xx response. Fails with
    /// [`ApiError::Network`] when the transport dies before a response, and
    /// with [`ApiError::Response`] for any non-2xx status — carrying a
    /// message extracted from the body when one is available.
    pub fn request(&self, endpoint: &str, options: &RequestOptions) -> Result<ParsedBody, ApiError> {
        let target = self.endpoint_url(endpoint);

        let mut req = ureq::request(options.method.as_str(), &target);
        if let Some(ref token) = self.settings.token {
            req = req.set("Authorization", &format!("token {token}"));
        }
        for (name, value) in self.settings.headers.iter().chain(options.headers.iter()) {
            req = req.set(name, value);
        }

        let result = match options.body {
            Some(ref body) => req.send_string(body),
            None => req.call(),
        };

        // ureq reports 4xx/5xx as Err(Status) but the response is still
        // there; both arms converge on the same drain-and-classify path.
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => {
                return Err(ApiError::network(target, transport));
            }
        };

        let status = response.status();
        let status_text = response.status_text().to_string();

        let text = response
            .into_string()
            .map_err(|err| ApiError::network(target.clone(), err))?;
        let body = ParsedBody::from_text(text);

        if !(200..300).contains(&status) {
            return Err(ApiError::response(status, status_text, target, body));
        }
        Ok(body)
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
    fn endpoint_url_joins_namespace() {
        let client = ApiClient::new(settings("http://localhost:8888/"));
        assert_eq!(
            client.endpoint_url("scorecard_update"),
            "http://localhost:8888/jupysec/scorecard_update"
        );
    }

    #[test]
    fn endpoint_url_empty_path_is_namespace_root() {
        let client = ApiClient::new(settings("http://localhost:8888"));
        assert_eq!(client.endpoint_url(""), "http://localhost:8888/jupysec");
    }

    #[test]
    fn endpoint_url_keeps_query_components() {
        let client = ApiClient::new(settings("http://localhost:8888/"));
        assert_eq!(
            client.endpoint_url("scorecard_update?force=1&verbose=1"),
            "http://localhost:8888/jupysec/scorecard_update?force=1&verbose=1"
        );
    }

    #[test]
    fn parsed_body_classifies_json() {
        let body = ParsedBody::from_text(r#"{"status":"ok"}"#.to_string());
        assert_eq!(body, ParsedBody::Json(serde_json::json!({"status": "ok"})));
    }

    #[test]
    fn parsed_body_keeps_raw_text_when_not_json() {
        let body = ParsedBody::from_text("<html>hello</html>".to_string());
        assert_eq!(body, ParsedBody::Text("<html>hello</html>".to_string()));
    }

    #[test]
    fn parsed_body_empty_string_is_empty() {
        let body = ParsedBody::from_text(String::new());
        assert!(body.is_empty());
    }

    #[test]
    fn message_field_only_on_json_objects() {
        assert_eq!(
            ParsedBody::from_text(r#"{"message":"hi"}"#.to_string()).message_field(),
            Some("hi")
        );
        assert_eq!(
            ParsedBody::from_text(r#"["message"]"#.to_string()).message_field(),
            None
        );
        assert_eq!(
            ParsedBody::Text("message".to_string()).message_field(),
            None
        );
        assert_eq!(ParsedBody::Empty.message_field(), None);
    }

    #[test]
    fn default_options_are_a_bare_get() {
        let options = RequestOptions::default();
        assert_eq!(options.method, Method::Get);
        assert!(options.body.is_none());
        assert!(options.headers.is_empty());
    }

    #[test]
    fn settings_from_config_treats_empty_token_as_absent() {
        let config = JupysecConfig::default();
        let settings = ServerSettings::from_config(&config);
        assert_eq!(settings.base_url, "http://localhost:8888/");
        assert!(settings.token.is_none());

        let mut config = JupysecConfig::default();
        config.server.token = "secret".to_string();
        let settings = ServerSettings::from_config(&config);
        assert_eq!(settings.token.as_deref(), Some("secret"));
    }
}
