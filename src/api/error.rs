//! Typed failures surfaced by the API client.
//!
//! Exactly two kinds exist: the transport failed before any response
//! arrived, or the server answered with a non-2xx status. The client never
//! retries either — callers decide what a failed request means.

use std::error::Error as StdError;
use std::fmt;

use super::ParsedBody;

/// Failure of a request to the jupysec server extension.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure (connection refused, DNS, aborted request)
    /// before a response was received. Wraps the underlying transport error.
    Network {
        url: String,
        source: Box<dyn StdError + Send + Sync>,
    },
    /// A response arrived but its status signaled failure.
    Response {
        status: u16,
        status_text: String,
        url: String,
        body: ParsedBody,
        /// Human-readable message extracted from the body.
        message: String,
    },
}

impl ApiError {
    pub(crate) fn network(url: String, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Network {
            url,
            source: Box::new(source),
        }
    }

    pub(crate) fn response(status: u16, status_text: String, url: String, body: ParsedBody) -> Self {
        let message = error_message(&body, status, &status_text);
        Self::Response {
            status,
            status_text,
            url,
            body,
            message,
        }
    }

    /// Whether this is a transport-level failure.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { .. } => None,
            Self::Response { status, .. } => Some(*status),
        }
    }

    /// Human-readable failure message.
    pub fn message(&self) -> String {
        match self {
            Self::Network { source, .. } => source.to_string(),
            Self::Response { message, .. } => message.clone(),
        }
    }
}

/// Best-effort message for a failed response: a string `message` field from
/// a JSON object body wins, then the body itself, then the status line.
fn error_message(body: &ParsedBody, status: u16, status_text: &str) -> String {
    if let Some(message) = body.message_field() {
        return message.to_string();
    }
    match body {
        ParsedBody::Text(text) => text.clone(),
        ParsedBody::Json(value) => value.to_string(),
        ParsedBody::Empty => format!("Invalid response: {status} {status_text}"),
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network { url, source } => {
                write!(f, "network error requesting {url}: {source}")
            }
            Self::Response {
                status,
                url,
                message,
                ..
            } => {
                write!(f, "server returned {status} for {url}: {message}")
            }
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Network { source, .. } => Some(source.as_ref()),
            Self::Response { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
