//! Client-side API error taxonomy.

use serde::Deserialize;
use thiserror::Error;

/// Error produced by any backend request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// Non-success status. `message` is the envelope's `error` field when
    /// the body parsed, otherwise a generic status description.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// The body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Build an [`ApiError::Http`] from a status code and raw body,
    /// extracting the envelope error message when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = envelope_error(body)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        ApiError::Http { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401, .. })
    }
}

/// Pull the `error` field out of an envelope body, if there is one.
fn envelope_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorOnly {
        error: Option<String>,
    }
    let parsed: ErrorOnly = serde_json::from_str(body).ok()?;
    parsed.error.filter(|msg| !msg.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_envelope_message() {
        let err = ApiError::from_status(409, r#"{"success":false,"error":"Already following"}"#);
        assert_eq!(
            err,
            ApiError::Http {
                status: 409,
                message: "Already following".into()
            }
        );
    }

    #[test]
    fn http_error_falls_back_on_unparseable_body() {
        let err = ApiError::from_status(502, "<html>Bad Gateway</html>");
        match err {
            ApiError::Http { status: 502, message } => {
                assert!(message.contains("502"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unauthorized_detection() {
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(!ApiError::from_status(403, "").is_unauthorized());
        assert!(!ApiError::Network("down".into()).is_unauthorized());
    }
}
