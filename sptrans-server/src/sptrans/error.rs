//! SPTrans client error types.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// A failure reported by the upstream API itself.
///
/// The transport worked but the upstream rejected the call, either with a
/// non-success status or (for authentication) with a body other than `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Upstream HTTP status (or 401 for a rejected credential).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// The credential was accepted by the transport but refused by SPTrans.
    pub fn invalid_token() -> Self {
        Self::new(401, "Invalid authentication token")
            .with_details("SPTrans API returned false for authentication")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {details}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors from the SPTrans gateway.
#[derive(Debug, thiserror::Error)]
pub enum SptransError {
    /// Authentication was rejected by the upstream.
    #[error("authentication failed: {0}")]
    Auth(ApiError),

    /// A data endpoint answered with a non-success status.
    #[error("{0}")]
    Api(ApiError),

    /// Connection error, network timeout or an unreadable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body did not match the expected record shape.
    #[error("malformed response from {endpoint}: {message}")]
    Decode {
        endpoint: String,
        message: String,
        body: Option<String>,
    },

    /// The caller's deadline expired before the operation finished.
    #[error("request cancelled after {after:?}")]
    Cancelled { after: Duration },
}

impl SptransError {
    /// The upstream rejection, if this error carries one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SptransError::Auth(e) | SptransError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Upstream status code, if any.
    pub fn status(&self) -> Option<u16> {
        self.api_error().and_then(|e| e.code)
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, SptransError::Auth(_))
    }

    /// True for failures below the HTTP layer (connection, timeout, cancel).
    pub fn is_transport(&self) -> bool {
        matches!(self, SptransError::Http(_) | SptransError::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = ApiError::new(500, "API request failed")
            .with_details("HTTP 500 for endpoint /Corredor");
        assert_eq!(
            err.to_string(),
            "API request failed: HTTP 500 for endpoint /Corredor"
        );

        let err = ApiError::new(403, "Authentication failed");
        assert_eq!(err.to_string(), "Authentication failed");
    }

    #[test]
    fn invalid_token_is_401() {
        let err = ApiError::invalid_token();
        assert_eq!(err.code, Some(401));
        assert_eq!(err.message, "Invalid authentication token");
    }

    #[test]
    fn error_classes() {
        let auth = SptransError::Auth(ApiError::invalid_token());
        assert!(auth.is_auth());
        assert!(!auth.is_transport());
        assert_eq!(auth.status(), Some(401));
        assert!(auth.to_string().starts_with("authentication failed"));

        let api = SptransError::Api(ApiError::new(502, "API request failed"));
        assert_eq!(api.status(), Some(502));
        assert!(!api.is_auth());

        let cancelled = SptransError::Cancelled {
            after: Duration::from_secs(5),
        };
        assert!(cancelled.is_transport());
        assert!(cancelled.api_error().is_none());

        let decode = SptransError::Decode {
            endpoint: "/Posicao".into(),
            message: "missing field `hr`".into(),
            body: Some("{}".into()),
        };
        assert!(!decode.is_transport());
        assert!(decode.to_string().contains("/Posicao"));
    }

    #[test]
    fn api_error_serializes_without_empty_fields() {
        let err = ApiError {
            code: None,
            message: "boom".into(),
            details: None,
        };
        assert_eq!(serde_json::to_string(&err).unwrap(), r#"{"message":"boom"}"#);
    }
}
