//! API client error types.

use serde::Deserialize;
use std::fmt;

/// Structured error body some backend endpoints return.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Parses a response body, yielding an empty body if it is not the
    /// expected JSON shape.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }
}

/// Errors from backend calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    Status { status: u16, body: ErrorBody },
    /// The request never got an answer.
    Transport { message: String },
    /// The answer could not be decoded.
    Decode { message: String },
    /// The HTTP client could not be set up.
    Client { details: String },
}

impl ApiError {
    /// Resolves the message shown to the user.
    ///
    /// Order: backend `message`, backend `error`, transport message,
    /// `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        let non_empty = |s: &Option<String>| s.as_deref().filter(|s| !s.trim().is_empty()).map(str::to_string);
        match self {
            Self::Status { body, .. } => non_empty(&body.message)
                .or_else(|| non_empty(&body.error))
                .unwrap_or_else(|| fallback.to_string()),
            Self::Transport { message } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Returns the HTTP status, if the backend answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the backend rejected the bearer token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { status, body } => {
                write!(f, "backend returned status {status}")?;
                if let Some(message) = body.message.as_deref().or(body.error.as_deref()) {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
            Self::Transport { message } => write!(f, "request failed: {message}"),
            Self::Decode { message } => write!(f, "failed to decode response: {message}"),
            Self::Client { details } => write!(f, "failed to build HTTP client: {details}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode {
                message: e.to_string(),
            }
        } else if e.is_builder() {
            Self::Client {
                details: e.to_string(),
            }
        } else {
            Self::Transport {
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "No fue posible cargar el dashboard";

    fn status(body: &str) -> ApiError {
        ApiError::Status {
            status: 400,
            body: ErrorBody::parse(body),
        }
    }

    #[test]
    fn message_wins_over_error_code() {
        let err = status(r#"{"message":"Saldo insuficiente","error":"BAD_REQUEST"}"#);
        assert_eq!(err.user_message(FALLBACK), "Saldo insuficiente");
    }

    #[test]
    fn error_code_used_without_message() {
        let err = status(r#"{"error":"Unauthorized"}"#);
        assert_eq!(err.user_message(FALLBACK), "Unauthorized");
    }

    #[test]
    fn blank_fields_fall_through() {
        let err = status(r#"{"message":"  ","error":""}"#);
        assert_eq!(err.user_message(FALLBACK), FALLBACK);
    }

    #[test]
    fn empty_status_body_uses_fallback() {
        let err = status("");
        assert_eq!(err.user_message(FALLBACK), FALLBACK);
    }

    #[test]
    fn non_json_body_uses_fallback() {
        let err = status("<html>502 Bad Gateway</html>");
        assert_eq!(err.user_message(FALLBACK), FALLBACK);
    }

    #[test]
    fn transport_message_precedes_fallback() {
        let err = ApiError::Transport {
            message: "error sending request".to_string(),
        };
        assert_eq!(err.user_message(FALLBACK), "error sending request");

        let err = ApiError::Decode {
            message: "expected value".to_string(),
        };
        assert_eq!(err.user_message(FALLBACK), FALLBACK);
    }

    #[test]
    fn unauthorized_detection() {
        let err = ApiError::Status {
            status: 401,
            body: ErrorBody::default(),
        };
        assert!(err.is_unauthorized());
        assert!(!status("{}").is_unauthorized());
        assert!(err.to_string().contains("401"));
    }
}
