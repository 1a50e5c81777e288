//! Error types for the platform-access crate.
//!
//! Authentication failures always carry a message that can be shown to the
//! user as-is. The message is resolved where the failure is observed (the
//! API client), so the UI never has to dig through backend payloads.

use std::fmt;

/// Message shown when login fails without a more specific explanation.
pub const LOGIN_FAILED_MESSAGE: &str = "Credenciales inválidas. Por favor intenta nuevamente.";

/// Message shown when registration fails without a more specific explanation.
pub const REGISTER_FAILED_MESSAGE: &str = "No se pudo registrar";

/// Message shown when the session could not be saved locally.
pub const SESSION_NOT_SAVED_MESSAGE: &str = "No fue posible guardar la sesión en este navegador.";

/// Errors from login and registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The backend answered with a non-success status.
    Rejected { status: u16, message: String },
    /// The backend could not be reached or its answer could not be read.
    Unreachable { message: String },
    /// The session could not be persisted.
    Storage { details: String },
}

impl AuthError {
    /// Returns the message to show to the user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } | Self::Unreachable { message } => message,
            Self::Storage { .. } => SESSION_NOT_SAVED_MESSAGE,
        }
    }

    /// Returns true if the backend rejected the credentials as unauthorized.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { status, message } => {
                write!(f, "backend rejected request with status {status}: {message}")
            }
            Self::Unreachable { message } => write!(f, "backend unreachable: {message}"),
            Self::Storage { details } => write!(f, "failed to persist session: {details}"),
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_shows_backend_message() {
        let err = AuthError::Rejected {
            status: 401,
            message: "Usuario o contraseña incorrectos".to_string(),
        };
        assert_eq!(err.user_message(), "Usuario o contraseña incorrectos");
        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn storage_hides_details_from_user() {
        let err = AuthError::Storage {
            details: "quota exceeded".to_string(),
        };
        assert_eq!(err.user_message(), SESSION_NOT_SAVED_MESSAGE);
        assert!(err.to_string().contains("quota exceeded"));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn unreachable_display() {
        let err = AuthError::Unreachable {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.user_message(), "connection refused");
        assert!(err.to_string().contains("unreachable"));
    }
}
