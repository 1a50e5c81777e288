//! Domain error types for server functions.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Console settings could not be handed to a server function.
#[derive(Debug)]
pub enum SettingsError {
    /// The settings extension is missing from the request.
    Unavailable { details: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { details } => {
                write!(f, "console settings unavailable: {}", details)
            }
        }
    }
}

impl SettingsError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            SettingsError::Unavailable { .. } => {
                ServerFnError::new("El servicio no está disponible")
            }
        }
    }
}
