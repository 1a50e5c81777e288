//! `/auth` endpoints.

use crate::bearer::TokenSource;
use crate::client::ApiClient;
use crate::error::ApiError;
use async_trait::async_trait;
use contable_platform_access::error::{LOGIN_FAILED_MESSAGE, REGISTER_FAILED_MESSAGE};
use contable_platform_access::{AuthBackend, AuthError, LoginRequest, LoginResponse, RegisterRequest};
use serde_json::Value;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";

/// Converts an API failure into an authentication failure carrying the
/// message to show.
fn auth_error(error: &ApiError, fallback: &str) -> AuthError {
    let message = error.user_message(fallback);
    match error.status() {
        Some(status) => AuthError::Rejected { status, message },
        None => AuthError::Unreachable { message },
    }
}

/// Reads a register answer: `null` when empty, the parsed JSON when
/// possible, the raw text otherwise.
fn register_answer(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[async_trait(?Send)]
impl<T: TokenSource> AuthBackend for ApiClient<T> {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, AuthError> {
        self.send_json(self.post(LOGIN_PATH).json(credentials))
            .await
            .map_err(|e| auth_error(&e, LOGIN_FAILED_MESSAGE))
    }

    async fn register(&self, data: &RegisterRequest) -> Result<Value, AuthError> {
        let response = self
            .send(self.post(REGISTER_PATH).json(data))
            .await
            .map_err(|e| auth_error(&e, REGISTER_FAILED_MESSAGE))?;

        let raw = response
            .text()
            .await
            .map_err(|e| auth_error(&ApiError::from(e), REGISTER_FAILED_MESSAGE))?;
        Ok(register_answer(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorBody;

    #[test]
    fn status_errors_become_rejections() {
        let error = ApiError::Status {
            status: 401,
            body: ErrorBody::parse(r#"{"message":"Usuario bloqueado"}"#),
        };
        let auth = auth_error(&error, LOGIN_FAILED_MESSAGE);
        assert!(auth.is_unauthorized());
        assert_eq!(auth.user_message(), "Usuario bloqueado");
    }

    #[test]
    fn empty_rejection_uses_fallback() {
        let error = ApiError::Status {
            status: 500,
            body: ErrorBody::default(),
        };
        assert_eq!(
            auth_error(&error, REGISTER_FAILED_MESSAGE).user_message(),
            REGISTER_FAILED_MESSAGE
        );
    }

    #[test]
    fn transport_errors_become_unreachable() {
        let error = ApiError::Transport {
            message: "connection refused".to_string(),
        };
        assert_eq!(
            auth_error(&error, LOGIN_FAILED_MESSAGE),
            AuthError::Unreachable {
                message: "connection refused".to_string()
            }
        );
    }

    #[test]
    fn register_answers() {
        assert_eq!(register_answer(""), Value::Null);
        assert_eq!(register_answer(r#"{"id":7}"#), serde_json::json!({"id": 7}));
        assert_eq!(
            register_answer("Usuario registrado"),
            Value::String("Usuario registrado".to_string())
        );
    }
}
