//! Login and registration payloads, and the form validation that runs
//! before anything is sent.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::role::Role;

/// Minimum password length accepted by the forms.
pub const MIN_PASSWORD_LEN: usize = 6;
/// Minimum username length accepted by the registration form.
pub const MIN_USERNAME_LEN: usize = 3;

/// Body of `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Answer of `POST /auth/login`. Only the token is guaranteed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"<redacted>")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

/// Body of `POST /auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub nombre_usuario: String,
    pub email: String,
    pub password: String,
    pub rol_id: u32,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("nombre_usuario", &self.nombre_usuario)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("rol_id", &self.rol_id)
            .finish()
    }
}

/// A validation failure attached to one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// All validation failures of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Banner shown above a form that failed validation.
    pub const SUMMARY: &'static str = "Por favor completa todos los campos correctamente";

    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }

    /// Returns the first message for `field`, if it failed.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    /// Returns true if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

/// Raw values of the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Validates the form and builds the request body.
    ///
    /// # Errors
    ///
    /// Returns every failing field when the form is incomplete.
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        errors.into_result(|| LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Raw values of the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub nombre_usuario: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            nombre_usuario: String::new(),
            email: String::new(),
            password: String::new(),
            role: crate::role::CONTADOR.to_string(),
        }
    }
}

impl RegisterForm {
    /// Validates the form and builds the request body.
    ///
    /// # Errors
    ///
    /// Returns every failing field when the form is incomplete or names a
    /// role outside the catalogue.
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = self.nombre_usuario.trim();
        if name.is_empty() {
            errors.push("nombreUsuario", "El nombre de usuario es requerido");
        } else if name.chars().count() < MIN_USERNAME_LEN {
            errors.push(
                "nombreUsuario",
                "El nombre de usuario debe tener al menos 3 caracteres",
            );
        }
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        let rol_id = Role::parse(&self.role).and_then(|r| r.catalog_id());
        if rol_id.is_none() {
            errors.push("rol", "Selecciona un rol válido");
        }
        errors.into_result(|| RegisterRequest {
            nombre_usuario: name.to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            rol_id: rol_id.unwrap_or_default(),
        })
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    let email = email.trim();
    if email.is_empty() {
        errors.push("email", "El correo es requerido");
    } else if !is_well_formed_email(email) {
        errors.push("email", "Ingresa un correo válido");
    }
}

fn check_password(errors: &mut FieldErrors, password: &str) {
    if password.is_empty() {
        errors.push("password", "La contraseña es requerida");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(
            "password",
            "La contraseña debe tener al menos 6 caracteres",
        );
    }
}

/// Structural email check: one `@`, non-empty local part, dotted domain,
/// no whitespace.
#[must_use]
pub fn is_well_formed_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_requires_both_fields() {
        let errors = LoginForm::default().validate().expect_err("empty form");
        assert_eq!(errors.for_field("email"), Some("El correo es requerido"));
        assert_eq!(
            errors.for_field("password"),
            Some("La contraseña es requerida")
        );
    }

    #[test]
    fn login_form_checks_format_and_length() {
        let form = LoginForm {
            email: "ana-at-empresa".to_string(),
            password: "123".to_string(),
        };
        let errors = form.validate().expect_err("invalid form");
        assert_eq!(errors.for_field("email"), Some("Ingresa un correo válido"));
        assert_eq!(
            errors.for_field("password"),
            Some("La contraseña debe tener al menos 6 caracteres")
        );
    }

    #[test]
    fn valid_login_form_builds_trimmed_request() {
        let form = LoginForm {
            email: "  ana@empresa.gt ".to_string(),
            password: "secreto1".to_string(),
        };
        let request = form.validate().expect("valid form");
        assert_eq!(request.email, "ana@empresa.gt");
        assert_eq!(request.password, "secreto1");
    }

    #[test]
    fn register_form_maps_role_to_catalog_id() {
        let form = RegisterForm {
            nombre_usuario: "ana".to_string(),
            email: "ana@empresa.gt".to_string(),
            password: "secreto1".to_string(),
            role: "cajero".to_string(),
        };
        let request = form.validate().expect("valid form");
        assert_eq!(request.rol_id, 3);
    }

    #[test]
    fn register_form_defaults_to_contador() {
        assert_eq!(RegisterForm::default().role, "CONTADOR");
    }

    #[test]
    fn register_form_rejects_short_name_and_unknown_role() {
        let form = RegisterForm {
            nombre_usuario: "al".to_string(),
            email: "al@empresa.gt".to_string(),
            password: "secreto1".to_string(),
            role: "GERENTE".to_string(),
        };
        let errors = form.validate().expect_err("invalid form");
        assert!(errors.for_field("nombreUsuario").is_some());
        assert!(errors.for_field("rol").is_some());
        assert!(errors.for_field("email").is_none());
    }

    #[test]
    fn register_request_uses_backend_field_names() {
        let request = RegisterRequest {
            nombre_usuario: "ana".to_string(),
            email: "ana@empresa.gt".to_string(),
            password: "secreto1".to_string(),
            rol_id: 2,
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "nombreUsuario": "ana",
                "email": "ana@empresa.gt",
                "password": "secreto1",
                "rolId": 2,
            })
        );
    }

    #[test]
    fn debug_output_redacts_password() {
        let request = LoginRequest {
            email: "ana@empresa.gt".to_string(),
            password: "secreto1".to_string(),
        };
        let debug = format!("{request:?}");
        assert!(!debug.contains("secreto1"));
        assert!(debug.contains("ana@empresa.gt"));
    }

    #[test]
    fn login_response_optional_fields() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"token":"abc"}"#).expect("deserialize");
        assert_eq!(response.token, "abc");
        assert!(response.email.is_none());
        assert!(response.role.is_none());
    }

    #[test]
    fn email_structure() {
        assert!(is_well_formed_email("a@b.co"));
        assert!(!is_well_formed_email("a@b"));
        assert!(!is_well_formed_email("@b.co"));
        assert!(!is_well_formed_email("a@@b.co"));
        assert!(!is_well_formed_email("a b@c.co"));
        assert!(!is_well_formed_email("a@b..co"));
    }
}
