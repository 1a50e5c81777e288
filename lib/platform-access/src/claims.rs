//! Best-effort decoding of bearer token claims.
//!
//! The console never verifies token signatures; it only peeks at the payload
//! segment to show a username and role and to notice an expired token. Any
//! malformed input decodes to an empty claim set.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use serde_json::{Map, Value};

/// Claims read from the middle segment of a three-part token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenClaims(Map<String, Value>);

impl TokenClaims {
    /// Decodes the payload of `token`, yielding empty claims on any failure.
    #[must_use]
    pub fn decode(token: &str) -> Self {
        Self::try_decode(token).unwrap_or_default()
    }

    /// Decodes the payload of `token`.
    ///
    /// Returns `None` if the token has no payload segment, the segment is
    /// not base64, or the decoded bytes are not a JSON object.
    #[must_use]
    pub fn try_decode(token: &str) -> Option<Self> {
        let segment = token.split('.').nth(1)?.trim_end_matches('=');
        let bytes = URL_SAFE_NO_PAD
            .decode(segment)
            .or_else(|_| STANDARD_NO_PAD.decode(segment))
            .ok()?;
        match serde_json::from_slice::<Value>(&bytes).ok()? {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Returns true if no claims were decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The explicit `username` claim.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.non_empty_str("username")
    }

    /// The `sub` claim.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.non_empty_str("sub")
    }

    /// The role, read from `role` or else from the first `authorities` entry.
    ///
    /// `authorities` may be a string, an array of strings, or an array of
    /// `{"authority": ...}` objects.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.non_empty_str("role").or_else(|| match self.0.get("authorities")? {
            Value::String(s) if !s.is_empty() => Some(s.as_str()),
            Value::Array(items) => items.iter().find_map(|item| match item {
                Value::String(s) if !s.is_empty() => Some(s.as_str()),
                Value::Object(obj) => obj.get("authority").and_then(Value::as_str),
                _ => None,
            }),
            _ => None,
        })
    }

    /// Returns true if the token is still valid at `now` (seconds since epoch).
    ///
    /// A missing or null `exp` claim means the token never expires; an `exp`
    /// that is not a number makes the token invalid.
    #[must_use]
    pub fn is_valid_at(&self, now: i64) -> bool {
        match self.0.get("exp") {
            None | Some(Value::Null) => true,
            Some(exp) => exp.as_f64().is_some_and(|exp| exp > now as f64),
        }
    }

    fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Returns the part of an email-like identifier before the `@`.
#[must_use]
pub fn local_part(identifier: &str) -> &str {
    identifier.split('@').next().unwrap_or(identifier)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    pub(crate) fn token_with_payload(payload: &Value) -> String {
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("eyJhbGciOiJIUzI1NiJ9.{body}.signature")
    }

    #[test]
    fn decodes_role_and_expiry() {
        let token = token_with_payload(&serde_json::json!({
            "role": "ROLE_CONTADOR",
            "exp": 4_102_444_800_i64,
        }));
        let claims = TokenClaims::decode(&token);
        assert_eq!(claims.role(), Some("ROLE_CONTADOR"));
        assert!(claims.is_valid_at(1_700_000_000));
    }

    #[test]
    fn past_expiry_is_invalid() {
        let token = token_with_payload(&serde_json::json!({ "exp": 1_000 }));
        assert!(!TokenClaims::decode(&token).is_valid_at(1_700_000_000));
    }

    #[test]
    fn missing_expiry_is_valid() {
        let token = token_with_payload(&serde_json::json!({ "sub": "ana@empresa.gt" }));
        assert!(TokenClaims::decode(&token).is_valid_at(1_700_000_000));
    }

    #[test]
    fn non_numeric_expiry_is_invalid() {
        let token = token_with_payload(&serde_json::json!({ "exp": "tomorrow" }));
        assert!(!TokenClaims::decode(&token).is_valid_at(0));
    }

    #[test]
    fn malformed_tokens_decode_to_nothing() {
        assert!(TokenClaims::try_decode("not-a-token").is_none());
        assert!(TokenClaims::try_decode("a.!!!.c").is_none());
        assert!(TokenClaims::decode("a.!!!.c").is_empty());

        let array_payload = URL_SAFE_NO_PAD.encode("[1,2,3]");
        assert!(TokenClaims::try_decode(&format!("h.{array_payload}.s")).is_none());
    }

    #[test]
    fn accepts_padded_standard_alphabet() {
        let body = STANDARD.encode(r#"{"username":"ana"}"#);
        let claims = TokenClaims::decode(&format!("h.{body}.s"));
        assert_eq!(claims.username(), Some("ana"));
    }

    #[test]
    fn authorities_array_supplies_role() {
        let token = token_with_payload(&serde_json::json!({
            "authorities": [{ "authority": "ROLE_CAJERO" }],
        }));
        assert_eq!(TokenClaims::decode(&token).role(), Some("ROLE_CAJERO"));

        let token = token_with_payload(&serde_json::json!({ "authorities": ["ROLE_ADMINISTRADOR"] }));
        assert_eq!(TokenClaims::decode(&token).role(), Some("ROLE_ADMINISTRADOR"));
    }

    #[test]
    fn explicit_role_wins_over_authorities() {
        let token = token_with_payload(&serde_json::json!({
            "role": "CONTADOR",
            "authorities": "CAJERO",
        }));
        assert_eq!(TokenClaims::decode(&token).role(), Some("CONTADOR"));
    }

    #[test]
    fn local_part_of_email() {
        assert_eq!(local_part("ana.lopez@empresa.gt"), "ana.lopez");
        assert_eq!(local_part("sin-arroba"), "sin-arroba");
    }
}
