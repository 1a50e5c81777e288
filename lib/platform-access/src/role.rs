//! Role types for console access control.
//!
//! Roles arrive from the backend as free-form strings (`"cajero"`,
//! `"ROLE_CONTADOR"`, ...). They are normalized once, on the way in, and
//! compared in that normalized form everywhere else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrator role. Sees every navigation link.
pub const ADMINISTRADOR: &str = "ADMINISTRADOR";
/// Accountant role.
pub const CONTADOR: &str = "CONTADOR";
/// Cashier role.
pub const CAJERO: &str = "CAJERO";
/// Role assigned when neither the login response nor the token names one.
pub const FALLBACK_ROLE: &str = "USER";

/// Prefix some backends put in front of role names.
const ROLE_PREFIX: &str = "ROLE_";

/// Roles offered when registering a new account, in catalogue order.
pub const KNOWN_ROLES: &[&str] = &[ADMINISTRADOR, CONTADOR, CAJERO];

/// A normalized role name: uppercase, without the `ROLE_` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Normalizes a raw role string.
    ///
    /// Returns `None` when nothing is left after trimming and stripping the
    /// prefix.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_uppercase();
        let name = upper.strip_prefix(ROLE_PREFIX).unwrap_or(&upper).trim();
        if name.is_empty() {
            None
        } else {
            Some(Self(name.to_string()))
        }
    }

    /// The fallback `USER` role.
    #[must_use]
    pub fn fallback() -> Self {
        Self(FALLBACK_ROLE.to_string())
    }

    /// Returns the normalized role name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the administrator role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.0 == ADMINISTRADOR
    }

    /// Returns true if this role is a member of `roles`.
    #[must_use]
    pub fn is_any_of(&self, roles: &[&str]) -> bool {
        roles.iter().any(|r| *r == self.0)
    }

    /// Catalogue id the backend expects as `rolId` on registration.
    #[must_use]
    pub fn catalog_id(&self) -> Option<u32> {
        KNOWN_ROLES
            .iter()
            .position(|r| *r == self.0)
            .and_then(|idx| u32::try_from(idx + 1).ok())
    }

    /// Avatar colour shown next to the username.
    #[must_use]
    pub fn accent_color(&self) -> &'static str {
        match self.0.as_str() {
            ADMINISTRADOR => "#3b82f6",
            CONTADOR => "#8b5cf6",
            CAJERO => "#10b981",
            _ => "#6b7280",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uppercases() {
        assert_eq!(Role::parse("cajero").expect("role").as_str(), CAJERO);
    }

    #[test]
    fn parse_strips_prefix() {
        assert_eq!(
            Role::parse("ROLE_CONTADOR").expect("role").as_str(),
            CONTADOR
        );
        assert_eq!(
            Role::parse("role_administrador").expect("role").as_str(),
            ADMINISTRADOR
        );
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(Role::parse("").is_none());
        assert!(Role::parse("   ").is_none());
        assert!(Role::parse("ROLE_").is_none());
    }

    #[test]
    fn admin_detection() {
        assert!(Role::parse("administrador").expect("role").is_admin());
        assert!(!Role::parse("contador").expect("role").is_admin());
        assert!(!Role::fallback().is_admin());
    }

    #[test]
    fn membership_is_exact_on_normalized_names() {
        let role = Role::parse("cajero").expect("role");
        assert!(role.is_any_of(&[CONTADOR, CAJERO]));
        assert!(!role.is_any_of(&[ADMINISTRADOR, CONTADOR]));
        assert!(!role.is_any_of(&[]));
    }

    #[test]
    fn catalog_ids_follow_catalogue_order() {
        assert_eq!(Role::parse(ADMINISTRADOR).and_then(|r| r.catalog_id()), Some(1));
        assert_eq!(Role::parse(CONTADOR).and_then(|r| r.catalog_id()), Some(2));
        assert_eq!(Role::parse(CAJERO).and_then(|r| r.catalog_id()), Some(3));
        assert_eq!(Role::fallback().catalog_id(), None);
    }

    #[test]
    fn accent_colors() {
        assert_eq!(Role::parse(CAJERO).expect("role").accent_color(), "#10b981");
        assert_eq!(Role::fallback().accent_color(), "#6b7280");
    }

    #[test]
    fn role_serializes_as_plain_string() {
        let json = serde_json::to_string(&Role::parse("contador").expect("role"))
            .expect("serialize");
        assert_eq!(json, "\"CONTADOR\"");
    }
}
