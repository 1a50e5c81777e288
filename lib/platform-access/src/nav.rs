//! Header navigation links and the role filter over them.

use crate::role::{ADMINISTRADOR, CONTADOR, Role};

/// A header navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
    /// Match the path exactly when highlighting the active link.
    pub exact: bool,
    /// Roles that may see the link. `None` means every role.
    pub roles: Option<&'static [&'static str]>,
}

impl NavLink {
    const fn open(label: &'static str, path: &'static str) -> Self {
        Self {
            label,
            path,
            exact: false,
            roles: None,
        }
    }

    const fn restricted(
        label: &'static str,
        path: &'static str,
        roles: &'static [&'static str],
    ) -> Self {
        Self {
            label,
            path,
            exact: false,
            roles: Some(roles),
        }
    }

    /// Returns true if `role` may see this link.
    #[must_use]
    pub fn is_visible_to(&self, role: &Role) -> bool {
        self.roles.is_none_or(|roles| role.is_any_of(roles))
    }
}

const ACCOUNTING_ROLES: &[&str] = &[ADMINISTRADOR, CONTADOR];

/// Every link of the header, in display order.
pub const NAV_LINKS: &[NavLink] = &[
    NavLink {
        label: "Dashboard",
        path: "/dashboard",
        exact: true,
        roles: None,
    },
    NavLink::restricted("Libro Diario", "/diario", ACCOUNTING_ROLES),
    NavLink::restricted("Libro Mayor", "/mayor", ACCOUNTING_ROLES),
    NavLink::restricted("Balances", "/balances", ACCOUNTING_ROLES),
    NavLink::open("Bancos/Caja", "/bancos-caja"),
    NavLink::open("Inventario", "/inventario"),
    NavLink::open("Clientes", "/clientes"),
    NavLink::open("Proveedores", "/proveedores"),
    NavLink::open("Estado de Resultados", "/estado-resultados"),
];

/// Returns the links visible for the given session state, in declaration
/// order.
#[must_use]
pub fn visible_links<'a>(
    links: &'a [NavLink],
    authenticated: bool,
    role: Option<&Role>,
) -> Vec<&'a NavLink> {
    let Some(role) = role.filter(|_| authenticated) else {
        return Vec::new();
    };
    if role.is_admin() {
        return links.iter().collect();
    }
    links.iter().filter(|link| link.is_visible_to(role)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::CAJERO;

    fn paths(links: &[&NavLink]) -> Vec<&'static str> {
        links.iter().map(|l| l.path).collect()
    }

    #[test]
    fn administrator_sees_everything() {
        let role = Role::parse(ADMINISTRADOR).expect("role");
        let visible = visible_links(NAV_LINKS, true, Some(&role));
        assert_eq!(visible.len(), NAV_LINKS.len());
    }

    #[test]
    fn cashier_sees_unrestricted_links_in_order() {
        let role = Role::parse(CAJERO).expect("role");
        let visible = visible_links(NAV_LINKS, true, Some(&role));
        assert_eq!(
            paths(&visible),
            [
                "/dashboard",
                "/bancos-caja",
                "/inventario",
                "/clientes",
                "/proveedores",
                "/estado-resultados",
            ]
        );
    }

    #[test]
    fn accountant_sees_ledgers() {
        let role = Role::parse(CONTADOR).expect("role");
        let visible = visible_links(NAV_LINKS, true, Some(&role));
        assert_eq!(visible.len(), NAV_LINKS.len());
        assert!(paths(&visible).contains(&"/diario"));
    }

    #[test]
    fn unknown_role_sees_only_unrestricted_links() {
        let visible = visible_links(NAV_LINKS, true, Some(&Role::fallback()));
        assert!(visible.iter().all(|l| l.roles.is_none()));
        assert_eq!(visible.len(), 6);
    }

    #[test]
    fn unauthenticated_or_roleless_sees_nothing() {
        let role = Role::parse(ADMINISTRADOR).expect("role");
        assert!(visible_links(NAV_LINKS, false, Some(&role)).is_empty());
        assert!(visible_links(NAV_LINKS, true, None).is_empty());
    }
}
