//! Session and access control for the contable console.
//!
//! This crate provides:
//! - Role normalization (`Role`) and the known role names
//! - Best-effort token claim decoding (`TokenClaims`)
//! - The session store (`SessionStore`, `Session`) persisted through
//!   [`contable_core::KeyValueStore`]
//! - The route guard (`check_access`, `GuardDecision`)
//! - The header navigation filter (`visible_links`, `NAV_LINKS`)
//! - Login/registration payloads and form validation
//!
//! # Access Control Model
//!
//! The backend issues a bearer token at login. The console keeps the token
//! together with a display username and a normalized role:
//! - Routes are gated by token presence and, optionally, a role list
//! - Navigation links are filtered by role; the administrator sees all
//!
//! # Example
//!
//! ```
//! use contable_core::MemoryStore;
//! use contable_platform_access::{NAV_LINKS, SessionStore, check_access, visible_links};
//! use std::sync::Arc;
//!
//! let storage = Arc::new(MemoryStore::with_entries([
//!     ("token", "abc"),
//!     ("username", "ana"),
//!     ("role", "ROLE_cajero"),
//! ]));
//! let store = SessionStore::new(storage);
//! assert!(store.restore());
//!
//! let session = store.snapshot();
//! assert!(check_access(&session, None, "/dashboard").is_allowed());
//!
//! let links = visible_links(NAV_LINKS, session.is_authenticated(), session.role());
//! assert!(links.iter().all(|l| l.path != "/diario"));
//! ```

pub mod auth;
pub mod claims;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod nav;
pub mod role;
pub mod session;

// Re-export main types at crate root
pub use auth::{AuthBackend, Navigator};
pub use claims::TokenClaims;
pub use credentials::{
    FieldError, FieldErrors, LoginForm, LoginRequest, LoginResponse, RegisterForm,
    RegisterRequest,
};
pub use error::AuthError;
pub use guard::{
    GuardDecision, RouteRule, check_access, post_login_target, requested_url, rule_for,
};
pub use nav::{NAV_LINKS, NavLink, visible_links};
pub use role::Role;
pub use session::{Identity, Session, SessionStore};
