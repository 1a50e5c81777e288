//! Seams between the session store and the outside world.
//!
//! - `AuthBackend`: the remote service that checks credentials
//! - `Navigator`: whatever moves the user to another screen

use async_trait::async_trait;

use crate::credentials::{LoginRequest, LoginResponse, RegisterRequest};
use crate::error::AuthError;

/// Remote authentication service.
///
/// Futures are not required to be `Send`: in the browser they run on the
/// single-threaded executor.
#[async_trait(?Send)]
pub trait AuthBackend {
    /// Exchanges credentials for a token.
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, AuthError>;

    /// Creates a new account and returns the backend's answer untouched.
    async fn register(&self, data: &RegisterRequest) -> Result<serde_json::Value, AuthError>;
}

/// Moves the user to another route.
pub trait Navigator {
    /// Navigates to `path`.
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, path: &str) {
        self(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn closures_are_navigators() {
        let visited = RefCell::new(Vec::new());
        let navigator = |path: &str| visited.borrow_mut().push(path.to_string());
        navigator.navigate("/login");
        assert_eq!(visited.borrow().as_slice(), ["/login"]);
    }
}
