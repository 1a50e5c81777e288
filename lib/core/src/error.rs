//! Shared `Result` alias.
//!
//! Fallible infrastructure calls return `Report<C>` over a small context
//! enum: session storage fails with `Report<StorageError>`, and the API
//! client's construction fails with `Report<ApiError>`. Domain layers that
//! surface errors to the user (`AuthError`, the form errors) convert the
//! report into their own enum at the boundary and log the chain there.

use rootcause::Report;

/// `Result` carrying a rootcause report with context `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
