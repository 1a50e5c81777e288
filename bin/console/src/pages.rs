//! Page components for the application.
//!
//! Each page is a Leptos component that renders a specific route.

pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod register;

// Re-export all page components for convenient access
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use register::RegisterPage;
