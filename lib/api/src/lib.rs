//! HTTP client for the contable accounting backend.
//!
//! - [`ApiClient`]: base URL handling, request execution, error mapping
//! - [`BearerAuth`]: attaches the session token to every outgoing request
//! - `/auth` endpoints, exposed through
//!   [`contable_platform_access::AuthBackend`]
//! - Dashboard metrics and their per-role presentation

pub mod auth;
pub mod bearer;
pub mod client;
pub mod dashboard;
pub mod error;

pub use bearer::{BearerAuth, TokenSource};
pub use client::ApiClient;
pub use dashboard::{
    Alert, AlertLevel, Card, DASHBOARD_FAILED_MESSAGE, DashboardMetrics, DashboardView, Kpi,
    RecentEntry, format_quetzales,
};
pub use error::{ApiError, ErrorBody};
