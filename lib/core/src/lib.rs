//! Core building blocks for the contable console.
//!
//! This crate provides the foundational pieces shared by every other crate:
//! the `Result` alias used for infrastructure failures, the durable
//! key/value storage abstraction the session and theme preference persist
//! through, and the in-flight gate that keeps a form from submitting twice.

pub mod error;
pub mod inflight;
pub mod storage;

pub use error::Result;
pub use inflight::{InFlight, InFlightGuard};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
