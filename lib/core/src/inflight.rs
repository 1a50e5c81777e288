//! Gate for operations that must not run twice concurrently.
//!
//! A form acquires the gate before dispatching its request and holds the
//! returned guard until the request resolves. While the guard is alive any
//! further acquisition fails, so a double click submits once.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared in-flight flag for one operation.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    active: Arc<AtomicBool>,
}

impl InFlight {
    /// Creates an idle gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the operation as in flight.
    ///
    /// Returns `None` when another submission already holds the gate.
    #[must_use]
    pub fn try_begin(&self) -> Option<InFlightGuard> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                active: Arc::clone(&self.active),
            })
    }

    /// Returns true while a submission holds the gate.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Releases the gate when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    active: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        tracing::trace!("in-flight gate released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquisition_is_rejected() {
        let gate = InFlight::new();
        let guard = gate.try_begin();
        assert!(guard.is_some());
        assert!(gate.is_active());
        assert!(gate.try_begin().is_none());
    }

    #[test]
    fn dropping_guard_releases_gate() {
        let gate = InFlight::new();
        {
            let _guard = gate.try_begin().expect("first acquisition");
        }
        assert!(!gate.is_active());
        assert!(gate.try_begin().is_some());
    }

    #[test]
    fn clones_share_the_same_flag() {
        let gate = InFlight::new();
        let other = gate.clone();
        let _guard = gate.try_begin().expect("acquire");
        assert!(other.is_active());
        assert!(other.try_begin().is_none());
    }
}
