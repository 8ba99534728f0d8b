//! Engine lifecycle state management.
//!
//! Provides [`ServiceState`] and [`ServiceHandle`] for tracking whether a
//! query engine is uninitialized, building its graph, ready, or unusable.
//!
//! ```rust
//! use graphrag_core::service::{ServiceHandle, ServiceState};
//!
//! let handle = ServiceHandle::new("engine");
//! assert_eq!(handle.state(), ServiceState::Uninitialized);
//!
//! handle.set_state(ServiceState::Initializing);
//! handle.set_state(ServiceState::Ready);
//! assert!(handle.state().is_ready());
//! ```

use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

// ============================================================================
// ServiceState
// ============================================================================

/// Lifecycle state of an engine.
#[derive(Clone, Debug, PartialEq)]
pub enum ServiceState {
    /// No graph has been built yet.
    Uninitialized,
    /// A graph build or reset is in progress.
    Initializing,
    /// The graph is built and queries are accepted.
    Ready,
    /// Initialization failed; the engine must not serve queries.
    Failed(String),
}

impl ServiceState {
    /// Returns `true` if the engine accepts queries and updates.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns `true` if initialization failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Initializing => write!(f, "initializing"),
            Self::Ready => write!(f, "ready"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

// ============================================================================
// ServiceHandle
// ============================================================================

/// Shared, observable engine state.
///
/// Clones share the same state; every transition is published on a watch
/// channel and logged.
#[derive(Clone)]
pub struct ServiceHandle {
    shared: Arc<Shared>,
}

struct Shared {
    name: String,
    state: watch::Sender<ServiceState>,
}

impl ServiceHandle {
    /// Create a handle in [`ServiceState::Uninitialized`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            shared: Arc::new(Shared {
                name: name.into(),
                state: watch::Sender::new(ServiceState::Uninitialized),
            }),
        }
    }

    /// Engine name.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Current state.
    pub fn state(&self) -> ServiceState {
        self.shared.state.borrow().clone()
    }

    /// Transition to `state`.
    pub fn set_state(&self, state: ServiceState) {
        log::info!("Engine '{}' -> {state}", self.shared.name);
        self.shared.state.send_replace(state);
    }

    /// Receiver that sees every later transition.
    pub fn subscribe(&self) -> watch::Receiver<ServiceState> {
        self.shared.state.subscribe()
    }

    /// Wait for the engine to become ready.
    ///
    /// Fails with `Operation` if the engine fails or `timeout` elapses first.
    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let mut rx = self.subscribe();
        let settled = tokio::time::timeout(
            timeout,
            rx.wait_for(|s| s.is_ready() || s.is_failed()),
        )
        .await
        .map_err(|_| {
            Error::operation(format!(
                "engine '{}' not ready after {timeout:?} (state: {})",
                self.shared.name,
                self.state()
            ))
        })?
        .map_err(|_| Error::operation(format!("engine '{}' was dropped", self.shared.name)))?
        .clone();

        match settled {
            ServiceState::Failed(reason) => Err(Error::operation(format!(
                "engine '{}' failed: {reason}",
                self.shared.name
            ))),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceHandle")
            .field("name", &self.shared.name)
            .field("state", &self.state())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
