//! Single-permit advancement gate.
//!
//! The gate couples an external trigger (a "next move" button on a UI
//! thread) to the referee loop:
//!
//! - `signal()` makes one permit available. Permits never accumulate, so
//!   two signals before a wait still release only one turn.
//! - `await_signal()` blocks until a permit is available and consumes it.
//!   Waiters are released in arrival order.
//! - `cancel()` wakes every waiter with [`GateCancelled`]. Cancellation is
//!   permanent.
//!
//! ```
//! use cgt_referee::referee::AdvancementGate;
//!
//! let gate = AdvancementGate::new();
//! gate.signal();
//! gate.signal();
//! assert!(gate.await_signal().is_ok());
//! assert!(!gate.has_permit());
//! ```

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::error::GateCancelled;

#[derive(Debug, Default)]
struct GateState {
    permit: bool,
    cancelled: bool,
    /// Ticket handed to the next waiter.
    next_ticket: u64,
    /// Ticket of the waiter at the head of the queue.
    serving: u64,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<GateState>,
    released: Condvar,
}

/// Binary, fair permit shared between the referee and its trigger.
///
/// Cloning yields another handle to the same gate.
#[derive(Clone, Debug, Default)]
pub struct AdvancementGate {
    shared: Arc<Shared>,
}

impl AdvancementGate {
    /// Create a gate with no permit available.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Make a permit available. A no-op if one is already outstanding or
    /// the gate is cancelled.
    pub fn signal(&self) {
        let mut state = self.lock();
        if state.cancelled || state.permit {
            return;
        }
        state.permit = true;
        trace!("gate signalled");
        self.shared.released.notify_all();
    }

    /// Block until a permit is available, then consume it.
    pub fn await_signal(&self) -> Result<(), GateCancelled> {
        let mut state = self.lock();
        let ticket = state.next_ticket;
        state.next_ticket += 1;

        loop {
            if state.cancelled {
                return Err(GateCancelled);
            }
            if state.permit && state.serving == ticket {
                state.permit = false;
                state.serving += 1;
                // The next waiter in line may already hold a later permit.
                self.shared.released.notify_all();
                return Ok(());
            }
            state = self
                .shared
                .released
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Wake all waiters with a cancellation and refuse future permits.
    pub fn cancel(&self) {
        let mut state = self.lock();
        if !state.cancelled {
            state.cancelled = true;
            state.permit = false;
            trace!("gate cancelled");
        }
        self.shared.released.notify_all();
    }

    /// Check whether the gate has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    /// Check whether a permit is waiting to be consumed.
    #[must_use]
    pub fn has_permit(&self) -> bool {
        self.lock().permit
    }
}
