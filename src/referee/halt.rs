//! External halt requests.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use super::gate::AdvancementGate;

#[derive(Debug, Default)]
struct HaltState {
    requested: bool,
    gate: Option<AdvancementGate>,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<HaltState>,
    changed: Condvar,
}

/// Idempotent stop switch, settable from any thread.
///
/// The referee only looks at it at the top of its loop, so a halt never
/// interrupts a turn in progress. A pending delay is cut short, and a
/// referee parked on its advancement gate is woken by cancelling the gate.
#[derive(Clone, Debug, Default)]
pub struct HaltHandle {
    shared: Arc<Shared>,
}

impl HaltHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HaltState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Ask the referee to stop at its next checkpoint.
    pub fn request_halt(&self) {
        let mut state = self.lock();
        if !state.requested {
            state.requested = true;
            debug!("halt requested");
        }
        if let Some(gate) = &state.gate {
            gate.cancel();
        }
        self.shared.changed.notify_all();
    }

    #[must_use]
    pub fn is_halt_requested(&self) -> bool {
        self.lock().requested
    }

    /// Cancel `gate` when a halt is requested (immediately if one already
    /// was).
    pub(crate) fn attach_gate(&self, gate: AdvancementGate) {
        let mut state = self.lock();
        if state.requested {
            gate.cancel();
        }
        state.gate = Some(gate);
    }

    /// Sleep for `delay` or until a halt is requested.
    ///
    /// Returns `true` if a halt was requested.
    pub(crate) fn wait_timeout(&self, delay: Duration) -> bool {
        let deadline = Instant::now() + delay;
        let mut state = self.lock();
        loop {
            if state.requested {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) = self
                .shared
                .changed
                .wait_timeout(state, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_request_is_idempotent() {
        let halt = HaltHandle::new();
        assert!(!halt.is_halt_requested());
        halt.request_halt();
        halt.request_halt();
        assert!(halt.is_halt_requested());
    }

    #[test]
    fn test_wait_timeout_elapses() {
        let halt = HaltHandle::new();
        assert!(!halt.wait_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn test_halt_cuts_delay_short() {
        let halt = HaltHandle::new();
        let remote = halt.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.request_halt();
        });

        let start = Instant::now();
        assert!(halt.wait_timeout(Duration::from_secs(30)));
        assert!(start.elapsed() < Duration::from_secs(30));
        handle.join().unwrap();
    }

    #[test]
    fn test_halt_cancels_attached_gate() {
        let halt = HaltHandle::new();
        let gate = AdvancementGate::new();
        halt.attach_gate(gate.clone());
        halt.request_halt();
        assert!(gate.is_cancelled());

        let late = AdvancementGate::new();
        halt.attach_gate(late.clone());
        assert!(late.is_cancelled());
    }
}
