//! Referee configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::gate::AdvancementGate;
use crate::core::Side;

/// How the loop decides to request the next move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceMode {
    /// Pause for `delay_ms` before each move, then proceed.
    Immediate { delay_ms: u64 },
    /// Wait for an external signal on an [`AdvancementGate`].
    Manual,
}

impl Default for AdvanceMode {
    fn default() -> Self {
        AdvanceMode::Immediate { delay_ms: 0 }
    }
}

/// Referee configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefereeConfig {
    /// Side that moves first.
    pub starting_side: Side,

    /// Keep a snapshot of every position in the match history.
    pub record_history: bool,

    /// Turn a panicking player into a forfeit instead of unwinding
    /// through the referee.
    pub catch_panics: bool,

    /// Advancement mode.
    pub advance: AdvanceMode,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            starting_side: Side::Left,
            record_history: true,
            catch_panics: true,
            advance: AdvanceMode::default(),
        }
    }
}

impl RefereeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the side that moves first.
    pub fn with_starting_side(mut self, side: Side) -> Self {
        self.starting_side = side;
        self
    }

    /// Enable or disable history snapshots.
    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Enable or disable panic capture.
    pub fn with_catch_panics(mut self, catch: bool) -> Self {
        self.catch_panics = catch;
        self
    }

    /// Pause before every move.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.advance = AdvanceMode::Immediate {
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        };
        self
    }

    /// Gate every move on an external signal.
    pub fn manual(mut self) -> Self {
        self.advance = AdvanceMode::Manual;
        self
    }
}

/// Advancement strategy injected into the referee.
#[derive(Clone, Debug)]
pub enum AdvancementPolicy {
    /// Pause, then proceed unconditionally.
    Immediate(Duration),
    /// Proceed only after the gate releases.
    Gated(AdvancementGate),
}

impl AdvancementPolicy {
    /// Build the policy a config asks for. `Manual` gets a fresh gate.
    #[must_use]
    pub fn from_mode(mode: AdvanceMode) -> Self {
        match mode {
            AdvanceMode::Immediate { delay_ms } => {
                AdvancementPolicy::Immediate(Duration::from_millis(delay_ms))
            }
            AdvanceMode::Manual => AdvancementPolicy::Gated(AdvancementGate::new()),
        }
    }

    /// The gate, when gated.
    #[must_use]
    pub fn gate(&self) -> Option<&AdvancementGate> {
        match self {
            AdvancementPolicy::Gated(gate) => Some(gate),
            AdvancementPolicy::Immediate(_) => None,
        }
    }
}

impl Default for AdvancementPolicy {
    fn default() -> Self {
        AdvancementPolicy::Immediate(Duration::ZERO)
    }
}
