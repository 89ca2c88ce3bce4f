//! The match referee.
//!
//! The referee owns the match state and drives it one move at a time:
//!
//! 1. Enumerate the options of the side to move; none means that side loses
//! 2. Wait for the advancement policy (a delay or an external gate)
//! 3. Ask the side's player for a move and check it is one of the options
//! 4. Apply it, flip sides and notify observers
//!
//! Anything a player does wrong ends the match as a forfeit. A
//! [`HaltHandle`] stops the loop from another thread at the next
//! checkpoint.

mod config;
mod engine;
mod gate;
mod halt;
mod history;
mod observer;
mod outcome;

pub use config::{AdvanceMode, AdvancementPolicy, RefereeConfig};
pub use engine::{Referee, RefereePhase};
pub use gate::AdvancementGate;
pub use halt::HaltHandle;
pub use history::{HistoryEntry, MoveHistory};
pub use observer::{ChannelObserver, Observer, RefereeEvent};
pub use outcome::{MatchOutcome, SeriesTally};
