//! # cgt-referee
//!
//! A referee for two-player combinatorial games under normal play: the
//! side left without options loses.
//!
//! ## Design Principles
//!
//! 1. **Positions are values**: A game is nothing but its [`Position`]
//!    type. Moves are successor positions, so there is no move encoding.
//!
//! 2. **Players are untrusted**: Whatever a [`Player`] returns is checked
//!    against the enumerated options. Errors, panics and foreign positions
//!    all become forfeits.
//!
//! 3. **Pacing is pluggable**: The referee either pauses between moves or
//!    waits on an [`AdvancementGate`] driven from another thread.
//!
//! ## Modules
//!
//! - `core`: Sides, the position and factory traits, RNG
//! - `games`: Rulesets (No Can Do, Nim)
//! - `players`: Random, first-option and Grundy-value players
//! - `referee`: The match loop, gate, halt handle, observers, history
//! - `error`: Error taxonomy

pub mod core;
pub mod error;
pub mod games;
pub mod players;
pub mod referee;

// Re-export commonly used types
pub use crate::core::{
    dedup_options, CloneFactory, GameRng, Position, PositionFactory, Side, SideMap,
};

pub use crate::error::{
    FactoryError, GateCancelled, IllegalMoveError, IllegalPositionError, PlayerError,
    RefereeError, Result, Violation,
};

pub use crate::games::nim::{Nim, NimFactory};
pub use crate::games::nocando::{Cell, Domino, NoCanDo, NoCanDoFactory, Orientation};

pub use crate::players::{
    mex, FirstOptionPlayer, GrundyPlayer, GrundySolver, NimberVerifier, Nimberizer, Player,
    RandomPlayer,
};

pub use crate::referee::{
    AdvanceMode, AdvancementGate, AdvancementPolicy, ChannelObserver, HaltHandle, HistoryEntry,
    MatchOutcome, MoveHistory, Observer, Referee, RefereeConfig, RefereeEvent, RefereePhase,
    SeriesTally,
};
