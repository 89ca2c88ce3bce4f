//! Error types for cgt-referee.
//!
//! Legality violations and player misbehaviour are recovered locally:
//! the former by dropping the candidate, the latter by forfeiting the
//! offending side. Only [`RefereeError`] ever aborts a run, and it is
//! always raised before the first turn.

use std::fmt;

use thiserror::Error;

use crate::core::Side;
use crate::games::nocando::Domino;

/// Why a position failed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// A piece hangs over the edge of the board.
    OutOfBounds { piece: Domino },
    /// Two pieces cover a common cell.
    Overlap { first: Domino, second: Domino },
    /// A piece has no free neighbouring cell.
    NoLiberty { piece: Domino },
    /// The board has a zero-length side.
    InvalidDimensions { height: i32, width: i32 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::OutOfBounds { piece } => write!(f, "{piece} is outside the board"),
            Violation::Overlap { first, second } => write!(f, "{first} overlaps {second}"),
            Violation::NoLiberty { piece } => write!(f, "{piece} has no liberties"),
            Violation::InvalidDimensions { height, width } => {
                write!(f, "invalid board dimensions {height}x{width}")
            }
        }
    }
}

/// A constructor was asked to build a position that breaks an invariant.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("illegal position: {violation}")]
pub struct IllegalPositionError {
    pub violation: Violation,
}

impl From<Violation> for IllegalPositionError {
    fn from(violation: Violation) -> Self {
        Self { violation }
    }
}

/// A player could not produce a move.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{0}")]
pub struct PlayerError(pub String);

impl PlayerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The acting side did not hand back one of its options.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum IllegalMoveError {
    #[error("{side} returned a position that is not one of its options")]
    NotAnOption { side: Side },

    #[error("{side} failed to choose a move: {message}")]
    PlayerFailed { side: Side, message: String },

    #[error("{side} panicked while choosing a move: {message}")]
    PlayerPanicked { side: Side, message: String },
}

impl IllegalMoveError {
    /// The side held responsible.
    #[must_use]
    pub fn side(&self) -> Side {
        match self {
            IllegalMoveError::NotAnOption { side }
            | IllegalMoveError::PlayerFailed { side, .. }
            | IllegalMoveError::PlayerPanicked { side, .. } => *side,
        }
    }
}

/// The gate was cancelled while (or before) waiting on it.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("advancement gate was cancelled")]
pub struct GateCancelled;

/// A position factory could not produce a start state.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum FactoryError {
    #[error(transparent)]
    IllegalPosition(#[from] IllegalPositionError),

    #[error("factory failed: {0}")]
    Failed(String),
}

/// Fatal referee errors. Raised before any turn is played.
#[derive(Error, Debug)]
pub enum RefereeError {
    #[error("could not create the starting position: {0}")]
    Factory(#[from] FactoryError),

    #[error("the starting position is not legal")]
    IllegalStart,

    #[error("history serialization error: {0}")]
    History(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, RefereeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::nocando::{Cell, Orientation};

    #[test]
    fn test_illegal_move_error_side() {
        let err = IllegalMoveError::PlayerFailed {
            side: Side::Right,
            message: "boom".to_string(),
        };
        assert_eq!(err.side(), Side::Right);
        assert_eq!(err.to_string(), "Right failed to choose a move: boom");
    }

    #[test]
    fn test_violation_display() {
        let piece = Domino::new(Orientation::Vertical, Cell::new(0, 7));
        let err = IllegalPositionError::from(Violation::OutOfBounds { piece });
        assert_eq!(
            err.to_string(),
            "illegal position: vertical domino at (0, 7) is outside the board"
        );
    }
}
