//! Move-selection strategies.
//!
//! A player receives a read-only position and the side it is playing,
//! and hands back one element of `position.options(side)`. The referee
//! treats anything else, including an `Err`, as a forfeit.

mod grundy;
mod simple;

pub use grundy::{mex, GrundyPlayer, GrundySolver, NimberVerifier, Nimberizer};
pub use simple::{FirstOptionPlayer, RandomPlayer};

use crate::core::{Position, Side};
use crate::error::PlayerError;

/// A strategy for one side of a match.
pub trait Player<P: Position>: Send {
    /// Display name used in narration.
    fn name(&self) -> &str;

    /// Choose one option of `position` for `side`.
    fn choose_move(&mut self, position: &P, side: Side) -> Result<P, PlayerError>;
}

impl<P: Position> Player<P> for Box<dyn Player<P>> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_move(&mut self, position: &P, side: Side) -> Result<P, PlayerError> {
        (**self).choose_move(position, side)
    }
}
