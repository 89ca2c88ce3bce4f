//! NoCanDo, a domino-placement game on a grid.
//!
//! - Left places dominoes vertically, Right horizontally
//! - Dominoes may not overlap or hang off the board
//! - After every move, each domino must touch at least one empty cell
//!   (a liberty), counted over its whole footprint
//! - A side with no legal placement loses

mod board;
mod domino;

pub use board::{NoCanDo, NoCanDoFactory, STANDARD_SIZE};
pub use domino::{Cell, Domino, Orientation};
