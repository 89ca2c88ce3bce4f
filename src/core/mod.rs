//! Core engine types: sides, positions, factories, RNG.
//!
//! Nothing here knows about a specific ruleset. Games plug in by
//! implementing [`Position`] and providing a [`PositionFactory`].

pub mod position;
pub mod rng;
pub mod side;

pub use position::{dedup_options, CloneFactory, Position, PositionFactory};
pub use rng::GameRng;
pub use side::{Side, SideMap};
