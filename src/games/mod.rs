//! Rulesets shipped with the engine.
//!
//! - `nocando`: partisan domino placement (the exemplar)
//! - `nim`: impartial pile removal

pub mod nim;
pub mod nocando;
