//! The position and position-factory abstractions.
//!
//! Rulesets implement [`Position`] to define:
//! - What successor positions each side can move to
//! - Whether a position satisfies the ruleset's invariants
//!
//! There is no separate move type: the option set *is* the move set. A
//! player moves by handing back one element of `options(side)`.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashSet;

use super::side::Side;
use crate::error::FactoryError;

/// One immutable state of a game.
///
/// Positions are values: equality is structural and deriving a successor
/// never touches the parent.
///
/// ## Implementation Notes
///
/// - `options`: Return an empty vec if `side` cannot move. Every element
///   must be legal and differ from `self`; duplicates must be removed
///   (see [`dedup_options`]).
/// - `is_legal`: Constructors should make illegal values unrepresentable;
///   this is the check they rely on.
pub trait Position: Clone + Eq + Hash + Debug + Send + 'static {
    /// Human-readable ruleset name.
    fn name() -> &'static str;

    /// All legal successors reachable by one move of `side`.
    fn options(&self, side: Side) -> Vec<Self>;

    /// Check the ruleset's invariants.
    fn is_legal(&self) -> bool;

    /// Check whether `side` has at least one move.
    fn has_options(&self, side: Side) -> bool {
        !self.options(side).is_empty()
    }
}

/// Remove duplicate options while keeping first-seen order.
pub fn dedup_options<P: Position>(options: Vec<P>) -> Vec<P> {
    let mut seen = FxHashSet::default();
    options
        .into_iter()
        .filter(|option| seen.insert(option.clone()))
        .collect()
}

/// Produces fresh starting positions.
///
/// Every call returns an independently owned value, so repeated matches
/// never share state.
pub trait PositionFactory<P: Position>: Send {
    /// Create a new starting position.
    fn create(&mut self) -> Result<P, FactoryError>;
}

impl<P, F> PositionFactory<P> for F
where
    P: Position,
    F: FnMut() -> Result<P, FactoryError> + Send,
{
    fn create(&mut self) -> Result<P, FactoryError> {
        self()
    }
}

/// Factory that hands out clones of one fixed start.
#[derive(Clone, Debug)]
pub struct CloneFactory<P> {
    start: P,
}

impl<P: Position> CloneFactory<P> {
    /// Create a factory for `start`.
    pub fn new(start: P) -> Self {
        Self { start }
    }
}

impl<P: Position> PositionFactory<P> for CloneFactory<P> {
    fn create(&mut self) -> Result<P, FactoryError> {
        Ok(self.start.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::nim::Nim;

    #[test]
    fn test_dedup_options_keeps_first_seen_order() {
        let options = vec![
            Nim::new(vec![1, 2]),
            Nim::new(vec![0, 2]),
            Nim::new(vec![2, 1]),
        ];
        let deduped = dedup_options(options);
        assert_eq!(deduped, vec![Nim::new(vec![1, 2]), Nim::new(vec![0, 2])]);
    }

    #[test]
    fn test_clone_factory_returns_equal_starts() {
        let mut factory = CloneFactory::new(Nim::new(vec![3, 4]));
        let a = factory.create().unwrap();
        let b = factory.create().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_closure_factory() {
        let mut calls = 0;
        let mut factory = || {
            calls += 1;
            Ok::<_, FactoryError>(Nim::new(vec![calls]))
        };
        assert_eq!(PositionFactory::create(&mut factory).unwrap(), Nim::new(vec![1]));
        assert_eq!(PositionFactory::create(&mut factory).unwrap(), Nim::new(vec![2]));
    }
}
