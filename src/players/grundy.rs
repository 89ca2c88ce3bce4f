//! Grundy values (nimbers) for impartial games.
//!
//! The Grundy value of a position is the minimum excludant of its
//! options' values. A position is a loss for the side to move exactly
//! when its value is zero, so a perfect player always moves to a
//! zero-valued option when one exists.

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::core::{Position, Side};
use crate::error::PlayerError;

use super::Player;

/// Smallest natural number not in `values`.
#[must_use]
pub fn mex(values: &[u32]) -> u32 {
    let mut candidate = 0;
    while values.contains(&candidate) {
        candidate += 1;
    }
    candidate
}

/// Memoising Grundy evaluator.
///
/// Only meaningful for impartial rulesets, where both sides share their
/// options. Evaluation uses Left's options.
#[derive(Clone, Debug)]
pub struct GrundySolver<P: Position> {
    memo: FxHashMap<P, u32>,
}

impl<P: Position> Default for GrundySolver<P> {
    fn default() -> Self {
        Self {
            memo: FxHashMap::default(),
        }
    }
}

impl<P: Position> GrundySolver<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grundy value of `position`.
    pub fn evaluate(&mut self, position: &P) -> u32 {
        if let Some(&value) = self.memo.get(position) {
            return value;
        }
        let values: Vec<u32> = position
            .options(Side::Left)
            .iter()
            .map(|option| self.evaluate(option))
            .collect();
        let value = mex(&values);
        trace!(?position, value, "evaluated position");
        self.memo.insert(position.clone(), value);
        value
    }

    /// Check whether a position has been evaluated.
    #[must_use]
    pub fn has_evaluated(&self, position: &P) -> bool {
        self.memo.contains_key(position)
    }

    /// Number of memoised positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    /// Forget every memoised value.
    pub fn clear(&mut self) {
        self.memo.clear();
    }
}

/// Plays perfectly in impartial games by moving to zero-valued options.
///
/// Falls back to the first option when every option has a non-zero value.
#[derive(Clone, Debug)]
pub struct GrundyPlayer<P: Position> {
    solver: GrundySolver<P>,
}

impl<P: Position> Default for GrundyPlayer<P> {
    fn default() -> Self {
        Self {
            solver: GrundySolver::new(),
        }
    }
}

impl<P: Position> GrundyPlayer<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying solver, including its memo.
    pub fn solver(&self) -> &GrundySolver<P> {
        &self.solver
    }

    /// Drop the solver's memo. Long series over large games can call this
    /// between matches to bound memory.
    pub fn clear_memo(&mut self) {
        self.solver.clear();
    }
}

impl<P: Position> Player<P> for GrundyPlayer<P> {
    fn name(&self) -> &str {
        "Grundy player"
    }

    fn choose_move(&mut self, position: &P, side: Side) -> Result<P, PlayerError> {
        let options = position.options(side);
        let winning = options
            .iter()
            .position(|option| self.solver.evaluate(option) == 0);
        let index = winning.unwrap_or(0);
        options
            .into_iter()
            .nth(index)
            .ok_or_else(|| PlayerError::new(format!("{side} has no options")))
    }
}

/// A conjectured closed-form nimber formula for a ruleset.
pub trait Nimberizer<P: Position> {
    /// The value this formula claims for `position`.
    fn nimberize(&self, position: &P) -> u32;
}

impl<P: Position, F: Fn(&P) -> u32> Nimberizer<P> for F {
    fn nimberize(&self, position: &P) -> u32 {
        self(position)
    }
}

/// Checks a [`Nimberizer`] against exhaustive Grundy evaluation.
///
/// Every checked position is remembered, so re-verifying is free and the
/// mismatches can be listed afterwards.
pub struct NimberVerifier<P: Position, N> {
    nimberizer: N,
    solver: GrundySolver<P>,
    checked: FxHashMap<P, bool>,
    incorrect: Vec<P>,
}

impl<P: Position, N: Nimberizer<P>> NimberVerifier<P, N> {
    pub fn new(nimberizer: N) -> Self {
        Self {
            nimberizer,
            solver: GrundySolver::new(),
            checked: FxHashMap::default(),
            incorrect: Vec::new(),
        }
    }

    /// Check the formula on one position.
    pub fn verify(&mut self, position: &P) -> bool {
        if let Some(&correct) = self.checked.get(position) {
            return correct;
        }
        let guess = self.nimberizer.nimberize(position);
        let actual = self.solver.evaluate(position);
        let correct = guess == actual;
        if !correct {
            warn!(?position, guess, actual, "nimber formula disagrees");
            self.incorrect.push(position.clone());
        }
        self.checked.insert(position.clone(), correct);
        correct
    }

    /// Check every position, continuing past failures.
    pub fn verify_all<'a>(&mut self, positions: impl IntoIterator<Item = &'a P>) -> bool {
        positions
            .into_iter()
            .fold(true, |all, position| self.verify(position) && all)
    }

    /// Check whether `position` was verified and found correct.
    #[must_use]
    pub fn has_verified(&self, position: &P) -> bool {
        self.checked.get(position).copied().unwrap_or(false)
    }

    /// Positions where the formula was wrong, in discovery order.
    #[must_use]
    pub fn incorrect(&self) -> &[P] {
        &self.incorrect
    }
}
