//! Nim, the impartial pile-removal game.
//!
//! - A move removes one or more tokens from a single pile
//! - Both sides have the same options
//! - A side facing only empty piles loses
//!
//! Piles are kept sorted, so positions that differ only in pile order
//! compare equal.

use serde::{Deserialize, Serialize};

use crate::core::{dedup_options, Position, PositionFactory, Side};
use crate::error::FactoryError;

/// A Nim position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nim {
    piles: Vec<u32>,
}

impl Nim {
    /// Create a position from pile sizes in any order.
    #[must_use]
    pub fn new(mut piles: Vec<u32>) -> Self {
        piles.sort_unstable();
        Self { piles }
    }

    /// Pile sizes, ascending.
    #[must_use]
    pub fn piles(&self) -> &[u32] {
        &self.piles
    }

    /// XOR of all piles. Zero exactly when the side to move loses.
    #[must_use]
    pub fn nim_sum(&self) -> u32 {
        self.piles.iter().fold(0, |acc, &pile| acc ^ pile)
    }
}

impl Position for Nim {
    fn name() -> &'static str {
        "Nim"
    }

    fn options(&self, _side: Side) -> Vec<Self> {
        let mut options = Vec::new();
        for (index, &pile) in self.piles.iter().enumerate() {
            for smaller in 0..pile {
                let mut piles = self.piles.clone();
                piles[index] = smaller;
                options.push(Nim::new(piles));
            }
        }
        dedup_options(options)
    }

    fn is_legal(&self) -> bool {
        true
    }
}

impl std::fmt::Display for Nim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Nim: {:?}", self.piles)
    }
}

/// Creates Nim positions with fixed pile sizes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NimFactory {
    pub piles: Vec<u32>,
}

impl NimFactory {
    pub fn new(piles: Vec<u32>) -> Self {
        Self { piles }
    }
}

impl PositionFactory<Nim> for NimFactory {
    fn create(&mut self) -> Result<Nim, FactoryError> {
        Ok(Nim::new(self.piles.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_pile_order() {
        assert_eq!(Nim::new(vec![3, 1, 2]), Nim::new(vec![1, 2, 3]));
        assert_ne!(Nim::new(vec![1, 2]), Nim::new(vec![1, 2, 0]));
    }

    #[test]
    fn test_options_are_deduplicated() {
        // Reducing either 2 to 1 yields the same position.
        let options = Nim::new(vec![2, 2]).options(Side::Left);
        assert_eq!(
            options,
            vec![Nim::new(vec![0, 2]), Nim::new(vec![1, 2])]
        );
    }

    #[test]
    fn test_options_are_impartial() {
        let nim = Nim::new(vec![1, 3, 4]);
        assert_eq!(nim.options(Side::Left), nim.options(Side::Right));
    }

    #[test]
    fn test_empty_piles_have_no_options() {
        assert!(Nim::new(vec![0, 0]).options(Side::Left).is_empty());
        assert!(Nim::new(vec![]).options(Side::Right).is_empty());
    }

    #[test]
    fn test_nim_sum() {
        assert_eq!(Nim::new(vec![1, 2, 3]).nim_sum(), 0);
        assert_eq!(Nim::new(vec![5]).nim_sum(), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Nim::new(vec![4, 1]).to_string(), "Nim: [1, 4]");
    }
}
