//! NoCanDo ruleset integration tests.

use cgt_referee::core::{GameRng, Position, PositionFactory, Side};
use cgt_referee::error::{FactoryError, Violation};
use cgt_referee::games::nocando::{Cell, NoCanDo, NoCanDoFactory};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

/// Play `steps` random moves, alternating sides, and return every position
/// visited.
fn random_walk(height: i32, width: i32, seed: u64, steps: usize) -> Vec<NoCanDo> {
    let mut rng = GameRng::new(seed);
    let mut position = NoCanDo::empty(height, width).unwrap();
    let mut side = Side::Left;
    let mut visited = vec![position.clone()];

    for _ in 0..steps {
        let options = position.options(side);
        let Some(next) = rng.choose(&options) else {
            break;
        };
        position = next.clone();
        visited.push(position.clone());
        side = side.opponent();
    }
    visited
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_factory_rejects_bad_dimensions() {
    let err = NoCanDoFactory::new(0, 4).create().unwrap_err();
    match err {
        FactoryError::IllegalPosition(err) => assert_eq!(
            err.violation,
            Violation::InvalidDimensions {
                height: 0,
                width: 4
            }
        ),
        FactoryError::Failed(message) => panic!("unexpected failure: {message}"),
    }
}

#[test]
fn test_standard_board_from_default_factory() {
    let board = NoCanDoFactory::default().create().unwrap();
    assert_eq!(board, NoCanDo::standard());
    assert_eq!((board.height(), board.width()), (8, 8));
}

#[test]
fn test_with_pieces_rejects_full_board() {
    // Fills the 2x3 board, leaving no liberties.
    let result = NoCanDo::with_pieces(2, 3, [Cell::new(0, 0)], [Cell::new(1, 0), Cell::new(1, 1)]);
    assert!(result.is_err());
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn test_options_on_empty_standard_board() {
    let board = NoCanDo::standard();
    assert_eq!(board.options(Side::Left).len(), 8 * 7);
    assert_eq!(board.options(Side::Right).len(), 8 * 7);
}

#[test]
fn test_options_enumerated_column_major() {
    let board = NoCanDo::empty(3, 2).unwrap();
    let anchors: Vec<Cell> = board
        .options(Side::Left)
        .iter()
        .map(|option| *option.verticals().iter().next().unwrap())
        .collect();
    assert_eq!(
        anchors,
        vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
    );
}

#[test]
fn test_one_by_one_board_has_no_options() {
    let board = NoCanDo::empty(1, 1).unwrap();
    assert!(!board.has_options(Side::Left));
    assert!(!board.has_options(Side::Right));
}

#[test]
fn test_random_walk_ends_in_terminal_position() {
    let visited = random_walk(4, 4, 7, 100);
    let last = visited.last().unwrap();
    let to_move = if visited.len() % 2 == 1 {
        Side::Left
    } else {
        Side::Right
    };
    assert!(!last.has_options(to_move));
}

proptest! {
    #[test]
    fn prop_options_are_legal_distinct_and_new(
        height in 1..6i32,
        width in 1..6i32,
        seed in any::<u64>(),
        steps in 0..12usize,
    ) {
        for position in random_walk(height, width, seed, steps) {
            prop_assert!(position.is_legal());
            for side in Side::ALL {
                let options = position.options(side);
                let distinct: FxHashSet<&NoCanDo> = options.iter().collect();
                prop_assert_eq!(distinct.len(), options.len());
                for option in &options {
                    prop_assert!(option.is_legal());
                    prop_assert_ne!(option, &position);
                    prop_assert_eq!(option.piece_count(), position.piece_count() + 1);
                }
            }
        }
    }

    #[test]
    fn prop_equality_ignores_insertion_order(seed in any::<u64>(), steps in 0..10usize) {
        let last = random_walk(5, 5, seed, steps).pop().unwrap();
        let mut verticals: Vec<Cell> = last.verticals().iter().copied().collect();
        let mut horizontals: Vec<Cell> = last.horizontals().iter().copied().collect();
        verticals.reverse();
        horizontals.reverse();

        let rebuilt = NoCanDo::with_pieces(5, 5, verticals, horizontals).unwrap();
        prop_assert_eq!(rebuilt, last);
    }
}
