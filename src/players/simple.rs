//! Baseline players.

use crate::core::{GameRng, Position, Side};
use crate::error::PlayerError;

use super::Player;

/// Picks uniformly among the options.
///
/// Seeded, so two players with the same seed make the same choices.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl<P: Position> Player<P> for RandomPlayer {
    fn name(&self) -> &str {
        "Random player"
    }

    fn choose_move(&mut self, position: &P, side: Side) -> Result<P, PlayerError> {
        let mut options = position.options(side);
        if options.is_empty() {
            return Err(PlayerError::new(format!("{side} has no options")));
        }
        let index = self.rng.index(options.len());
        Ok(options.swap_remove(index))
    }
}

/// Always takes the first enumerated option.
#[derive(Clone, Debug, Default)]
pub struct FirstOptionPlayer;

impl<P: Position> Player<P> for FirstOptionPlayer {
    fn name(&self) -> &str {
        "First-option player"
    }

    fn choose_move(&mut self, position: &P, side: Side) -> Result<P, PlayerError> {
        position
            .options(side)
            .into_iter()
            .next()
            .ok_or_else(|| PlayerError::new(format!("{side} has no options")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::nim::Nim;
    use crate::games::nocando::NoCanDo;

    #[test]
    fn test_random_player_returns_an_option() {
        let board = NoCanDo::empty(4, 4).unwrap();
        let mut player = RandomPlayer::new(42);
        for side in Side::ALL {
            let choice = player.choose_move(&board, side).unwrap();
            assert!(board.options(side).contains(&choice));
        }
    }

    #[test]
    fn test_random_player_deterministic_with_seed() {
        let nim = Nim::new(vec![5, 6, 7]);
        let mut a = RandomPlayer::new(9);
        let mut b = RandomPlayer::new(9);
        for _ in 0..10 {
            assert_eq!(
                a.choose_move(&nim, Side::Left).unwrap(),
                b.choose_move(&nim, Side::Left).unwrap()
            );
        }
    }

    #[test]
    fn test_no_options_is_an_error() {
        let nim = Nim::new(vec![0]);
        assert!(Player::<Nim>::choose_move(&mut RandomPlayer::new(1), &nim, Side::Left).is_err());
        assert!(Player::<Nim>::choose_move(&mut FirstOptionPlayer, &nim, Side::Left).is_err());
    }

    #[test]
    fn test_first_option_player() {
        let nim = Nim::new(vec![2]);
        let choice = FirstOptionPlayer.choose_move(&nim, Side::Right).unwrap();
        assert_eq!(choice, Nim::new(vec![0]));
        assert_eq!(Player::<Nim>::name(&FirstOptionPlayer), "First-option player");
    }
}
