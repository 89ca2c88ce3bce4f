//! Match results.

use crate::core::{Side, SideMap};
use crate::error::IllegalMoveError;

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// `loser` had no options on their turn.
    Win {
        winner: Side,
        loser: Side,
        /// Moves applied before the end.
        turns: usize,
    },
    /// `offender` misbehaved and was disqualified.
    Forfeit {
        winner: Side,
        offender: Side,
        error: IllegalMoveError,
        turns: usize,
    },
    /// Stopped externally before a winner was decided.
    Halted { turns: usize },
}

impl MatchOutcome {
    /// The winning side, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self {
            MatchOutcome::Win { winner, .. } | MatchOutcome::Forfeit { winner, .. } => {
                Some(*winner)
            }
            MatchOutcome::Halted { .. } => None,
        }
    }

    /// The side that forfeited, if any.
    #[must_use]
    pub fn forfeiter(&self) -> Option<Side> {
        match self {
            MatchOutcome::Forfeit { offender, .. } => Some(*offender),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        matches!(self, MatchOutcome::Halted { .. })
    }

    /// Moves applied during the match.
    #[must_use]
    pub fn turns(&self) -> usize {
        match self {
            MatchOutcome::Win { turns, .. }
            | MatchOutcome::Forfeit { turns, .. }
            | MatchOutcome::Halted { turns } => *turns,
        }
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOutcome::Win { winner, loser, .. } => {
                write!(f, "There are no options for {loser}! {winner} wins!")
            }
            MatchOutcome::Forfeit {
                winner,
                offender,
                error,
                ..
            } => write!(f, "{offender} forfeits ({error}). {winner} wins by default!"),
            MatchOutcome::Halted { .. } => {
                write!(f, "The match was halted before a winner was decided.")
            }
        }
    }
}

/// Aggregate results over repeated matches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeriesTally {
    /// Wins per side, forfeit wins included.
    pub wins: SideMap<u32>,
    /// Forfeits per offending side.
    pub forfeits: SideMap<u32>,
    /// Matches played to a decision.
    pub decided: u32,
    /// Whether the series was cut short by a halt.
    pub halted: bool,
}

impl SeriesTally {
    /// Fold one outcome into the tally.
    pub fn record(&mut self, outcome: &MatchOutcome) {
        match outcome {
            MatchOutcome::Win { winner, .. } => {
                self.wins[*winner] += 1;
                self.decided += 1;
            }
            MatchOutcome::Forfeit {
                winner, offender, ..
            } => {
                self.wins[*winner] += 1;
                self.forfeits[*offender] += 1;
                self.decided += 1;
            }
            MatchOutcome::Halted { .. } => self.halted = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narration() {
        let win = MatchOutcome::Win {
            winner: Side::Left,
            loser: Side::Right,
            turns: 1,
        };
        assert_eq!(win.to_string(), "There are no options for Right! Left wins!");

        let forfeit = MatchOutcome::Forfeit {
            winner: Side::Left,
            offender: Side::Right,
            error: IllegalMoveError::NotAnOption { side: Side::Right },
            turns: 3,
        };
        assert_eq!(
            forfeit.to_string(),
            "Right forfeits (Right returned a position that is not one of its options). Left wins by default!"
        );
        assert_eq!(forfeit.winner(), Some(Side::Left));
        assert_eq!(forfeit.forfeiter(), Some(Side::Right));

        let halted = MatchOutcome::Halted { turns: 0 };
        assert_eq!(halted.winner(), None);
        assert!(halted.is_halted());
    }

    #[test]
    fn test_series_tally() {
        let mut tally = SeriesTally::default();
        tally.record(&MatchOutcome::Win {
            winner: Side::Right,
            loser: Side::Left,
            turns: 4,
        });
        tally.record(&MatchOutcome::Forfeit {
            winner: Side::Right,
            offender: Side::Left,
            error: IllegalMoveError::NotAnOption { side: Side::Left },
            turns: 0,
        });

        assert_eq!(tally.wins[Side::Right], 2);
        assert_eq!(tally.forfeits[Side::Left], 1);
        assert_eq!(tally.decided, 2);
        assert!(!tally.halted);
    }
}
