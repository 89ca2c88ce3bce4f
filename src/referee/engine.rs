//! The referee state machine.
//!
//! ```text
//!            +-----------------------------------------------+
//!            v                                               |
//! Idle -> [AwaitingAdvance] -> RequestingMove -> Validating -> Applying
//!            |                                      |            |
//!            v                                      v            v
//!          Halted                               Forfeited   CheckingTerminal -> Terminal
//! ```
//!
//! Halts are only observed at the top of the loop, before the advance
//! wait and again after it, so a turn is never interrupted midway.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, trace, warn};

use super::config::{AdvancementPolicy, RefereeConfig};
use super::gate::AdvancementGate;
use super::halt::HaltHandle;
use super::history::MoveHistory;
use super::observer::Observer;
use super::outcome::{MatchOutcome, SeriesTally};
use crate::core::{Position, PositionFactory, Side, SideMap};
use crate::error::{IllegalMoveError, RefereeError, Result};
use crate::players::Player;

/// Where the referee is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefereePhase {
    /// No match running yet.
    Idle,
    /// Parked on the advancement gate.
    AwaitingAdvance,
    /// Waiting for the acting player's choice.
    RequestingMove,
    /// Checking the choice against the enumerated options.
    Validating,
    /// Swapping in the new position and flipping sides.
    Applying,
    /// Enumerating the next side's options.
    CheckingTerminal,
    /// A side ran out of options.
    Terminal,
    /// A side was disqualified.
    Forfeited,
    /// Stopped externally.
    Halted,
}

impl RefereePhase {
    /// Check whether the match has ended.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(
            self,
            RefereePhase::Terminal | RefereePhase::Forfeited | RefereePhase::Halted
        )
    }
}

/// Runs matches between two players under normal play.
///
/// The referee exclusively owns the match state. Players get a read-only
/// view of the current position and must return one of its options;
/// observers see each new position before the loop continues.
pub struct Referee<P: Position> {
    players: SideMap<Box<dyn Player<P>>>,
    factory: Box<dyn PositionFactory<P>>,
    config: RefereeConfig,
    policy: AdvancementPolicy,
    halt: HaltHandle,
    observers: Vec<Box<dyn Observer<P>>>,

    phase: RefereePhase,
    position: Option<P>,
    current: Side,
    turns: usize,
    history: MoveHistory<P>,
}

impl<P: Position> Referee<P> {
    /// Create a referee. The advancement policy follows `config.advance`.
    pub fn new(
        left: impl Player<P> + 'static,
        right: impl Player<P> + 'static,
        factory: impl PositionFactory<P> + 'static,
        config: RefereeConfig,
    ) -> Self {
        let left: Box<dyn Player<P>> = Box::new(left);
        let right: Box<dyn Player<P>> = Box::new(right);
        let policy = AdvancementPolicy::from_mode(config.advance);
        let halt = HaltHandle::new();
        if let Some(gate) = policy.gate() {
            halt.attach_gate(gate.clone());
        }

        Self {
            players: SideMap::new(left, right),
            factory: Box::new(factory),
            current: config.starting_side,
            config,
            policy,
            halt,
            observers: Vec::new(),
            phase: RefereePhase::Idle,
            position: None,
            turns: 0,
            history: MoveHistory::new(),
        }
    }

    /// Replace the advancement policy, e.g. with a gate owned by a UI.
    pub fn with_policy(mut self, policy: AdvancementPolicy) -> Self {
        if let Some(gate) = policy.gate() {
            self.halt.attach_gate(gate.clone());
        }
        self.policy = policy;
        self
    }

    /// Add a transition observer.
    pub fn with_observer(mut self, observer: impl Observer<P> + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &RefereeConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> RefereePhase {
        self.phase
    }

    /// Snapshot of the current position. `None` before the first run.
    #[must_use]
    pub fn current_position(&self) -> Option<&P> {
        self.position.as_ref()
    }

    /// Side to move.
    #[must_use]
    pub fn current_side(&self) -> Side {
        self.current
    }

    /// Moves applied in the current (or last) match.
    #[must_use]
    pub fn turns(&self) -> usize {
        self.turns
    }

    #[must_use]
    pub fn history(&self) -> &MoveHistory<P> {
        &self.history
    }

    #[must_use]
    pub fn player_name(&self, side: Side) -> &str {
        self.players[side].name()
    }

    /// Handle for stopping the referee from another thread.
    #[must_use]
    pub fn halt_handle(&self) -> HaltHandle {
        self.halt.clone()
    }

    /// The advancement gate, when gated.
    #[must_use]
    pub fn gate(&self) -> Option<AdvancementGate> {
        self.policy.gate().cloned()
    }

    /// Ask the referee to stop at its next checkpoint.
    pub fn request_halt(&self) {
        self.halt.request_halt();
    }

    // === Running ===

    /// Play one match from a fresh starting position.
    ///
    /// Errors only if the factory cannot produce a legal start; every
    /// in-match failure is turned into a forfeit.
    pub fn run(&mut self) -> Result<MatchOutcome> {
        self.reset();

        let start = self.factory.create()?;
        if !start.is_legal() {
            return Err(RefereeError::IllegalStart);
        }

        info!(
            game = P::name(),
            left = self.players[Side::Left].name(),
            right = self.players[Side::Right].name(),
            first = %self.current,
            "starting match"
        );

        if self.config.record_history {
            self.history.push_start(start.clone());
        }
        for observer in &mut self.observers {
            observer.on_start(&start, self.current);
        }
        self.position = Some(start.clone());

        let mut position = start;
        self.set_phase(RefereePhase::CheckingTerminal);
        let mut options = position.options(self.current);

        loop {
            if self.halt.is_halt_requested() {
                return Ok(self.finish(MatchOutcome::Halted { turns: self.turns }));
            }

            if options.is_empty() {
                let loser = self.current;
                return Ok(self.finish(MatchOutcome::Win {
                    winner: loser.opponent(),
                    loser,
                    turns: self.turns,
                }));
            }

            if !self.advance() {
                return Ok(self.finish(MatchOutcome::Halted { turns: self.turns }));
            }

            let side = self.current;
            self.set_phase(RefereePhase::RequestingMove);
            let choice = ask_player(
                self.players[side].as_mut(),
                &position,
                side,
                self.config.catch_panics,
            );

            self.set_phase(RefereePhase::Validating);
            let next = match choice {
                Ok(candidate) if options.contains(&candidate) => candidate,
                Ok(_) => return Ok(self.forfeit(IllegalMoveError::NotAnOption { side })),
                Err(error) => return Ok(self.forfeit(error)),
            };

            self.set_phase(RefereePhase::Applying);
            position = next;
            self.apply(&position, side);

            self.set_phase(RefereePhase::CheckingTerminal);
            options = position.options(self.current);
        }
    }

    /// Play `count` fresh matches, stopping early on a halt.
    pub fn play_matches(&mut self, count: usize) -> Result<SeriesTally> {
        let mut tally = SeriesTally::default();
        for index in 0..count {
            let outcome = self.run()?;
            debug!(index, %outcome, "series match finished");
            tally.record(&outcome);
            if outcome.is_halted() {
                break;
            }
        }
        Ok(tally)
    }

    fn reset(&mut self) {
        self.phase = RefereePhase::Idle;
        self.position = None;
        self.current = self.config.starting_side;
        self.turns = 0;
        self.history.clear();
    }

    fn set_phase(&mut self, phase: RefereePhase) {
        debug!(from = ?self.phase, to = ?phase, "phase change");
        self.phase = phase;
    }

    /// Wait for permission to request the next move.
    ///
    /// Returns `false` if the match should halt instead.
    fn advance(&mut self) -> bool {
        match self.policy.clone() {
            AdvancementPolicy::Gated(gate) => {
                self.set_phase(RefereePhase::AwaitingAdvance);
                trace!("awaiting advance signal");
                match gate.await_signal() {
                    Ok(()) => !self.halt.is_halt_requested(),
                    Err(cancelled) => {
                        warn!(%cancelled, "stopping match");
                        false
                    }
                }
            }
            AdvancementPolicy::Immediate(delay) => {
                if delay.is_zero() {
                    return true;
                }
                trace!(?delay, "pausing before next move");
                !self.halt.wait_timeout(delay)
            }
        }
    }

    fn apply(&mut self, position: &P, mover: Side) {
        self.turns += 1;
        self.current = mover.opponent();
        debug!(turn = self.turns, mover = %mover, ?position, "applied move");

        if self.config.record_history {
            self.history.push_move(self.turns, mover, position.clone());
        }
        self.position = Some(position.clone());
        for observer in &mut self.observers {
            observer.on_transition(position, mover, self.turns);
        }
    }

    fn forfeit(&mut self, error: IllegalMoveError) -> MatchOutcome {
        let offender = error.side();
        warn!(
            side = %offender,
            player = self.players[offender].name(),
            %error,
            "player forfeits"
        );
        self.finish(MatchOutcome::Forfeit {
            winner: offender.opponent(),
            offender,
            error,
            turns: self.turns,
        })
    }

    fn finish(&mut self, outcome: MatchOutcome) -> MatchOutcome {
        let phase = match outcome {
            MatchOutcome::Win { .. } => RefereePhase::Terminal,
            MatchOutcome::Forfeit { .. } => RefereePhase::Forfeited,
            MatchOutcome::Halted { .. } => RefereePhase::Halted,
        };
        self.set_phase(phase);

        match outcome.winner() {
            Some(winner) => info!(
                turns = outcome.turns(),
                "{outcome} Congratulations to {}!",
                self.players[winner].name()
            ),
            None => info!(turns = outcome.turns(), "{outcome}"),
        }

        for observer in &mut self.observers {
            observer.on_finish(&outcome);
        }
        outcome
    }
}

/// Ask `player` for a move, mapping failures to forfeit reasons.
fn ask_player<P: Position>(
    player: &mut dyn Player<P>,
    position: &P,
    side: Side,
    catch_panics: bool,
) -> std::result::Result<P, IllegalMoveError> {
    let result = if catch_panics {
        panic::catch_unwind(AssertUnwindSafe(|| player.choose_move(position, side))).map_err(
            |payload| IllegalMoveError::PlayerPanicked {
                side,
                message: panic_message(payload.as_ref()),
            },
        )?
    } else {
        player.choose_move(position, side)
    };

    result.map_err(|error| IllegalMoveError::PlayerFailed {
        side,
        message: error.to_string(),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
