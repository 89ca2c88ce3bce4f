//! Transition observers.
//!
//! Observers are invoked synchronously on the referee thread: once at
//! match start, after every applied move, and once at the end. They see
//! read-only snapshots and cannot influence the match. A renderer on
//! another thread should use [`ChannelObserver`] rather than blocking
//! inside a callback.

use tokio::sync::mpsc;

use super::outcome::MatchOutcome;
use crate::core::{Position, Side};

/// Callbacks fired by the referee.
pub trait Observer<P: Position>: Send {
    /// The starting position, with the side about to move.
    fn on_start(&mut self, _position: &P, _to_move: Side) {}

    /// `mover` produced `position`; `turn` moves have now been applied.
    fn on_transition(&mut self, _position: &P, _mover: Side, _turn: usize) {}

    /// The match ended.
    fn on_finish(&mut self, _outcome: &MatchOutcome) {}
}

/// Events forwarded by [`ChannelObserver`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefereeEvent<P> {
    Started { position: P, to_move: Side },
    Moved { position: P, mover: Side, turn: usize },
    Finished(MatchOutcome),
}

/// Forwards every callback as a [`RefereeEvent`] on an unbounded channel.
///
/// Sending never blocks. Events are dropped once the receiver is gone.
pub struct ChannelObserver<P> {
    tx: mpsc::UnboundedSender<RefereeEvent<P>>,
}

impl<P: Position> ChannelObserver<P> {
    /// Create an observer and the receiving end for the UI thread.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RefereeEvent<P>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: RefereeEvent<P>) {
        let _ = self.tx.send(event);
    }
}

impl<P: Position> Observer<P> for ChannelObserver<P> {
    fn on_start(&mut self, position: &P, to_move: Side) {
        self.send(RefereeEvent::Started {
            position: position.clone(),
            to_move,
        });
    }

    fn on_transition(&mut self, position: &P, mover: Side, turn: usize) {
        self.send(RefereeEvent::Moved {
            position: position.clone(),
            mover,
            turn,
        });
    }

    fn on_finish(&mut self, outcome: &MatchOutcome) {
        self.send(RefereeEvent::Finished(outcome.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::nim::Nim;

    #[test]
    fn test_channel_observer_forwards_events() {
        let (mut observer, mut rx) = ChannelObserver::channel();
        observer.on_start(&Nim::new(vec![1]), Side::Left);
        observer.on_transition(&Nim::new(vec![0]), Side::Left, 1);

        assert_eq!(
            rx.try_recv().unwrap(),
            RefereeEvent::Started {
                position: Nim::new(vec![1]),
                to_move: Side::Left
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            RefereeEvent::Moved {
                position: Nim::new(vec![0]),
                mover: Side::Left,
                turn: 1
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_send_after_receiver_dropped_is_ignored() {
        let (mut observer, rx) = ChannelObserver::<Nim>::channel();
        drop(rx);
        observer.on_finish(&MatchOutcome::Halted { turns: 0 });
    }
}
