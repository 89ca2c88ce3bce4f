//! Move history for replay and audit.
//!
//! An ordered sequence of position snapshots: the start position, then
//! every position produced by an applied move. Persisted with `bincode`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{Position, Side};
use crate::error::Result;

/// One snapshot in the history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry<P> {
    /// Moves applied before this snapshot (0 for the start).
    pub turn: usize,

    /// Side that produced this snapshot, `None` for the start.
    pub mover: Option<Side>,

    /// The position itself.
    pub position: P,
}

/// Ordered snapshots of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory<P> {
    entries: Vec<HistoryEntry<P>>,
}

impl<P> Default for MoveHistory<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<P: Position> MoveHistory<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start position.
    pub fn push_start(&mut self, position: P) {
        self.entries.push(HistoryEntry {
            turn: 0,
            mover: None,
            position,
        });
    }

    /// Record a position produced by `mover`.
    pub fn push_move(&mut self, turn: usize, mover: Side, position: P) {
        self.entries.push(HistoryEntry {
            turn,
            mover: Some(mover),
            position,
        });
    }

    pub fn entries(&self) -> &[HistoryEntry<P>] {
        &self.entries
    }

    /// Iterate over the positions in order.
    pub fn positions(&self) -> impl Iterator<Item = &P> {
        self.entries.iter().map(|entry| &entry.position)
    }

    /// Number of applied moves recorded.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.entries.iter().filter(|e| e.mover.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Check that every snapshot is an option of the one before it.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.entries.windows(2).all(|pair| match pair[1].mover {
            Some(mover) => pair[0].position.options(mover).contains(&pair[1].position),
            None => false,
        })
    }
}

impl<P: Position + Serialize + DeserializeOwned> MoveHistory<P> {
    /// Serialize with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::nim::Nim;

    fn sample() -> MoveHistory<Nim> {
        let mut history = MoveHistory::new();
        history.push_start(Nim::new(vec![2, 3]));
        history.push_move(1, Side::Left, Nim::new(vec![2, 2]));
        history.push_move(2, Side::Right, Nim::new(vec![0, 2]));
        history
    }

    #[test]
    fn test_move_count_excludes_start() {
        let history = sample();
        assert_eq!(history.len(), 3);
        assert_eq!(history.move_count(), 2);
        assert_eq!(history.positions().next(), Some(&Nim::new(vec![2, 3])));
    }

    #[test]
    fn test_consistency() {
        assert!(sample().is_consistent());

        let mut broken = sample();
        broken.push_move(3, Side::Left, Nim::new(vec![5, 5]));
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_bincode_round_trip() {
        let history = sample();
        let bytes = history.to_bytes().unwrap();
        let restored = MoveHistory::<Nim>::from_bytes(&bytes).unwrap();
        assert_eq!(history, restored);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(MoveHistory::<Nim>::from_bytes(&[0xff, 0xff, 0xff]).is_err());
    }
}
