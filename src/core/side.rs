//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! One of the two competing roles, Left or Right. Left moves first unless
//! the referee is configured otherwise.
//!
//! ## SideMap
//!
//! Fixed two-entry storage indexed by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two competing roles in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides, Left first.
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Get the raw side index (Left = 0, Right = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

impl Default for Side {
    fn default() -> Self {
        Side::Left
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "Left"),
            Side::Right => write!(f, "Right"),
        }
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use cgt_referee::core::{Side, SideMap};
///
/// let mut wins: SideMap<u32> = SideMap::default();
/// wins[Side::Right] += 1;
/// assert_eq!(wins[Side::Left], 0);
/// assert_eq!(wins[Side::Right], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create with one value per side.
    pub fn new(left: T, right: T) -> Self {
        Self { data: [left, right] }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::Left.index(), 0);
        assert_eq!(Side::Right.index(), 1);
        assert_eq!(Side::Left.opponent(), Side::Right);
        assert_eq!(Side::Right.opponent().opponent(), Side::Right);
        assert_eq!(format!("{}", Side::Left), "Left");
    }

    #[test]
    fn test_side_map_index_mut() {
        let mut map = SideMap::new(0, 10);
        map[Side::Right] += 5;
        assert_eq!(map[Side::Left], 0);
        assert_eq!(*map.get(Side::Right), 15);
    }

    #[test]
    fn test_side_map_iter() {
        let map = SideMap::new("a", "b");
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::Left, &"a"), (Side::Right, &"b")]);
    }

    #[test]
    fn test_side_map_serialization() {
        let map = SideMap::new(1u32, 2u32);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SideMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
