//! Direction types shared by the dice, the planner, and the board.

use serde::{Deserialize, Serialize};

/// Which way a triangle (cell or die apex) points.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Pointing {
    /// Apex faces up.
    #[display("up")]
    Up,
    /// Apex faces down.
    #[display("down")]
    Down,
}

impl Pointing {
    /// Returns the opposite orientation.
    pub fn flipped(self) -> Self {
        match self {
            Pointing::Up => Pointing::Down,
            Pointing::Down => Pointing::Up,
        }
    }
}

/// Direction of a tip onto a neighbouring cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Tip over the upper edge.
    #[display("up")]
    Up,
    /// Tip over the lower edge.
    #[display("down")]
    Down,
    /// Tip to the left neighbour.
    #[display("left")]
    Left,
    /// Tip to the right neighbour.
    #[display("right")]
    Right,
}

impl Direction {
    /// All four tip directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the direction that undoes a tip in this direction.
    pub fn inverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True for `Up` and `Down`.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Side of an in-place spin.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Spin {
    /// Spin towards the left face.
    #[display("left")]
    Left,
    /// Spin towards the right face.
    #[display("right")]
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_inverse_is_involution() {
        for direction in Direction::iter() {
            assert_eq!(direction.inverse().inverse(), direction);
            assert_ne!(direction.inverse(), direction);
        }
    }

    #[test]
    fn test_inverse_keeps_axis() {
        for direction in Direction::ALL {
            assert_eq!(direction.is_vertical(), direction.inverse().is_vertical());
        }
    }

    #[test]
    fn test_pointing_flip() {
        assert_eq!(Pointing::Up.flipped(), Pointing::Down);
        assert_eq!(Pointing::Down.flipped(), Pointing::Up);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "\"left\"");
        let pointing: Pointing = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(pointing, Pointing::Down);
    }
}
