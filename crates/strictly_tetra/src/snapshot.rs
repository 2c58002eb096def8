//! Read-only dice snapshot for rendering.

use crate::dice::Dice;
use crate::faces::FaceNumber;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};

/// The five face slots of a dice and its owner, without mutation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedDice {
    /// Upper null-zone slot.
    pub up: FaceNumber,
    /// Top face.
    pub top: FaceNumber,
    /// Lower null-zone slot.
    pub down: FaceNumber,
    /// Left face.
    pub left: FaceNumber,
    /// Right face.
    pub right: FaceNumber,
    /// Owning player.
    pub owner: PlayerId,
}

impl From<&Dice> for SimplifiedDice {
    fn from(dice: &Dice) -> Self {
        let faces = dice.faces();
        Self {
            up: faces.up(),
            top: faces.top(),
            down: faces.down(),
            left: faces.left(),
            right: faces.right(),
            owner: dice.owner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::DiceId;

    #[test]
    fn test_snapshot_mirrors_committed_faces() {
        let dice = Dice::new(DiceId::new(PlayerId(4), 0));
        let snapshot = dice.simplified();
        assert_eq!(
            snapshot,
            SimplifiedDice {
                up: 4,
                top: 2,
                down: 0,
                left: 1,
                right: 3,
                owner: PlayerId(4),
            }
        );
    }

    #[test]
    fn test_snapshot_json_shape() {
        let dice = Dice::new(DiceId::new(PlayerId(1), 0));
        let json = serde_json::to_value(dice.simplified()).unwrap();
        assert_eq!(json["owner"], 1);
        assert_eq!(json["top"], 2);
        assert_eq!(json["down"], 0);
    }
}
