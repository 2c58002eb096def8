//! Player roster: dice ownership and board/lost bookkeeping.

use crate::board::{CellId, CellOccupancy};
use crate::dice::Dice;
use crate::error::MoveError;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, instrument, warn};

/// Default number of dice handed to each player.
pub const DEFAULT_DICE_PER_PLAYER: u8 = 4;

/// Player number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
#[display("{_0}")]
pub struct PlayerId(pub u8);

/// Identity of a dice: its owner and its index within the owner's set.
///
/// Displayed as `owner * 10 + index`, so dice 2 of player 3 is `32`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new,
)]
pub struct DiceId {
    owner: PlayerId,
    index: u8,
}

impl DiceId {
    /// Owning player.
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Index within the owner's set.
    pub fn index(&self) -> u8 {
        self.index
    }
}

impl std::fmt::Display for DiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u32::from(self.owner.0) * 10 + u32::from(self.index))
    }
}

/// A player and the dice they own.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    dice: BTreeMap<DiceId, Dice>,
    on_board: BTreeSet<DiceId>,
    lost: BTreeSet<DiceId>,
}

impl Player {
    /// Creates a player owning `count` fresh dice.
    #[instrument]
    pub fn new(id: PlayerId, count: u8) -> Self {
        let dice = (0..count)
            .map(|index| {
                let dice_id = DiceId::new(id, index);
                (dice_id, Dice::new(dice_id))
            })
            .collect();
        info!(player = %id, count, "Created player");
        Self {
            id,
            dice,
            on_board: BTreeSet::new(),
            lost: BTreeSet::new(),
        }
    }

    /// Player id.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Dice by index.
    pub fn dice(&self, index: u8) -> Option<&Dice> {
        self.dice.get(&DiceId::new(self.id, index))
    }

    /// Mutable dice by index.
    pub fn dice_mut(&mut self, index: u8) -> Option<&mut Dice> {
        self.dice.get_mut(&DiceId::new(self.id, index))
    }

    /// Every dice, in index order.
    pub fn all_dice(&self) -> impl Iterator<Item = &Dice> {
        self.dice.values()
    }

    /// Ids of dice currently on the board.
    pub fn on_board(&self) -> &BTreeSet<DiceId> {
        &self.on_board
    }

    /// Ids of dice that were lost.
    pub fn lost(&self) -> &BTreeSet<DiceId> {
        &self.lost
    }

    fn owned(&self, dice: DiceId) -> Result<(), MoveError> {
        if self.dice.contains_key(&dice) {
            Ok(())
        } else {
            warn!(player = %self.id, %dice, "Dice not owned by player");
            Err(MoveError::UnknownDice(dice))
        }
    }

    /// Records `dice` as on the board.
    #[instrument(skip(self), fields(player = %self.id))]
    pub(crate) fn place_dice(&mut self, dice: DiceId) -> Result<(), MoveError> {
        self.owned(dice)?;
        self.lost.remove(&dice);
        self.on_board.insert(dice);
        Ok(())
    }

    /// Records `dice` as lost.
    #[instrument(skip(self), fields(player = %self.id))]
    pub(crate) fn lose_dice(&mut self, dice: DiceId) -> Result<(), MoveError> {
        self.owned(dice)?;
        self.on_board.remove(&dice);
        self.lost.insert(dice);
        info!(%dice, "Dice lost");
        Ok(())
    }

    /// Puts dice `index` on `cell` and records it as on the board.
    #[instrument(skip(self, board), fields(player = %self.id))]
    pub fn deploy<B: CellOccupancy + ?Sized>(
        &mut self,
        index: u8,
        board: &mut B,
        cell: CellId,
    ) -> Result<(), MoveError> {
        let id = DiceId::new(self.id, index);
        let dice = self.dice.get_mut(&id).ok_or(MoveError::UnknownDice(id))?;
        dice.place_on(board, cell)?;
        self.place_dice(id)
    }

    /// Takes dice `index` off the board, if it is on it, and records it as lost.
    #[instrument(skip(self, board), fields(player = %self.id))]
    pub fn capture<B: CellOccupancy + ?Sized>(
        &mut self,
        index: u8,
        board: &mut B,
    ) -> Result<(), MoveError> {
        let id = DiceId::new(self.id, index);
        let dice = self.dice.get_mut(&id).ok_or(MoveError::UnknownDice(id))?;
        if dice.cell().is_some() {
            dice.remove_from_board(board)?;
        }
        self.lose_dice(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardBuilder, NeighborIds};
    use crate::direction::Pointing;

    #[test]
    fn test_dice_ids_follow_player_number() {
        let player = Player::new(PlayerId(3), DEFAULT_DICE_PER_PLAYER);
        let ids: Vec<String> = player.all_dice().map(|d| d.id().to_string()).collect();
        assert_eq!(ids, ["30", "31", "32", "33"]);
        assert!(player.all_dice().all(|d| d.owner() == PlayerId(3)));
    }

    #[test]
    fn test_place_and_lose() {
        let mut player = Player::new(PlayerId(1), 2);
        let id = DiceId::new(PlayerId(1), 1);
        player.place_dice(id).unwrap();
        assert!(player.on_board().contains(&id));
        player.lose_dice(id).unwrap();
        assert!(!player.on_board().contains(&id));
        assert!(player.lost().contains(&id));
    }

    #[test]
    fn test_foreign_dice_rejected() {
        let mut player = Player::new(PlayerId(1), 2);
        let foreign = DiceId::new(PlayerId(2), 0);
        assert_eq!(player.place_dice(foreign), Err(MoveError::UnknownDice(foreign)));
        assert_eq!(player.lose_dice(foreign), Err(MoveError::UnknownDice(foreign)));
    }

    #[test]
    fn test_capture_off_board_dice_leaves_board_alone() {
        let mut builder = BoardBuilder::new();
        builder.add_cell(7, Pointing::Up, NeighborIds::default()).unwrap();
        let mut board = builder.build();

        let mut player = Player::new(PlayerId(1), 2);
        player.deploy(1, &mut board, 7).unwrap();
        player.capture(0, &mut board).unwrap();

        assert!(player.lost().contains(&DiceId::new(PlayerId(1), 0)));
        assert_eq!(board.occupant(7), Some(DiceId::new(PlayerId(1), 1)));
        assert!(player.on_board().contains(&DiceId::new(PlayerId(1), 1)));
    }

    #[test]
    fn test_capture_unknown_index_fails() {
        let mut board = BoardBuilder::new().build();
        let mut player = Player::new(PlayerId(1), 1);
        assert_eq!(
            player.capture(5, &mut board),
            Err(MoveError::UnknownDice(DiceId::new(PlayerId(1), 5)))
        );
        assert!(player.lost().is_empty());
    }

    #[test]
    fn test_deploy_and_capture() {
        let mut builder = BoardBuilder::new();
        builder.add_cell(7, Pointing::Up, NeighborIds::default()).unwrap();
        let mut board = builder.build();

        let mut player = Player::new(PlayerId(1), 2);
        player.deploy(0, &mut board, 7).unwrap();
        assert_eq!(board.occupant(7), Some(DiceId::new(PlayerId(1), 0)));
        assert_eq!(player.dice(0).and_then(Dice::cell), Some(7));

        player.capture(0, &mut board).unwrap();
        assert_eq!(board.occupant(7), None);
        assert!(player.lost().contains(&DiceId::new(PlayerId(1), 0)));
    }
}
