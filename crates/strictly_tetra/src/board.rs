//! Triangular board: cell adjacency and single-occupant slots.
//!
//! The board is built in two phases. [`BoardBuilder`] declares every cell
//! with its orientation and the ids of its expected neighbours, then links
//! them; horizontal links are reciprocated once, here. The finished
//! [`Board`] only answers adjacency questions and tracks which dice rests
//! where. Gameplay never rewires it.

use crate::direction::{Direction, Pointing};
use crate::error::{BoardError, MoveError};
use crate::player::DiceId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Identifier of a board cell.
pub type CellId = u16;

/// Result of an adjacency lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighbor {
    /// A real, linked cell.
    Linked(CellId),
    /// Boundary marker: the id is known but the cell was never linked.
    Unlinked(CellId),
    /// No cell in that direction.
    Missing,
}

/// Adjacency oracle consumed by the movement planner.
pub trait CellAdjacency {
    /// Returns the neighbour of `cell` in `direction`.
    fn neighbor(&self, cell: CellId, direction: Direction) -> Neighbor;

    /// Returns the orientation of `cell`, or `None` for an unknown id.
    fn pointing(&self, cell: CellId) -> Option<Pointing>;
}

/// Exclusive placement of dice on cells.
pub trait CellOccupancy {
    /// Dice resting on `cell`, if any.
    fn occupant(&self, cell: CellId) -> Option<DiceId>;

    /// Puts `dice` on `cell`.
    ///
    /// # Errors
    ///
    /// Fails with `CellOccupied`, `DieDoesNotFit` or `UnknownCell`.
    fn place(&mut self, dice: DiceId, pointing: Pointing, cell: CellId) -> Result<(), MoveError>;

    /// Takes the dice off `cell`.
    ///
    /// # Errors
    ///
    /// Fails with `CellEmpty` or `UnknownCell`.
    fn remove(&mut self, cell: CellId) -> Result<DiceId, MoveError>;
}

/// Neighbour ids by direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborIds {
    /// Neighbour above.
    #[serde(default)]
    pub up: Option<CellId>,
    /// Neighbour below.
    #[serde(default)]
    pub down: Option<CellId>,
    /// Neighbour to the left.
    #[serde(default)]
    pub left: Option<CellId>,
    /// Neighbour to the right.
    #[serde(default)]
    pub right: Option<CellId>,
}

impl NeighborIds {
    /// Returns the id stored for `direction`.
    pub fn get(&self, direction: Direction) -> Option<CellId> {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    fn set(&mut self, direction: Direction, id: Option<CellId>) {
        match direction {
            Direction::Up => self.up = id,
            Direction::Down => self.down = id,
            Direction::Left => self.left = id,
            Direction::Right => self.right = id,
        }
    }
}

fn slot(direction: Direction) -> usize {
    match direction {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}

/// A single triangular cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    id: CellId,
    pointing: Pointing,
    neighbors: [Neighbor; 4],
    content: Option<DiceId>,
}

impl Cell {
    fn new(id: CellId, pointing: Pointing, declared: NeighborIds) -> Self {
        let neighbors = Direction::ALL.map(|direction| match declared.get(direction) {
            Some(expected) => Neighbor::Unlinked(expected),
            None => Neighbor::Missing,
        });
        Self {
            id,
            pointing,
            neighbors,
            content: None,
        }
    }

    /// Cell id.
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Cell orientation.
    pub fn pointing(&self) -> Pointing {
        self.pointing
    }

    /// Dice resting here.
    pub fn dice(&self) -> Option<DiceId> {
        self.content
    }

    /// Neighbour in `direction`.
    pub fn neighbor(&self, direction: Direction) -> Neighbor {
        self.neighbors[slot(direction)]
    }

    /// Ids of linked neighbours only.
    pub fn neighbor_ids(&self) -> NeighborIds {
        let mut ids = NeighborIds::default();
        for direction in Direction::ALL {
            if let Neighbor::Linked(id) = self.neighbor(direction) {
                ids.set(direction, Some(id));
            }
        }
        ids
    }

    /// Whether a dice pointing `pointing` may rest here.
    pub fn fits(&self, pointing: Pointing) -> bool {
        self.pointing == pointing
    }
}

/// Builds a [`Board`] from declared cells and links.
#[derive(Debug, Default)]
pub struct BoardBuilder {
    cells: BTreeMap<CellId, Cell>,
}

impl BoardBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a cell with the neighbour ids it expects to be linked to.
    #[instrument(skip(self))]
    pub fn add_cell(
        &mut self,
        id: CellId,
        pointing: Pointing,
        neighbors: NeighborIds,
    ) -> Result<&mut Self, BoardError> {
        if self.cells.contains_key(&id) {
            return Err(BoardError::DuplicateCell(id));
        }
        self.cells.insert(id, Cell::new(id, pointing, neighbors));
        Ok(self)
    }

    /// Links `neighbor` into the `direction` slot of `cell`.
    ///
    /// Horizontal links are reciprocated: linking A's right to B also links
    /// B's left to A.
    #[instrument(skip(self))]
    pub fn link(
        &mut self,
        cell: CellId,
        direction: Direction,
        neighbor: CellId,
    ) -> Result<&mut Self, BoardError> {
        if !self.cells.contains_key(&neighbor) {
            return Err(BoardError::UnknownCell(neighbor));
        }
        self.check_slot(cell, direction, neighbor)?;
        if !direction.is_vertical() {
            self.check_slot(neighbor, direction.inverse(), cell)?;
            self.set_linked(neighbor, direction.inverse(), cell);
        }
        self.set_linked(cell, direction, neighbor);
        Ok(self)
    }

    fn check_slot(
        &self,
        cell: CellId,
        direction: Direction,
        neighbor: CellId,
    ) -> Result<(), BoardError> {
        let entry = self.cells.get(&cell).ok_or(BoardError::UnknownCell(cell))?;
        match entry.neighbor(direction) {
            Neighbor::Linked(existing) => Err(BoardError::NeighborAlreadySet {
                cell,
                direction,
                existing,
            }),
            Neighbor::Unlinked(expected) if expected == neighbor => Ok(()),
            Neighbor::Unlinked(expected) => Err(BoardError::UnexpectedNeighbor {
                cell,
                direction,
                expected: Some(expected),
                found: neighbor,
            }),
            Neighbor::Missing => Err(BoardError::UnexpectedNeighbor {
                cell,
                direction,
                expected: None,
                found: neighbor,
            }),
        }
    }

    fn set_linked(&mut self, cell: CellId, direction: Direction, neighbor: CellId) {
        if let Some(entry) = self.cells.get_mut(&cell) {
            entry.neighbors[slot(direction)] = Neighbor::Linked(neighbor);
            debug!(cell, %direction, neighbor, "Linked cells");
        }
    }

    /// Links every declared neighbour whose cell exists.
    ///
    /// Declared ids with no matching cell stay as boundary markers.
    #[instrument(skip(self))]
    pub fn link_declared(&mut self) -> Result<&mut Self, BoardError> {
        let pending: Vec<(CellId, Direction, CellId)> = self
            .cells
            .values()
            .flat_map(|cell| {
                Direction::ALL
                    .into_iter()
                    .filter_map(move |direction| match cell.neighbor(direction) {
                        Neighbor::Unlinked(target) => Some((cell.id, direction, target)),
                        _ => None,
                    })
            })
            .collect();

        for (cell, direction, target) in pending {
            if !self.cells.contains_key(&target) {
                continue;
            }
            let still_pending = self
                .cells
                .get(&cell)
                .map(|c| matches!(c.neighbor(direction), Neighbor::Unlinked(_)))
                .unwrap_or(false);
            if still_pending {
                self.link(cell, direction, target)?;
            }
        }
        Ok(self)
    }

    /// Finishes construction.
    pub fn build(self) -> Board {
        debug!(cells = self.cells.len(), "Board built");
        Board { cells: self.cells }
    }
}

/// A wired board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: BTreeMap<CellId, Cell>,
}

impl Board {
    /// Returns the cell with `id`.
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(&id)
    }

    /// Cell ids in ascending order.
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells.keys().copied()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the board has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linked neighbourhood of a cell.
    pub fn neighbor_ids(&self, id: CellId) -> Option<NeighborIds> {
        self.cells.get(&id).map(Cell::neighbor_ids)
    }

    /// Cells that hold a dice, with their occupant.
    pub fn occupied(&self) -> impl Iterator<Item = (CellId, DiceId)> + '_ {
        self.cells
            .values()
            .filter_map(|cell| cell.content.map(|dice| (cell.id, dice)))
    }
}

impl CellAdjacency for Board {
    fn neighbor(&self, cell: CellId, direction: Direction) -> Neighbor {
        self.cells
            .get(&cell)
            .map(|c| c.neighbor(direction))
            .unwrap_or(Neighbor::Missing)
    }

    fn pointing(&self, cell: CellId) -> Option<Pointing> {
        self.cells.get(&cell).map(Cell::pointing)
    }
}

impl CellOccupancy for Board {
    fn occupant(&self, cell: CellId) -> Option<DiceId> {
        self.cells.get(&cell).and_then(Cell::dice)
    }

    #[instrument(skip(self))]
    fn place(&mut self, dice: DiceId, pointing: Pointing, cell: CellId) -> Result<(), MoveError> {
        let entry = self
            .cells
            .get_mut(&cell)
            .ok_or(MoveError::UnknownCell(cell))?;
        if let Some(occupant) = entry.content {
            warn!(cell, %occupant, "Cell already full");
            return Err(MoveError::CellOccupied { cell, occupant });
        }
        if !entry.fits(pointing) {
            warn!(cell, %pointing, cell_pointing = %entry.pointing, "Dice doesn't fit cell");
            return Err(MoveError::DieDoesNotFit {
                cell,
                dice: pointing,
                cell_pointing: entry.pointing,
            });
        }
        entry.content = Some(dice);
        debug!(cell, %dice, "Placed dice");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&mut self, cell: CellId) -> Result<DiceId, MoveError> {
        let entry = self
            .cells
            .get_mut(&cell)
            .ok_or(MoveError::UnknownCell(cell))?;
        let dice = entry.content.take().ok_or_else(|| {
            warn!(cell, "Trying to remove dice from empty cell");
            MoveError::CellEmpty(cell)
        })?;
        debug!(cell, %dice, "Removed dice");
        Ok(dice)
    }
}
