//! Face arrangement of a tetrahedral dice.
//!
//! The dice is tracked as five slots: `[left, top, right, up, down]`.
//! The first three are the visible ("real") faces. The last two form the
//! null zone, which holds the fourth, hidden face in one slot and `0` in
//! the other. The empty null-zone slot determines where the apex points:
//! an empty `down` slot means the dice points up, an empty `up` slot means
//! it points down.
//!
//! Every transformation is built on [`DiceFaces::move_number_to_null_zone`],
//! which trades a real face with the hidden one and so can never break the
//! "each of 1-4 exactly once" rule.

use crate::contracts::{Contract, TipContract};
use crate::direction::{Direction, Pointing, Spin};
use crate::error::MoveError;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// A face value. `0` marks the empty null-zone slot.
pub type FaceNumber = u8;

pub(crate) const LEFT: usize = 0;
pub(crate) const TOP: usize = 1;
pub(crate) const RIGHT: usize = 2;
pub(crate) const UP: usize = 3;
pub(crate) const DOWN: usize = 4;

/// Orientation of one dice.
///
/// A plain `Copy` value: speculative exploration works on its own copy and
/// can never reach back into the committed orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 5]", into = "[u8; 5]")]
pub struct DiceFaces {
    faces: [FaceNumber; 5],
}

impl DiceFaces {
    /// Creates the starting arrangement `[1, 2, 3, 4, 0]`, pointing up.
    pub fn new() -> Self {
        Self {
            faces: [1, 2, 3, 4, 0],
        }
    }

    /// Builds faces without validation (postconditions catch corruption).
    pub(crate) fn from_raw(faces: [FaceNumber; 5]) -> Self {
        Self { faces }
    }

    /// All five slots.
    pub fn slots(&self) -> [FaceNumber; 5] {
        self.faces
    }

    /// Left face.
    pub fn left(&self) -> FaceNumber {
        self.faces[LEFT]
    }

    /// Top face; also the move budget of the next walk.
    pub fn top(&self) -> FaceNumber {
        self.faces[TOP]
    }

    /// Right face.
    pub fn right(&self) -> FaceNumber {
        self.faces[RIGHT]
    }

    /// Upper null-zone slot.
    pub fn up(&self) -> FaceNumber {
        self.faces[UP]
    }

    /// Lower null-zone slot.
    pub fn down(&self) -> FaceNumber {
        self.faces[DOWN]
    }

    /// The three visible faces, left to right.
    pub fn real_faces(&self) -> [FaceNumber; 3] {
        [self.faces[LEFT], self.faces[TOP], self.faces[RIGHT]]
    }

    /// Index of the empty null-zone slot.
    fn null_index(&self) -> usize {
        if self.faces[DOWN] == 0 { DOWN } else { UP }
    }

    /// Index of the null-zone slot holding the hidden face.
    fn hidden_index(&self) -> usize {
        if self.faces[DOWN] == 0 { UP } else { DOWN }
    }

    /// The currently hidden face.
    pub fn null_zone_number(&self) -> FaceNumber {
        self.faces[self.hidden_index()]
    }

    /// Where the apex points, derived from the empty null-zone slot.
    pub fn pointing(&self) -> Pointing {
        if self.null_index() == DOWN {
            Pointing::Up
        } else {
            Pointing::Down
        }
    }

    /// A tip up is legal only while the upper null-zone slot is empty.
    pub fn can_tip_up(&self) -> bool {
        self.faces[UP] == 0
    }

    /// A tip down is legal only while the lower null-zone slot is empty.
    pub fn can_tip_down(&self) -> bool {
        self.faces[DOWN] == 0
    }

    /// Whether a tip in `direction` is legal from this orientation.
    pub fn can_tip(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.can_tip_up(),
            Direction::Down => self.can_tip_down(),
            Direction::Left | Direction::Right => true,
        }
    }

    /// The only legal vertical tip from this orientation.
    pub fn vertical_tip(&self) -> Direction {
        if self.can_tip_down() {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    /// Swaps `number` with the hidden face and returns the old hidden face.
    ///
    /// After the call `number` is hidden and the previously hidden face sits
    /// where `number` was. The empty null-zone slot does not move.
    fn move_number_to_null_zone(&mut self, number: FaceNumber) -> FaceNumber {
        let hidden = self.hidden_index();
        let displaced = self.faces[hidden];
        // Values are unique, so the lookup is exact; a miss means the number
        // is already hidden and the swap is a no-op.
        let index = self
            .faces
            .iter()
            .position(|&face| face == number)
            .unwrap_or(hidden);
        self.faces.swap(index, hidden);
        trace!(number, displaced, "Moved number to null zone");
        displaced
    }

    /// Resolves a spin request to the side that is meaningful here.
    ///
    /// Pointing up only the right spin exists, pointing down only the left.
    pub fn normalize_spin(&self, side: Spin) -> Spin {
        match (self.pointing(), side) {
            (Pointing::Up, Spin::Left) => Spin::Right,
            (Pointing::Down, Spin::Right) => Spin::Left,
            (_, side) => side,
        }
    }

    /// Spins the dice in place. Never fails and never changes pointing.
    #[instrument(skip(self), fields(faces = %self))]
    pub fn spin(&mut self, side: Spin) {
        let side = self.normalize_spin(side);
        let face = match side {
            Spin::Right => self.right(),
            Spin::Left => self.left(),
        };
        let displaced = self.move_number_to_null_zone(face);
        debug!(%side, hidden = face, revealed = displaced, after = %self, "Spun dice");
    }

    /// Tips the dice over one edge.
    ///
    /// Horizontal tips cycle the real faces through the hidden slot.
    /// Vertical tips trade the top face with the hidden one and flip the
    /// pointing direction; they are only legal toward the empty null-zone
    /// slot.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidDirection`] for an illegal vertical tip.
    /// The faces are left untouched in that case.
    #[instrument(skip(self), fields(faces = %self))]
    pub fn tip(&mut self, direction: Direction) -> Result<(), MoveError> {
        #[cfg(debug_assertions)]
        let before = *self;

        TipContract::pre(self, &direction)?;
        self.apply_tip(direction);

        #[cfg(debug_assertions)]
        TipContract::post(&before, self)?;

        debug!(%direction, after = %self, pointing = %self.pointing(), "Tipped dice");
        Ok(())
    }

    /// Tip transformation without the legality check.
    fn apply_tip(&mut self, direction: Direction) {
        match direction {
            Direction::Right => {
                self.move_number_to_null_zone(self.right());
                self.faces[..3].rotate_right(1);
            }
            Direction::Left => {
                self.move_number_to_null_zone(self.left());
                self.faces[..3].rotate_left(1);
            }
            Direction::Up | Direction::Down => {
                self.move_number_to_null_zone(self.top());
                self.faces.swap(UP, DOWN);
            }
        }
    }

    /// Replaces the arrangement with a uniformly random legal one.
    #[instrument(skip_all)]
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let null_slot = rng.random_range(UP..=DOWN);
        let mut numbers: [FaceNumber; 4] = [1, 2, 3, 4];
        numbers.shuffle(rng);

        let mut numbers = numbers.into_iter();
        for (slot, face) in self.faces.iter_mut().enumerate() {
            *face = if slot == null_slot {
                0
            } else {
                numbers.next().unwrap_or_default()
            };
        }
        debug!(after = %self, "Rolled dice");
    }

    /// Tumbles the dice through `count` random tips and spins.
    ///
    /// Each step draws a direction uniformly; a vertical draw that is not
    /// legal is redirected to the legal vertical tip. Half of the steps are
    /// followed by a spin to a random side.
    #[instrument(skip(self, rng))]
    pub fn simulated_roll<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        for _ in 0..count {
            let drawn = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            let direction = if drawn.is_vertical() {
                self.vertical_tip()
            } else {
                drawn
            };
            self.apply_tip(direction);

            if rng.random_bool(0.5) {
                let side = if rng.random_bool(0.5) {
                    Spin::Left
                } else {
                    Spin::Right
                };
                self.spin(side);
            }
        }
        debug!(after = %self, "Tumbled dice");
    }
}

impl Default for DiceFaces {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<[FaceNumber; 5]> for DiceFaces {
    type Error = MoveError;

    fn try_from(faces: [FaceNumber; 5]) -> Result<Self, Self::Error> {
        use crate::invariants::{FaceInvariants, InvariantSet};

        let candidate = Self { faces };
        FaceInvariants::check_all(&candidate).map_err(|_| MoveError::MalformedFaces(faces))?;
        Ok(candidate)
    }
}

impl From<DiceFaces> for [FaceNumber; 5] {
    fn from(faces: DiceFaces) -> Self {
        faces.faces
    }
}

impl std::fmt::Display for DiceFaces {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [left, top, right, up, down] = self.faces;
        write!(f, "{left},{top},{right},{up},{down}")
    }
}
