//! Exhaustive faces invariant: ignoring the empty slot, 1-4 appear once each.

use super::Invariant;
use crate::DiceFaces;

/// Invariant: the five slots are a permutation of `{0, 1, 2, 3, 4}`.
pub struct ExhaustiveFacesInvariant;

impl Invariant<DiceFaces> for ExhaustiveFacesInvariant {
    fn holds(faces: &DiceFaces) -> bool {
        let mut seen = [false; 5];
        for face in faces.slots() {
            match seen.get_mut(face as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    fn description() -> &'static str {
        "Faces 1 to 4 appear exactly once alongside a single empty slot"
    }
}
