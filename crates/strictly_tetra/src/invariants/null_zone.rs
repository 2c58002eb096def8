//! Null zone invariant: exactly one of the two hidden slots is empty.

use super::Invariant;
use crate::DiceFaces;

/// Invariant: exactly one of `up`/`down` is 0 and the other is a face value.
pub struct NullZoneInvariant;

impl Invariant<DiceFaces> for NullZoneInvariant {
    fn holds(faces: &DiceFaces) -> bool {
        match (faces.up(), faces.down()) {
            (0, hidden) | (hidden, 0) => (1..=4).contains(&hidden),
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Exactly one null-zone slot is empty"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_either_slot_may_be_empty() {
        assert!(NullZoneInvariant::holds(&DiceFaces::from_raw([1, 2, 3, 4, 0])));
        assert!(NullZoneInvariant::holds(&DiceFaces::from_raw([1, 2, 3, 0, 4])));
    }

    #[test]
    fn test_both_empty_violates() {
        assert!(!NullZoneInvariant::holds(&DiceFaces::from_raw([1, 2, 3, 0, 0])));
    }

    #[test]
    fn test_both_full_violates() {
        assert!(!NullZoneInvariant::holds(&DiceFaces::from_raw([1, 2, 3, 4, 4])));
    }
}
