//! Real faces invariant: the three visible faces are distinct and non-zero.

use super::Invariant;
use crate::DiceFaces;

/// Invariant: slots `left`, `top`, `right` hold three distinct values in 1-4.
pub struct RealFacesInvariant;

impl Invariant<DiceFaces> for RealFacesInvariant {
    fn holds(faces: &DiceFaces) -> bool {
        let [left, top, right] = faces.real_faces();
        [left, top, right].iter().all(|face| (1..=4).contains(face))
            && left != top
            && top != right
            && left != right
    }

    fn description() -> &'static str {
        "Real faces are three distinct values from 1 to 4"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_holds() {
        assert!(RealFacesInvariant::holds(&DiceFaces::new()));
    }

    #[test]
    fn test_zero_real_face_violates() {
        assert!(!RealFacesInvariant::holds(&DiceFaces::from_raw([1, 0, 3, 4, 2])));
    }

    #[test]
    fn test_repeated_real_face_violates() {
        assert!(!RealFacesInvariant::holds(&DiceFaces::from_raw([3, 2, 3, 4, 0])));
    }
}
