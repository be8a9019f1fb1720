//! Small deterministic random number generator.
//!
//! Gameplay randomness (food placement, frightened ghost moves, word picks)
//! must be reproducible from a single seed so simulations can be replayed in
//! tests. A 32-bit linear congruential generator is plenty for that and keeps
//! the wasm binary free of platform entropy imports.

/// Linear congruential generator (Numerical Recipes constants).
///
/// The low bits of an LCG cycle quickly, so range picks use the upper half
/// word of each draw.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Lcg { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform-ish index in `0..len`. Returns 0 for an empty range.
    pub fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u32() >> 16) as usize % len
    }
}

// --- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Lcg::new(12345);
        let mut b = Lcg::new(12345);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Lcg::new(1);
        let mut b = Lcg::new(2);
        let same = (0..16).filter(|_| a.next_u32() == b.next_u32()).count();
        assert!(same < 16, "distinct seeds should not track each other");
    }

    #[test]
    fn pick_stays_in_range() {
        let mut rng = Lcg::new(0xDEAD_BEEF);
        for len in [1usize, 2, 3, 7, 19, 40, 1200] {
            for _ in 0..200 {
                assert!(rng.pick(len) < len);
            }
        }
    }

    #[test]
    fn pick_empty_range_is_zero() {
        let mut rng = Lcg::new(7);
        assert_eq!(rng.pick(0), 0);
    }

    #[test]
    fn pick_reaches_every_cell_of_a_small_range() {
        let mut rng = Lcg::new(99);
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[rng.pick(5)] = true;
        }
        assert!(seen.iter().all(|s| *s), "expected all of 0..5 to appear");
    }
}
