//! Deterministic random source.
//!
//! Provides the seeded Mulberry32 generator that drives every draw in the
//! crate, together with the two derived operations the scenarios need:
//! uniform integers on a closed range and an in-place Fisher-Yates shuffle.
//!
//! # Reproducibility
//!
//! A generator is an owned value with 32 bits of state. Two generators built
//! from the same seed yield identical sequences on every platform, so a run
//! is reproduced bit-for-bit by reusing its seed. There is no process-wide
//! generator: each run constructs its own with [`create_rng`].

use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};

/// Additive constant of the Mulberry32 state update (odd, so the state walks
/// the full 2³² cycle).
const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;

/// 2³², the divisor that maps a `u32` output onto `[0, 1)`.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Mulberry32 pseudo-random generator.
///
/// # Algorithm
/// Each step adds a fixed odd increment to the 32-bit state (a Weyl
/// sequence), then scrambles the new state with two xor-shift/multiply
/// rounds and a final xor-shift. The state sequence has period 2³² and the
/// scrambler is applied to a fresh state on every call.
///
/// Reference: Tommy Ettinger, "Mulberry32" (2017), public domain.
///
/// # Examples
/// ```
/// use chances_of::random::Mulberry32;
/// let mut rng = Mulberry32::new(42);
/// let x = rng.next_f64();
/// assert!((0.0..1.0).contains(&x));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Creates a generator whose state is exactly `seed`.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns the next raw 32-bit output.
    #[inline]
    pub fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Returns a uniform float in `[0, 1)` with 32 bits of resolution.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_raw()) / TWO_POW_32
    }

    /// Returns an integer on the closed range `[min, max]`.
    ///
    /// Computed as `floor(next_f64() * (max - min + 1)) + min`. For spans
    /// that do not divide 2³² the mapping is slightly biased toward lower
    /// values; the bias is below 2⁻³² per value for the ranges used here and
    /// is kept so that seeded runs stay reproducible.
    ///
    /// # Panics
    /// Debug builds assert `min <= max`.
    ///
    /// # Examples
    /// ```
    /// use chances_of::random::Mulberry32;
    /// let mut rng = Mulberry32::new(7);
    /// for _ in 0..1000 {
    ///     let face = rng.next_int(1, 6);
    ///     assert!((1..=6).contains(&face));
    /// }
    /// ```
    #[inline]
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max, "next_int: min {min} > max {max}");
        let span = (max - min + 1) as f64;
        (self.next_f64() * span).floor() as i64 + min
    }

    /// Fisher-Yates (Durstenfeld) in-place shuffle.
    ///
    /// Produces a uniformly random permutation: each of the n! permutations
    /// is equally likely, given a uniform underlying generator.
    ///
    /// # Algorithm
    /// Iterates backwards, swapping position `i` with a position drawn from
    /// `[0, i]` as `floor(next_f64() * (i + 1))`. Exactly `n - 1` draws are
    /// consumed for a slice of length `n ≥ 1`.
    ///
    /// Reference: Knuth (1997), *TAOCP* Vol. 2, §3.4.2, Algorithm P.
    ///
    /// # Complexity
    /// Time: O(n), Space: O(1) (in-place)
    ///
    /// # Examples
    /// ```
    /// use chances_of::random::Mulberry32;
    /// let mut v = vec![1, 2, 3, 4, 5];
    /// let mut rng = Mulberry32::new(42);
    /// rng.shuffle(&mut v);
    /// v.sort();
    /// assert_eq!(v, vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = (self.next_f64() * (i + 1) as f64).floor() as usize;
            slice.swap(i, j);
        }
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst);
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    /// Keeps the low 32 bits of `state`, matching [`create_rng`].
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

/// Creates a seeded generator for one run.
///
/// The seed is taken modulo 2³², so negative seeds wrap the way a two's
/// complement reinterpretation does (`-1` becomes `0xFFFF_FFFF`).
///
/// # Examples
/// ```
/// use chances_of::random::create_rng;
/// let mut a = create_rng(42);
/// let mut b = create_rng(42);
/// assert_eq!(a.next_f64(), b.next_f64());
/// ```
pub fn create_rng(seed: i64) -> Mulberry32 {
    Mulberry32::new(seed as u32)
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn shuffle_is_permutation(
            seed in any::<u32>(),
            data in proptest::collection::vec(0_i32..1000, 0..60),
        ) {
            let mut shuffled = data.clone();
            let mut rng = Mulberry32::new(seed);
            rng.shuffle(&mut shuffled);
            let mut sorted_orig = data.clone();
            let mut sorted_shuf = shuffled;
            sorted_orig.sort();
            sorted_shuf.sort();
            prop_assert_eq!(sorted_orig, sorted_shuf);
        }

        #[test]
        fn next_int_in_range(
            seed in any::<u32>(),
            min in -1000_i64..1000,
            width in 0_i64..20_000,
        ) {
            let mut rng = Mulberry32::new(seed);
            let max = min + width;
            for _ in 0..50 {
                let v = rng.next_int(min, max);
                prop_assert!(v >= min && v <= max);
            }
        }

        #[test]
        fn next_f64_half_open(seed in any::<u32>()) {
            let mut rng = Mulberry32::new(seed);
            for _ in 0..50 {
                let x = rng.next_f64();
                prop_assert!((0.0..1.0).contains(&x));
            }
        }
    }
}
