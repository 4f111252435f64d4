//! Discrete probability distributions with closed-form tails.
//!
//! # Supported Distributions
//!
//! | Distribution | Parameters | Mean | Variance |
//! |---|---|---|---|
//! | [`Binomial`] | n, p | np | np(1−p) |
//! | [`Hypergeometric`] | N, K, n | nK/N | n(K/N)(1−K/N)(N−n)/(N−1) |
//!
//! Both expose `pmf(k)` and an upper tail `sf(k) = P(X ≥ k)`, which is
//! exactly what the scenario calculators need.

use crate::error::{Error, Result};
use crate::special::{binomial_coefficient, ln_binomial_coefficient};

// ============================================================================
// Binomial Distribution
// ============================================================================

/// Number of successes in `n` independent trials with success probability `p`.
///
/// # Mathematical Definition
/// - PMF: P(X = k) = C(n,k) pᵏ (1−p)ⁿ⁻ᵏ
/// - Mean: np
/// - Variance: np(1−p)
#[derive(Debug, Clone, PartialEq)]
pub struct Binomial {
    n: u64,
    p: f64,
}

impl Binomial {
    /// Creates a binomial distribution.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if `p` is NaN or outside `[0, 1]`.
    pub fn new(n: u64, p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::invalid("p", format!("must lie in [0, 1], got {p}")));
        }
        Ok(Self { n, p })
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn mean(&self) -> f64 {
        self.n as f64 * self.p
    }

    pub fn variance(&self) -> f64 {
        self.n as f64 * self.p * (1.0 - self.p)
    }

    /// Probability mass P(X = k).
    ///
    /// # Algorithm
    /// Uses the iterative [`binomial_coefficient`] while it is finite. Once
    /// C(n, k) overflows `f64` (around n ≈ 1030 near the centre) the whole
    /// product is evaluated in log space,
    /// `exp(ln C(n,k) + k ln p + (n−k) ln(1−p))`, so the mass stays finite
    /// for every supported `n`.
    ///
    /// # Examples
    /// ```
    /// use chances_of::distributions::Binomial;
    /// let coin = Binomial::new(10, 0.5).unwrap();
    /// assert!((coin.pmf(5) - 252.0 / 1024.0).abs() < 1e-15);
    /// assert_eq!(coin.pmf(11), 0.0);
    /// ```
    pub fn pmf(&self, k: u64) -> f64 {
        if k > self.n {
            return 0.0;
        }
        // Degenerate p: all mass on a single point.
        if self.p == 0.0 {
            return if k == 0 { 1.0 } else { 0.0 };
        }
        if self.p == 1.0 {
            return if k == self.n { 1.0 } else { 0.0 };
        }

        let failures = self.n - k;
        let coefficient = binomial_coefficient(self.n, k);
        if coefficient.is_finite() {
            coefficient * self.p.powf(k as f64) * (1.0 - self.p).powf(failures as f64)
        } else {
            let ln_mass = ln_binomial_coefficient(self.n, k)
                + k as f64 * self.p.ln()
                + failures as f64 * (1.0 - self.p).ln();
            ln_mass.exp()
        }
    }

    /// Upper tail P(X ≥ k) = Σⱼ₌ₖⁿ P(X = j).
    ///
    /// Summed term by term; clamped to `[0, 1]` against rounding.
    ///
    /// # Complexity
    /// Time: O((n−k) · min(k, n−k))
    ///
    /// # Examples
    /// ```
    /// use chances_of::distributions::Binomial;
    /// let b = Binomial::new(20, 0.1).unwrap();
    /// assert!((b.sf(3) - 0.32307319481053415).abs() < 1e-12);
    /// assert_eq!(b.sf(0), 1.0);
    /// ```
    pub fn sf(&self, k: u64) -> f64 {
        if k == 0 {
            return 1.0;
        }
        (k..=self.n).map(|j| self.pmf(j)).sum::<f64>().clamp(0.0, 1.0)
    }
}

// ============================================================================
// Hypergeometric Distribution
// ============================================================================

/// Successes among `draws` items taken without replacement from a
/// population of `population` items, `successes` of which are marked.
///
/// # Mathematical Definition
/// - PMF: P(X = x) = C(K,x) C(N−K,n−x) / C(N,n)
/// - Support: max(0, n−(N−K)) ≤ x ≤ min(n, K)
/// - Mean: nK/N
///
/// # Examples
/// ```
/// use chances_of::distributions::Hypergeometric;
/// // Two cards from a standard deck, both aces.
/// let aces = Hypergeometric::new(52, 4, 2).unwrap();
/// assert!((aces.pmf(2) - 6.0 / 1326.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Hypergeometric {
    population: u64,
    successes: u64,
    draws: u64,
}

impl Hypergeometric {
    /// Creates a hypergeometric distribution.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if `successes` or `draws` exceed
    /// `population`.
    pub fn new(population: u64, successes: u64, draws: u64) -> Result<Self> {
        if successes > population {
            return Err(Error::invalid(
                "successes",
                format!("{successes} exceeds population {population}"),
            ));
        }
        if draws > population {
            return Err(Error::invalid(
                "draws",
                format!("{draws} exceeds population {population}"),
            ));
        }
        Ok(Self {
            population,
            successes,
            draws,
        })
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    pub fn mean(&self) -> f64 {
        if self.population == 0 {
            return 0.0;
        }
        self.draws as f64 * self.successes as f64 / self.population as f64
    }

    /// Number of draws that yield exactly `x` marked items.
    fn ways(&self, x: u64) -> f64 {
        if x > self.draws {
            return 0.0;
        }
        binomial_coefficient(self.successes, x)
            * binomial_coefficient(self.population - self.successes, self.draws - x)
    }

    /// Probability mass P(X = x).
    pub fn pmf(&self, x: u64) -> f64 {
        self.ways(x) / binomial_coefficient(self.population, self.draws)
    }

    /// Upper tail P(X ≥ k) = Σₓ₌ₖ^min(n,K) C(K,x)·C(N−K,n−x) / C(N,n).
    ///
    /// # Algorithm
    /// Accumulates the favourable counts first and divides once by the total
    /// C(N, n), which keeps small tails exact when every count is an exactly
    /// representable integer (always the case for N ≤ 52).
    ///
    /// # Returns
    /// - `0.0` when `k` exceeds the largest attainable count `min(n, K)`.
    ///
    /// # Examples
    /// ```
    /// use chances_of::distributions::Hypergeometric;
    /// let hand = Hypergeometric::new(52, 4, 52).unwrap();
    /// assert_eq!(hand.sf(5), 0.0);
    /// assert_eq!(hand.sf(4), 1.0);
    /// ```
    pub fn sf(&self, k: u64) -> f64 {
        let upper = self.draws.min(self.successes);
        if k > upper {
            return 0.0;
        }
        let favourable: f64 = (k..=upper).map(|x| self.ways(x)).sum();
        (favourable / binomial_coefficient(self.population, self.draws)).clamp(0.0, 1.0)
    }
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
        fn binomial_tail_in_unit_interval(n in 1_u64..300, p in 0.001_f64..=1.0, k in 0_u64..320) {
            let b = Binomial::new(n, p).unwrap();
            let s = b.sf(k);
            prop_assert!((0.0..=1.0).contains(&s), "sf({k}) = {s}");
        }

        #[test]
        fn binomial_tail_non_increasing(n in 1_u64..200, p in 0.01_f64..0.99, k in 0_u64..200) {
            let b = Binomial::new(n, p).unwrap();
            prop_assert!(b.sf(k + 1) <= b.sf(k) + 1e-12);
        }

        #[test]
        fn hypergeometric_tail_in_unit_interval(
            marked in 0_u64..=52,
            draws in 0_u64..=52,
            k in 0_u64..=53,
        ) {
            let h = Hypergeometric::new(52, marked, draws).unwrap();
            let s = h.sf(k);
            prop_assert!((0.0..=1.0).contains(&s), "sf({k}) = {s}");
        }
    }
}
