//! Interval estimation for a binomial proportion.
//!
//! # Algorithms
//!
//! - **Wilson score interval**: inverts the score test instead of the Wald
//!   test, so the interval never collapses to zero width at p̂ ∈ {0, 1} and
//!   keeps near-nominal coverage for small n.
//!   Reference: Wilson (1927), "Probable Inference, the Law of Succession,
//!   and Statistical Inference", *JASA* 22(158).
//!
//! Only the three conventional two-sided levels are supported; there is no
//! general inverse-normal fallback.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Two-sided confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum ConfidenceLevel {
    /// 90%, z = 1.645
    Ninety,
    /// 95%, z = 1.959964
    #[default]
    NinetyFive,
    /// 99%, z = 2.576
    NinetyNine,
}

impl ConfidenceLevel {
    /// Two-sided standard-normal critical value.
    pub fn z(self) -> f64 {
        match self {
            Self::Ninety => 1.645,
            Self::NinetyFive => 1.959964,
            Self::NinetyNine => 2.576,
        }
    }

    /// Level as a fraction (`0.95` for 95%).
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Ninety => 0.90,
            Self::NinetyFive => 0.95,
            Self::NinetyNine => 0.99,
        }
    }

    /// Level as a whole percentage.
    pub fn percent(self) -> u32 {
        match self {
            Self::Ninety => 90,
            Self::NinetyFive => 95,
            Self::NinetyNine => 99,
        }
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = Error;

    fn try_from(confidence: f64) -> Result<Self> {
        // Exact comparison: the accepted spellings are the literals below.
        if confidence == 0.95 {
            Ok(Self::NinetyFive)
        } else if confidence == 0.99 {
            Ok(Self::NinetyNine)
        } else if confidence == 0.90 {
            Ok(Self::Ninety)
        } else {
            Err(Error::UnsupportedConfidence(confidence))
        }
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.as_f64()
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Closed interval `[low, high]` within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    pub low: f64,
    pub high: f64,
}

impl ConfidenceInterval {
    /// `high − low`.
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn contains(&self, p: f64) -> bool {
        self.low <= p && p <= self.high
    }
}

/// Wilson score interval at an explicit [`ConfidenceLevel`].
///
/// # Algorithm
/// With p̂ = s/n and critical value z:
///
/// ```text
/// centre = (p̂ + z²/2n) / (1 + z²/n)
/// margin = z·√(p̂(1−p̂)/n + z²/4n²) / (1 + z²/n)
/// ```
///
/// The bounds are clamped to `[0, 1]`, and additionally so that
/// `low ≤ p̂ ≤ high` holds exactly; at p̂ ∈ {0, 1} the two terms cancel
/// analytically and rounding alone could otherwise push a bound across p̂.
///
/// # Returns
/// - `[0, 1]` when `trials == 0`.
///
/// # Panics
/// Debug builds assert `successes <= trials` once `trials > 0`; beyond that
/// p̂ > 1 and the margin is NaN.
///
/// # Examples
/// ```
/// use chances_of::stats::{wilson_interval, ConfidenceLevel};
/// let ci = wilson_interval(50, 100, ConfidenceLevel::NinetyFive);
/// assert!(ci.contains(0.5));
/// assert!((ci.low - 0.4038).abs() < 1e-4);
/// ```
pub fn wilson_interval(successes: u64, trials: u64, level: ConfidenceLevel) -> ConfidenceInterval {
    if trials == 0 {
        return ConfidenceInterval {
            low: 0.0,
            high: 1.0,
        };
    }
    debug_assert!(
        successes <= trials,
        "wilson_interval: successes {successes} > trials {trials}"
    );

    let n = trials as f64;
    let p = successes as f64 / n;
    let z = level.z();
    let z2 = z * z;

    let denominator = 1.0 + z2 / n;
    let centre = (p + z2 / (2.0 * n)) / denominator;
    let margin = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denominator;

    ConfidenceInterval {
        low: (centre - margin).max(0.0).min(p),
        high: (centre + margin).min(1.0).max(p),
    }
}

/// Wilson score interval with the confidence level given as a fraction.
///
/// # Errors
/// Returns [`Error::UnsupportedConfidence`] unless `confidence` is one of
/// `0.90`, `0.95` or `0.99`.
///
/// # Panics
/// Debug builds assert `successes <= trials`, as [`wilson_interval`] does.
///
/// # Examples
/// ```
/// use chances_of::stats::wilson_ci;
/// let ci = wilson_ci(7, 0, 0.95).unwrap();
/// assert_eq!((ci.low, ci.high), (0.0, 1.0));
/// assert!(wilson_ci(5, 10, 0.8).is_err());
/// ```
pub fn wilson_ci(successes: u64, trials: u64, confidence: f64) -> Result<ConfidenceInterval> {
    let level = ConfidenceLevel::try_from(confidence)?;
    Ok(wilson_interval(successes, trials, level))
}

/// Standard error √(p(1−p)/n) of a proportion estimated from `trials` draws.
///
/// # Returns
/// - `f64::INFINITY` when `trials == 0`.
pub fn proportion_standard_error(p: f64, trials: u64) -> f64 {
    if trials == 0 {
        return f64::INFINITY;
    }
    (p * (1.0 - p) / trials as f64).sqrt()
}

// ============================================================================
// Tests
// ============================================================================
