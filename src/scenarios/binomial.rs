//! Independent Bernoulli trials.
//!
//! Runs `n` trials that each succeed with probability `p` and tests the
//! number of successes. Exact mode is always available.

use std::fmt;
use std::str::FromStr;

use super::{parse_error, parse_target, Scenario};
use crate::distributions::Binomial;
use crate::error::{Error, Result};
use crate::random::Mulberry32;

const SUPPORTED: &str = "successes>=X, successes==X";

/// Parsed success-count condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinomialCondition {
    AtLeast(u64),
    Exactly(u64),
}

impl FromStr for BinomialCondition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parsed = if let Some(rest) = s.strip_prefix("successes>=") {
            parse_target(rest).map(Self::AtLeast)
        } else if let Some(rest) = s.strip_prefix("successes==") {
            parse_target(rest).map(Self::Exactly)
        } else {
            None
        };
        parsed.ok_or_else(|| parse_error(BinomialScenario::NAME, s, SUPPORTED))
    }
}

impl fmt::Display for BinomialCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtLeast(k) => write!(f, "successes>={k}"),
            Self::Exactly(k) => write!(f, "successes=={k}"),
        }
    }
}

/// `n` Bernoulli(p) trials.
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialScenario {
    distribution: Binomial,
    condition: BinomialCondition,
}

impl BinomialScenario {
    pub const MAX_N: u32 = 10_000;

    /// Parses `condition` and checks `n ∈ [1, 10000]`, `p ∈ (0, 1]`.
    ///
    /// `p` is always a fraction; no percentage inference is made.
    ///
    /// # Examples
    /// ```
    /// use chances_of::scenarios::BinomialScenario;
    /// assert!(BinomialScenario::new(20, 0.1, "successes>=3").is_ok());
    /// assert!(BinomialScenario::new(20, 0.0, "successes>=3").is_err());
    /// assert!(BinomialScenario::new(20, 10.0, "successes>=3").is_err());
    /// ```
    pub fn new(n: u32, p: f64, condition: &str) -> Result<Self> {
        let condition = condition.parse()?;
        if !(1..=Self::MAX_N).contains(&n) {
            return Err(Error::invalid(
                "n",
                format!("must be between 1 and {}, got {n}", Self::MAX_N),
            ));
        }
        if !(p > 0.0 && p <= 1.0) {
            return Err(Error::invalid(
                "p",
                format!("must lie in (0, 1], got {p}"),
            ));
        }
        Ok(Self {
            distribution: Binomial::new(u64::from(n), p)?,
            condition,
        })
    }

    pub fn condition(&self) -> BinomialCondition {
        self.condition
    }
}

impl Scenario for BinomialScenario {
    const NAME: &'static str = "binomial";

    fn sample_once(&self, rng: &mut Mulberry32) -> bool {
        let p = self.distribution.p();
        let successes = (0..self.distribution.n())
            .filter(|_| rng.next_f64() < p)
            .count() as u64;
        match self.condition {
            BinomialCondition::AtLeast(k) => successes >= k,
            BinomialCondition::Exactly(k) => successes == k,
        }
    }

    fn exact_probability(&self) -> Option<Result<f64>> {
        let probability = match self.condition {
            BinomialCondition::AtLeast(k) => self.distribution.sf(k),
            BinomialCondition::Exactly(k) => self.distribution.pmf(k),
        };
        Some(Ok(probability))
    }
}
