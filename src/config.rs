//! Run configuration.
//!
//! [`RunOptions`] is the one configuration shape every scenario run
//! consumes. It selects between a fixed number of trials and the
//! precision-stop (adaptive) mode, and carries the seed and confidence level.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stats::ConfidenceLevel;

/// Seed used when none is supplied.
pub const DEFAULT_SEED: i64 = 42;

/// Trials in fixed mode when `trials` is unset.
pub const DEFAULT_TRIALS: u64 = 100_000;

/// Trial budget in adaptive mode when `max_trials` is unset.
pub const DEFAULT_MAX_TRIALS: u64 = 5_000_000;

/// Adaptive batch size when `batch_size` is unset.
pub const DEFAULT_BATCH_SIZE: u64 = 10_000;

/// Options for a single scenario run.
///
/// Setting `target_ci_width` selects adaptive mode, regardless of whether
/// `trials` is also set.
///
/// # Examples
/// ```
/// use chances_of::config::{RunOptions, SamplingMode};
///
/// let fixed = RunOptions::default().with_trials(20_000);
/// assert_eq!(fixed.mode(), SamplingMode::Fixed { trials: 20_000 });
///
/// let adaptive = fixed.with_target_ci_width(0.01);
/// assert!(matches!(adaptive.mode(), SamplingMode::Adaptive { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunOptions {
    /// Generator seed, reduced modulo 2³².
    pub seed: i64,

    /// Trials in fixed mode. Default: 100,000.
    pub trials: Option<u64>,

    /// Stop once the CI width is at or below this value. Must lie in (0, 1].
    pub target_ci_width: Option<f64>,

    /// Trial budget in adaptive mode. Default: 5,000,000.
    pub max_trials: Option<u64>,

    /// Trials per adaptive batch. Default: 10,000.
    #[serde(alias = "batch")]
    pub batch_size: Option<u64>,

    /// Level of every interval reported. Default: 95%.
    pub confidence: ConfidenceLevel,

    /// Use the closed form where the scenario has one. Combined with the
    /// scenario's own `exact` flag; either one requests exact mode.
    pub exact: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            trials: None,
            target_ci_width: None,
            max_trials: None,
            batch_size: None,
            confidence: ConfidenceLevel::default(),
            exact: false,
        }
    }
}

/// Resolved sampling strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingMode {
    /// Run exactly `trials` trials, then compute the interval once.
    Fixed { trials: u64 },
    /// Run batches until the interval is narrow enough or the budget is spent.
    Adaptive {
        target_ci_width: f64,
        max_trials: u64,
        batch_size: u64,
    },
}

impl RunOptions {
    /// Default options with the given seed.
    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = Some(trials);
        self
    }

    /// Enables adaptive mode.
    pub fn with_target_ci_width(mut self, width: f64) -> Self {
        self.target_ci_width = Some(width);
        self
    }

    pub fn with_max_trials(mut self, max_trials: u64) -> Self {
        self.max_trials = Some(max_trials);
        self
    }

    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_confidence(mut self, level: ConfidenceLevel) -> Self {
        self.confidence = level;
        self
    }

    pub fn with_exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Resolves defaults and picks the sampling mode.
    pub fn mode(&self) -> SamplingMode {
        match self.target_ci_width {
            Some(target_ci_width) => SamplingMode::Adaptive {
                target_ci_width,
                max_trials: self.max_trials.unwrap_or(DEFAULT_MAX_TRIALS),
                batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            },
            None => SamplingMode::Fixed {
                trials: self.trials.unwrap_or(DEFAULT_TRIALS),
            },
        }
    }

    /// Checks every option against its domain.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] naming the first offending option.
    pub fn validate(&self) -> Result<()> {
        if self.trials == Some(0) {
            return Err(Error::invalid("trials", "must be at least 1"));
        }
        if self.max_trials == Some(0) {
            return Err(Error::invalid("max_trials", "must be at least 1"));
        }
        if self.batch_size == Some(0) {
            return Err(Error::invalid("batch_size", "must be at least 1"));
        }
        if let Some(width) = self.target_ci_width {
            if !(width > 0.0 && width <= 1.0) {
                return Err(Error::invalid(
                    "target_ci_width",
                    format!("must lie in (0, 1], got {width}"),
                ));
            }
        }
        Ok(())
    }
}
