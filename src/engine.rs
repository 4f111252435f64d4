//! Monte Carlo driver.
//!
//! Repeatedly invokes a single-trial function, counts successes, and
//! reports the estimate with a Wilson score interval.
//!
//! # Modes
//!
//! - **Fixed**: run `trials` trials and compute the interval once.
//! - **Precision-stop**: run batches of `batch_size` trials, recomputing the
//!   interval on the cumulative counts after each batch, until its width is
//!   at most `target_ci_width` or `max_trials` trials have run. The last
//!   batch is truncated so the budget is never exceeded, which bounds the
//!   loop even when the target is unreachable.
//!
//! Runs are synchronous and single-threaded; for a fixed seed and fixed
//! options the result is bit-for-bit reproducible.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{RunOptions, SamplingMode};
use crate::error::Result;
use crate::random::{create_rng, Mulberry32};
use crate::stats::{wilson_interval, ConfidenceLevel};

/// Why an adaptive run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    #[serde(rename = "Target CI width reached")]
    TargetCiWidthReached,
    #[serde(rename = "Max trials reached")]
    MaxTrialsReached,
}

impl StopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TargetCiWidthReached => "Target CI width reached",
            Self::MaxTrialsReached => "Max trials reached",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a scenario run.
///
/// Exact results carry `trials = 0`, no success count, no interval and no
/// stop reason. Sampled results always carry an interval containing
/// `probability`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub trials: u64,
    pub successes: Option<u64>,
    pub probability: f64,
    pub ci_low: Option<f64>,
    pub ci_high: Option<f64>,
    pub exact: bool,
    pub stop_reason: Option<StopReason>,
}

impl SimulationResult {
    /// Result of a closed-form calculation.
    pub fn exact(probability: f64) -> Self {
        Self {
            trials: 0,
            successes: None,
            probability,
            ci_low: None,
            ci_high: None,
            exact: true,
            stop_reason: None,
        }
    }

    fn sampled(
        successes: u64,
        trials: u64,
        level: ConfidenceLevel,
        stop_reason: Option<StopReason>,
    ) -> Self {
        let ci = wilson_interval(successes, trials, level);
        Self {
            trials,
            successes: Some(successes),
            probability: successes as f64 / trials as f64,
            ci_low: Some(ci.low),
            ci_high: Some(ci.high),
            exact: false,
            stop_reason,
        }
    }

    /// `ci_high − ci_low`, if the result has an interval.
    pub fn ci_width(&self) -> Option<f64> {
        Some(self.ci_high? - self.ci_low?)
    }
}

/// Runs `trial` repeatedly according to `options`.
///
/// A fresh [`Mulberry32`] seeded from `options.seed` is created for the run
/// and handed to every trial in sequence.
///
/// # Errors
/// Returns [`crate::Error::InvalidParameter`] if `options` fail
/// [`RunOptions::validate`]; no trial runs in that case.
///
/// # Examples
/// ```
/// use chances_of::config::RunOptions;
/// use chances_of::engine::run_monte_carlo;
///
/// // P(uniform draw < 0.25)
/// let options = RunOptions::new(1).with_trials(50_000);
/// let result = run_monte_carlo(|rng| rng.next_f64() < 0.25, &options).unwrap();
/// assert!((result.probability - 0.25).abs() < 0.01);
/// assert!(result.ci_low.unwrap() <= result.probability);
/// ```
pub fn run_monte_carlo<F>(mut trial: F, options: &RunOptions) -> Result<SimulationResult>
where
    F: FnMut(&mut Mulberry32) -> bool,
{
    options.validate()?;
    let mut rng = create_rng(options.seed);
    let level = options.confidence;

    let result = match options.mode() {
        SamplingMode::Fixed { trials } => {
            let successes = run_batch(&mut trial, &mut rng, trials);
            SimulationResult::sampled(successes, trials, level, None)
        }
        SamplingMode::Adaptive {
            target_ci_width,
            max_trials,
            batch_size,
        } => run_until_precise(
            &mut trial,
            &mut rng,
            level,
            target_ci_width,
            max_trials,
            batch_size,
        ),
    };

    debug!(
        trials = result.trials,
        successes = result.successes,
        probability = result.probability,
        stop_reason = result.stop_reason.map(StopReason::as_str),
        "monte carlo run finished"
    );
    Ok(result)
}

fn run_batch<F>(trial: &mut F, rng: &mut Mulberry32, count: u64) -> u64
where
    F: FnMut(&mut Mulberry32) -> bool,
{
    let mut successes = 0;
    for _ in 0..count {
        if trial(rng) {
            successes += 1;
        }
    }
    successes
}

fn run_until_precise<F>(
    trial: &mut F,
    rng: &mut Mulberry32,
    level: ConfidenceLevel,
    target_ci_width: f64,
    max_trials: u64,
    batch_size: u64,
) -> SimulationResult
where
    F: FnMut(&mut Mulberry32) -> bool,
{
    let mut trials = 0;
    let mut successes = 0;
    let mut stop_reason = StopReason::MaxTrialsReached;

    while trials < max_trials {
        let batch = batch_size.min(max_trials - trials);
        successes += run_batch(trial, rng, batch);
        trials += batch;

        let width = wilson_interval(successes, trials, level).width();
        debug!(trials, successes, width, "adaptive batch complete");
        if width <= target_ci_width {
            stop_reason = StopReason::TargetCiWidthReached;
            break;
        }
    }

    SimulationResult::sampled(successes, trials, level, Some(stop_reason))
}
