//! JSON run requests.
//!
//! A request bundles a scenario with its run options, in the shape a
//! serving layer receives them:
//!
//! ```json
//! {
//!   "scenario": "dice",
//!   "params": { "dice": 2, "sides": 6, "condition": "sum>=10" },
//!   "options": { "seed": 42, "trials": 100000 }
//! }
//! ```
//!
//! [`RunRequest::validate`] applies the stricter limits of a shared service
//! on top of the core's own checks, so one request cannot monopolise a
//! worker.

use serde::{Deserialize, Serialize};

use crate::config::RunOptions;
use crate::engine::SimulationResult;
use crate::error::{Error, Result};
use crate::scenarios::ScenarioParams;

/// Upper bound on `trials` and `max_trials` accepted from a request.
pub const MAX_REQUEST_TRIALS: u64 = 1_000_000;

/// A scenario plus the options to run it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    #[serde(flatten)]
    pub scenario: ScenarioParams,
    #[serde(default)]
    pub options: RunOptions,
}

impl RunRequest {
    pub fn new(scenario: ScenarioParams, options: RunOptions) -> Self {
        Self { scenario, options }
    }

    /// Decodes a request from JSON.
    ///
    /// # Errors
    /// [`Error::Request`] if the body is not valid JSON, names an unknown
    /// scenario, or lacks a required parameter.
    ///
    /// # Examples
    /// ```
    /// use chances_of::request::RunRequest;
    /// let request = RunRequest::from_json(
    ///     r#"{"scenario": "binomial", "params": {"n": 20, "p": 0.1, "condition": "successes>=3", "exact": true}}"#,
    /// ).unwrap();
    /// let result = request.run().unwrap();
    /// assert!(result.exact);
    /// ```
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Checks the request against service limits and the scenario grammar.
    pub fn validate(&self) -> Result<()> {
        self.options.validate()?;
        if let Some(trials) = self.options.trials {
            if trials > MAX_REQUEST_TRIALS {
                return Err(Error::invalid(
                    "trials",
                    format!("must be between 1 and {MAX_REQUEST_TRIALS}, got {trials}"),
                ));
            }
        }
        if let Some(max_trials) = self.options.max_trials {
            if max_trials > MAX_REQUEST_TRIALS {
                return Err(Error::invalid(
                    "max_trials",
                    format!("must be between 1 and {MAX_REQUEST_TRIALS}, got {max_trials}"),
                ));
            }
        }
        self.scenario.check()
    }

    /// Validates, then runs.
    pub fn run(&self) -> Result<SimulationResult> {
        self.validate()?;
        self.scenario.run(&self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::DiceParams;

    #[test]
    fn test_decode_with_default_options() {
        let request = RunRequest::from_json(
            r#"{"scenario": "dice", "params": {"dice": 2, "sides": 6, "condition": "sum>=10"}}"#,
        )
        .unwrap();
        assert_eq!(request.options, RunOptions::default());
        assert_eq!(request.scenario.name(), "dice");
    }

    #[test]
    fn test_decode_options() {
        let request = RunRequest::from_json(
            r#"{
                "scenario": "cards",
                "params": {"draw": 5, "condition": "hearts>=3"},
                "options": {"seed": 7, "target_ci_width": 0.02, "max_trials": 500000, "batch": 10000}
            }"#,
        )
        .unwrap();
        assert_eq!(request.options.seed, 7);
        assert_eq!(request.options.batch_size, Some(10_000));
        let result = request.run().unwrap();
        assert!(result.stop_reason.is_some());
    }

    #[test]
    fn test_exact_flag_in_options() {
        let request = RunRequest::from_json(
            r#"{
                "scenario": "cards",
                "params": {"draw": 2, "condition": "aces>=2"},
                "options": {"seed": 42, "trials": 1000, "exact": true}
            }"#,
        )
        .unwrap();
        let result = request.run().unwrap();
        assert!(result.exact);
        assert_eq!(result.trials, 0);
        assert!((result.probability - 6.0 / 1326.0).abs() < 1e-12);
    }

    #[test]
    fn test_misspelled_option_rejected() {
        let parsed = RunRequest::from_json(
            r#"{"scenario": "dice", "params": {"dice": 2, "sides": 6, "condition": "sum>=10"}, "options": {"exakt": true}}"#,
        );
        assert!(matches!(parsed, Err(Error::Request(_))));
    }

    #[test]
    fn test_malformed_bodies() {
        for body in [
            "",
            "{",
            r#"{"scenario": "dice"}"#,
            r#"{"scenario": "poker", "params": {}}"#,
            r#"{"scenario": "dice", "params": {"dice": 2, "condition": "sum>=3"}}"#,
        ] {
            assert!(
                matches!(RunRequest::from_json(body), Err(Error::Request(_))),
                "accepted {body:?}"
            );
        }
    }

    #[test]
    fn test_service_limits() {
        let scenario = ScenarioParams::Dice(DiceParams {
            dice: 1,
            sides: 6,
            condition: "sum>=6".to_string(),
        });
        let too_many = RunRequest::new(scenario.clone(), RunOptions::default().with_trials(1_000_001));
        assert!(too_many.validate().is_err());
        let budget = RunRequest::new(
            scenario.clone(),
            RunOptions::default().with_target_ci_width(0.01).with_max_trials(2_000_000),
        );
        assert!(budget.validate().is_err());
        let ok = RunRequest::new(scenario, RunOptions::default().with_trials(1_000_000));
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_invalid_condition_fails_validation() {
        let request = RunRequest::from_json(
            r#"{"scenario": "binomial", "params": {"n": 5, "p": 0.5, "condition": "heads>=2"}}"#,
        )
        .unwrap();
        assert!(matches!(request.run(), Err(Error::Parse { .. })));
    }
}
