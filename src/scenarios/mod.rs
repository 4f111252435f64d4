//! Scenario predicates.
//!
//! A scenario pairs a parsed condition with the parameters of one random
//! experiment. Each implements [`Scenario`]: it can sample one outcome and,
//! where a closed form exists, compute the probability exactly.
//!
//! | Scenario | Conditions | Exact mode |
//! |---|---|---|
//! | [`dice::DiceScenario`] | `sum>=X`, `sum==X`, `max>=X`, `min>=X` | none (always sampled) |
//! | [`cards::CardsScenario`] | `aces>=k`, `hearts>=k`, `any_rank=R`, `any_suit=S` | hypergeometric, for `aces>=k` and `hearts>=k` |
//! | [`binomial::BinomialScenario`] | `successes>=k`, `successes==k` | binomial, always |
//!
//! At the boundary, [`ScenarioParams`] carries the raw parameters keyed by
//! scenario name and dispatches to the matching implementation.

pub mod binomial;
pub mod cards;
pub mod dice;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RunOptions;
use crate::engine::{run_monte_carlo, SimulationResult};
use crate::error::{Error, Result};
use crate::random::Mulberry32;

pub use binomial::{BinomialCondition, BinomialScenario};
pub use cards::{CardCondition, CardsScenario};
pub use dice::{DiceCondition, DiceScenario};

/// A random experiment with a boolean condition on its outcome.
pub trait Scenario {
    /// Scenario name as used at the boundary (`dice`, `cards`, `binomial`).
    const NAME: &'static str;

    /// Draws one outcome from `rng` and reports whether the condition held.
    fn sample_once(&self, rng: &mut Mulberry32) -> bool;

    /// Closed-form probability of the condition.
    ///
    /// `None` means the scenario has no exact mode at all and a request for
    /// one falls back to sampling; `Some(Err(_))` means this particular
    /// condition has no closed form.
    fn exact_probability(&self) -> Option<Result<f64>> {
        None
    }
}

/// Runs a parsed scenario: exactly if requested and available, otherwise by
/// Monte Carlo sampling.
///
/// # Errors
/// [`Error::UnsupportedExactMode`] if `exact` is requested for a condition
/// without a closed form, or any option validation error from the driver.
pub fn run_scenario<S: Scenario>(
    scenario: &S,
    exact: bool,
    options: &RunOptions,
) -> Result<SimulationResult> {
    if exact {
        if let Some(probability) = scenario.exact_probability() {
            debug!(scenario = S::NAME, "computing exact probability");
            return probability.map(SimulationResult::exact);
        }
    }
    debug!(scenario = S::NAME, seed = options.seed, "sampling");
    run_monte_carlo(|rng| scenario.sample_once(rng), options)
}

/// Raw dice parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiceParams {
    pub dice: u32,
    pub sides: u32,
    pub condition: String,
}

/// Raw card-draw parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardsParams {
    pub draw: u32,
    pub condition: String,
    #[serde(default)]
    pub exact: bool,
}

/// Raw Bernoulli-trial parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinomialParams {
    pub n: u32,
    pub p: f64,
    pub condition: String,
    #[serde(default)]
    pub exact: bool,
}

/// Scenario parameters tagged by scenario name.
///
/// Serialized as `{"scenario": "<name>", "params": {...}}`.
///
/// # Examples
/// ```
/// use chances_of::config::RunOptions;
/// use chances_of::scenarios::ScenarioParams;
///
/// let params: ScenarioParams = serde_json::from_str(
///     r#"{"scenario": "cards", "params": {"draw": 2, "condition": "aces>=2", "exact": true}}"#,
/// ).unwrap();
/// let result = params.run(&RunOptions::default()).unwrap();
/// assert!((result.probability - 6.0 / 1326.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scenario", content = "params", rename_all = "lowercase")]
pub enum ScenarioParams {
    Dice(DiceParams),
    Cards(CardsParams),
    Binomial(BinomialParams),
}

impl ScenarioParams {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dice(_) => DiceScenario::NAME,
            Self::Cards(_) => CardsScenario::NAME,
            Self::Binomial(_) => BinomialScenario::NAME,
        }
    }

    /// Whether the parameters request exact mode. Dice never does.
    ///
    /// [`RunOptions::exact`] can also request it; see [`ScenarioParams::run`].
    pub fn exact(&self) -> bool {
        match self {
            Self::Dice(_) => false,
            Self::Cards(p) => p.exact,
            Self::Binomial(p) => p.exact,
        }
    }

    /// Parses the condition and validates parameters without running.
    pub fn check(&self) -> Result<()> {
        match self {
            Self::Dice(p) => DiceScenario::new(p.dice, p.sides, &p.condition).map(drop),
            Self::Cards(p) => CardsScenario::new(p.draw, &p.condition).map(drop),
            Self::Binomial(p) => BinomialScenario::new(p.n, p.p, &p.condition).map(drop),
        }
    }

    /// Parses, validates and runs the scenario.
    ///
    /// Exact mode applies when either the parameters or `options` ask for it.
    pub fn run(&self, options: &RunOptions) -> Result<SimulationResult> {
        let exact = self.exact() || options.exact;
        match self {
            Self::Dice(p) => {
                let scenario = DiceScenario::new(p.dice, p.sides, &p.condition)?;
                run_scenario(&scenario, exact, options)
            }
            Self::Cards(p) => {
                let scenario = CardsScenario::new(p.draw, &p.condition)?;
                run_scenario(&scenario, exact, options)
            }
            Self::Binomial(p) => {
                let scenario = BinomialScenario::new(p.n, p.p, &p.condition)?;
                run_scenario(&scenario, exact, options)
            }
        }
    }
}

/// Parses the unsigned integer after a condition prefix.
///
/// Only ASCII digits are accepted: no sign, whitespace or separators.
pub(crate) fn parse_target(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub(crate) fn parse_error(
    scenario: &'static str,
    condition: &str,
    supported: &'static str,
) -> Error {
    Error::Parse {
        scenario,
        condition: condition.to_string(),
        supported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("10"), Some(10));
        assert_eq!(parse_target("007"), Some(7));
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("+3"), None);
        assert_eq!(parse_target(" 3"), None);
        assert_eq!(parse_target("3.0"), None);
        assert_eq!(parse_target("99999999999999999999999"), None);
    }

    #[test]
    fn test_params_dispatch_by_name() {
        let params: ScenarioParams = serde_json::from_str(
            r#"{"scenario": "dice", "params": {"dice": 2, "sides": 6, "condition": "sum>=10"}}"#,
        )
        .unwrap();
        assert_eq!(params.name(), "dice");
        assert!(!params.exact());
        let result = params.run(&RunOptions::new(42).with_trials(10_000)).unwrap();
        assert_eq!(result.trials, 10_000);
    }

    #[test]
    fn test_unknown_scenario_rejected() {
        let parsed = serde_json::from_str::<ScenarioParams>(
            r#"{"scenario": "roulette", "params": {}}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_dice_ignores_exact_request() {
        let scenario = DiceScenario::new(1, 6, "sum>=6").unwrap();
        let result = run_scenario(&scenario, true, &RunOptions::new(1).with_trials(1_000)).unwrap();
        assert!(!result.exact);
        assert_eq!(result.trials, 1_000);
    }

    #[test]
    fn test_exact_serialization_round_trip() {
        let params = ScenarioParams::Binomial(BinomialParams {
            n: 20,
            p: 0.1,
            condition: "successes>=3".to_string(),
            exact: true,
        });
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["scenario"], "binomial");
        assert_eq!(json["params"]["n"], 20);
        assert!(params.check().is_ok());
        let result = params.run(&RunOptions::default()).unwrap();
        assert!(result.exact);
    }

    #[test]
    fn test_exact_requested_through_options() {
        let params = ScenarioParams::Binomial(BinomialParams {
            n: 20,
            p: 0.1,
            condition: "successes>=3".to_string(),
            exact: false,
        });
        let result = params.run(&RunOptions::default().with_exact(true)).unwrap();
        assert!(result.exact);
        assert!((result.probability - 0.32307319481053415).abs() < 1e-12);

        let dice = ScenarioParams::Dice(DiceParams {
            dice: 2,
            sides: 6,
            condition: "sum>=10".to_string(),
        });
        let sampled = dice
            .run(&RunOptions::new(42).with_trials(1_000).with_exact(true))
            .unwrap();
        assert!(!sampled.exact);
    }

    #[test]
    fn test_check_reports_parse_errors() {
        let params = ScenarioParams::Cards(CardsParams {
            draw: 5,
            condition: "kings>=1".to_string(),
            exact: false,
        });
        assert!(matches!(params.check(), Err(Error::Parse { scenario: "cards", .. })));
    }
}
