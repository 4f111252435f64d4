//! Run reports.
//!
//! A [`RunReport`] is the record a front end emits for one run: the
//! scenario and its parameters, every [`SimulationResult`] field, and the
//! wall-clock time the run took.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::engine::SimulationResult;
use crate::scenarios::ScenarioParams;
use crate::stats::ConfidenceLevel;

/// Serializable record of one finished run.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use chances_of::engine::SimulationResult;
/// use chances_of::report::RunReport;
/// use chances_of::scenarios::{CardsParams, ScenarioParams};
/// use chances_of::stats::ConfidenceLevel;
///
/// let params = ScenarioParams::Cards(CardsParams {
///     draw: 2,
///     condition: "aces>=2".into(),
///     exact: true,
/// });
/// let report = RunReport::new(
///     &params,
///     SimulationResult::exact(6.0 / 1326.0),
///     ConfidenceLevel::NinetyFive,
///     Duration::from_millis(0),
/// );
/// let json = serde_json::to_value(&report).unwrap();
/// assert_eq!(json["scenario"], "cards");
/// assert!(json["successes"].is_null());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    #[serde(flatten)]
    pub params: &'a ScenarioParams,
    #[serde(flatten)]
    pub result: SimulationResult,
    pub time_ms: u64,
    #[serde(skip)]
    pub confidence: ConfidenceLevel,
}

impl<'a> RunReport<'a> {
    pub fn new(
        params: &'a ScenarioParams,
        result: SimulationResult,
        confidence: ConfidenceLevel,
        elapsed: Duration,
    ) -> Self {
        Self {
            params,
            result,
            time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            confidence,
        }
    }

    /// Human-readable summary, one field per line.
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = &self.result;
        match self.params {
            ScenarioParams::Dice(p) => {
                writeln!(f, "Scenario: Dice")?;
                writeln!(f, "Dice: {}d{}", p.dice, p.sides)?;
                writeln!(f, "Condition: {}", p.condition)?;
            }
            ScenarioParams::Cards(p) => {
                writeln!(f, "Scenario: Cards")?;
                writeln!(f, "Draw: {} cards", p.draw)?;
                writeln!(f, "Condition: {}", p.condition)?;
            }
            ScenarioParams::Binomial(p) => {
                writeln!(f, "Scenario: Binomial")?;
                writeln!(f, "n: {}, p: {}", p.n, p.p)?;
                writeln!(f, "Condition: {}", p.condition)?;
            }
        }

        if result.exact {
            writeln!(f, "Mode: Exact Calculation")?;
        } else {
            writeln!(f, "Trials: {}", group_thousands(result.trials))?;
            if let Some(successes) = result.successes {
                writeln!(f, "Successes: {}", group_thousands(successes))?;
            }
        }
        writeln!(f, "Probability: {:.6}", result.probability)?;
        if let (Some(low), Some(high)) = (result.ci_low, result.ci_high) {
            writeln!(f, "{} CI: [{low:.6}, {high:.6}]", self.confidence)?;
        }
        if let Some(reason) = result.stop_reason {
            writeln!(f, "Stop Reason: {reason}")?;
        }
        writeln!(f, "Time: {}ms", self.time_ms)
    }
}

/// `1234567` → `"1,234,567"`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
