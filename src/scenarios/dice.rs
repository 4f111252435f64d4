//! Dice rolls.
//!
//! Rolls `dice` fair dice with `sides` faces each and tests the sum, the
//! highest face or the lowest face against a target. Always sampled.

use std::fmt;
use std::str::FromStr;

use super::{parse_error, parse_target, Scenario};
use crate::error::{Error, Result};
use crate::random::Mulberry32;

const SUPPORTED: &str = "sum>=X, sum==X, max>=X, min>=X";

/// Quantity reduced from a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceStat {
    Sum,
    Max,
    Min,
}

/// Parsed dice condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceCondition {
    /// `<stat> >= target`
    AtLeast(DiceStat, u64),
    /// `sum == target`
    SumEquals(u64),
}

impl DiceCondition {
    fn holds(self, sum: u64, max: u64, min: u64) -> bool {
        let pick = |stat| match stat {
            DiceStat::Sum => sum,
            DiceStat::Max => max,
            DiceStat::Min => min,
        };
        match self {
            Self::AtLeast(stat, target) => pick(stat) >= target,
            Self::SumEquals(target) => sum == target,
        }
    }
}

impl FromStr for DiceCondition {
    type Err = Error;

    /// Accepts `sum>=X`, `sum==X`, `max>=X` and `min>=X`.
    fn from_str(s: &str) -> Result<Self> {
        let parsed = if let Some(rest) = s.strip_prefix("sum>=") {
            parse_target(rest).map(|x| Self::AtLeast(DiceStat::Sum, x))
        } else if let Some(rest) = s.strip_prefix("sum==") {
            parse_target(rest).map(Self::SumEquals)
        } else if let Some(rest) = s.strip_prefix("max>=") {
            parse_target(rest).map(|x| Self::AtLeast(DiceStat::Max, x))
        } else if let Some(rest) = s.strip_prefix("min>=") {
            parse_target(rest).map(|x| Self::AtLeast(DiceStat::Min, x))
        } else {
            None
        };
        parsed.ok_or_else(|| parse_error(DiceScenario::NAME, s, SUPPORTED))
    }
}

impl fmt::Display for DiceCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtLeast(DiceStat::Sum, x) => write!(f, "sum>={x}"),
            Self::AtLeast(DiceStat::Max, x) => write!(f, "max>={x}"),
            Self::AtLeast(DiceStat::Min, x) => write!(f, "min>={x}"),
            Self::SumEquals(x) => write!(f, "sum=={x}"),
        }
    }
}

/// `dice` fair dice with faces `1..=sides`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiceScenario {
    dice: u32,
    sides: u32,
    condition: DiceCondition,
}

impl DiceScenario {
    pub const MAX_DICE: u32 = 100;
    pub const MIN_SIDES: u32 = 2;
    pub const MAX_SIDES: u32 = 10_000;

    /// Parses `condition` and checks `dice ∈ [1, 100]`, `sides ∈ [2, 10000]`.
    ///
    /// # Examples
    /// ```
    /// use chances_of::scenarios::DiceScenario;
    /// assert!(DiceScenario::new(2, 6, "sum>=10").is_ok());
    /// assert!(DiceScenario::new(2, 6, "sum>10").is_err());
    /// assert!(DiceScenario::new(0, 6, "sum>=1").is_err());
    /// ```
    pub fn new(dice: u32, sides: u32, condition: &str) -> Result<Self> {
        let condition = condition.parse()?;
        if !(1..=Self::MAX_DICE).contains(&dice) {
            return Err(Error::invalid(
                "dice",
                format!("must be between 1 and {}, got {dice}", Self::MAX_DICE),
            ));
        }
        if !(Self::MIN_SIDES..=Self::MAX_SIDES).contains(&sides) {
            return Err(Error::invalid(
                "sides",
                format!(
                    "must be between {} and {}, got {sides}",
                    Self::MIN_SIDES,
                    Self::MAX_SIDES
                ),
            ));
        }
        Ok(Self {
            dice,
            sides,
            condition,
        })
    }

    pub fn condition(&self) -> DiceCondition {
        self.condition
    }
}

impl Scenario for DiceScenario {
    const NAME: &'static str = "dice";

    fn sample_once(&self, rng: &mut Mulberry32) -> bool {
        let mut sum = 0u64;
        let mut max = 0u64;
        let mut min = u64::MAX;
        for _ in 0..self.dice {
            let face = rng.next_int(1, i64::from(self.sides)) as u64;
            sum += face;
            max = max.max(face);
            min = min.min(face);
        }
        self.condition.holds(sum, max, min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunOptions;
    use crate::scenarios::run_scenario;

    fn estimate(dice: u32, sides: u32, condition: &str, trials: u64) -> f64 {
        let scenario = DiceScenario::new(dice, sides, condition).unwrap();
        run_scenario(&scenario, false, &RunOptions::new(42).with_trials(trials))
            .unwrap()
            .probability
    }

    #[test]
    fn test_parse_all_forms() {
        assert_eq!(
            "sum>=10".parse::<DiceCondition>().unwrap(),
            DiceCondition::AtLeast(DiceStat::Sum, 10)
        );
        assert_eq!(
            "sum==7".parse::<DiceCondition>().unwrap(),
            DiceCondition::SumEquals(7)
        );
        assert_eq!(
            "max>=5".parse::<DiceCondition>().unwrap(),
            DiceCondition::AtLeast(DiceStat::Max, 5)
        );
        assert_eq!(
            "min>=0".parse::<DiceCondition>().unwrap(),
            DiceCondition::AtLeast(DiceStat::Min, 0)
        );
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["sum>=10", "sum==7", "max>=5", "min>=2"] {
            assert_eq!(text.parse::<DiceCondition>().unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_parse_rejects_out_of_grammar() {
        for bad in [
            "", "sum>10", "sum<=3", "max==4", "min==1", "avg>=3", "sum>=", "sum>=-1",
            "sum >= 3", "SUM>=3", "sum>=3 ",
        ] {
            let err = bad.parse::<DiceCondition>().unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains(SUPPORTED), "{bad:?}: {msg}");
        }
    }

    #[test]
    fn test_parameter_ranges() {
        assert!(DiceScenario::new(100, 10_000, "sum>=1").is_ok());
        assert!(DiceScenario::new(101, 6, "sum>=1").is_err());
        assert!(DiceScenario::new(1, 1, "sum>=1").is_err());
        assert!(DiceScenario::new(1, 10_001, "sum>=1").is_err());
    }

    #[test]
    fn test_condition_error_precedes_range_error() {
        let err = DiceScenario::new(0, 6, "bogus").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_two_d6_sum_at_least_10() {
        let p = estimate(2, 6, "sum>=10", 200_000);
        assert!((p - 6.0 / 36.0).abs() < 0.02, "p = {p}");
    }

    #[test]
    fn test_two_d6_min_at_least_5() {
        let p = estimate(2, 6, "min>=5", 200_000);
        assert!((p - 4.0 / 36.0).abs() < 0.02, "p = {p}");
    }

    #[test]
    fn test_sum_equals_seven() {
        let p = estimate(2, 6, "sum==7", 200_000);
        assert!((p - 1.0 / 6.0).abs() < 0.01, "p = {p}");
    }

    #[test]
    fn test_three_d6_max_at_least_5() {
        // 1 − (4/6)³
        let p = estimate(3, 6, "max>=5", 200_000);
        assert!((p - (1.0 - 8.0 / 27.0)).abs() < 0.01, "p = {p}");
    }

    #[test]
    fn test_certain_and_impossible() {
        assert_eq!(estimate(3, 6, "min>=1", 5_000), 1.0);
        assert_eq!(estimate(3, 6, "sum>=19", 5_000), 0.0);
        assert_eq!(estimate(3, 6, "max>=7", 5_000), 0.0);
    }

    #[test]
    fn test_each_trial_consumes_one_draw_per_die() {
        let scenario = DiceScenario::new(4, 6, "sum>=0").unwrap();
        let mut rng = Mulberry32::new(11);
        let mut reference = Mulberry32::new(11);
        scenario.sample_once(&mut rng);
        for _ in 0..4 {
            reference.next_raw();
        }
        assert_eq!(rng, reference);
    }
}
