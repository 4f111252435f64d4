//! Built-in example scenarios.

use crate::config::RunOptions;
use crate::request::RunRequest;
use crate::scenarios::{BinomialParams, CardsParams, DiceParams, ScenarioParams};

/// A named, ready-to-run request.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    /// Short identifier used on the command line.
    pub slug: &'static str,
    /// Display name.
    pub name: &'static str,
    pub request: RunRequest,
}

fn preset(
    slug: &'static str,
    name: &'static str,
    scenario: ScenarioParams,
    options: RunOptions,
) -> Preset {
    Preset {
        slug,
        name,
        request: RunRequest::new(scenario, options),
    }
}

fn dice(dice: u32, sides: u32, condition: &str) -> ScenarioParams {
    ScenarioParams::Dice(DiceParams {
        dice,
        sides,
        condition: condition.to_string(),
    })
}

fn cards(draw: u32, condition: &str, exact: bool) -> ScenarioParams {
    ScenarioParams::Cards(CardsParams {
        draw,
        condition: condition.to_string(),
        exact,
    })
}

fn binomial(n: u32, p: f64, condition: &str, exact: bool) -> ScenarioParams {
    ScenarioParams::Binomial(BinomialParams {
        n,
        p,
        condition: condition.to_string(),
        exact,
    })
}

/// All presets, in display order.
pub fn presets() -> Vec<Preset> {
    let sampled = |trials| RunOptions::new(42).with_trials(trials);
    vec![
        preset(
            "2d6-sum-10",
            "2d6 sum ≥ 10",
            dice(2, 6, "sum>=10"),
            sampled(100_000),
        ),
        preset(
            "3d6-max-5",
            "3d6 max ≥ 5",
            dice(3, 6, "max>=5"),
            sampled(100_000),
        ),
        preset(
            "two-aces",
            "2 Aces (exact)",
            cards(2, "aces>=2", true),
            RunOptions::default(),
        ),
        preset(
            "five-cards-three-hearts",
            "5 cards, ≥3 hearts",
            cards(5, "hearts>=3", false),
            sampled(100_000),
        ),
        preset(
            "binomial-n20-p01",
            "Binomial: n=20, p=0.1",
            binomial(20, 0.1, "successes>=3", true),
            RunOptions::default(),
        ),
        preset(
            "coin-flips",
            "Coin flips: 10 trials",
            binomial(10, 0.5, "successes>=7", false),
            sampled(50_000),
        ),
    ]
}

/// Looks a preset up by slug.
pub fn find(slug: &str) -> Option<Preset> {
    presets().into_iter().find(|p| p.slug == slug)
}
