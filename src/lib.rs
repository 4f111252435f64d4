//! # chances-of
//!
//! Probability that a dice roll, card draw or run of Bernoulli trials
//! satisfies a condition, estimated by Monte Carlo simulation with a Wilson
//! score interval, or computed exactly where a closed form exists.
//!
//! ## Modules
//!
//! - [`random`] — Seeded Mulberry32 generator, integer draws, shuffle
//! - [`stats`] — Wilson score confidence intervals
//! - [`special`] — Log-gamma and overflow-safe binomial coefficients
//! - [`distributions`] — Binomial and hypergeometric closed forms
//! - [`config`] — Run options and sampling-mode resolution
//! - [`engine`] — Fixed and precision-stop Monte Carlo driver
//! - [`scenarios`] — Dice, cards and binomial predicates
//! - [`request`], [`report`], [`presets`] — JSON requests, output records,
//!   built-in examples
//!
//! ## Example
//!
//! ```
//! use chances_of::config::RunOptions;
//! use chances_of::scenarios::{run_scenario, DiceScenario};
//!
//! let two_d6 = DiceScenario::new(2, 6, "sum>=10").unwrap();
//! let result = run_scenario(&two_d6, false, &RunOptions::new(42).with_trials(100_000)).unwrap();
//! assert!((result.probability - 1.0 / 6.0).abs() < 0.01);
//! ```
//!
//! ## Design Philosophy
//!
//! - **Reproducible**: every run owns its generator; a seed replays a run
//!   bit-for-bit
//! - **Fail fast**: malformed conditions and unsupported exact requests are
//!   rejected before any sampling
//! - **Property-based testing**: interval and combinatorial invariants
//!   verified via proptest

pub mod config;
pub mod distributions;
pub mod engine;
pub mod error;
pub mod presets;
pub mod random;
pub mod report;
pub mod request;
pub mod scenarios;
pub mod special;
pub mod stats;

pub use config::RunOptions;
pub use engine::{run_monte_carlo, SimulationResult, StopReason};
pub use error::{Error, Result};
pub use scenarios::{run_scenario, Scenario, ScenarioParams};
