//! `chances-of` command-line front end.
//!
//! # Usage
//!
//! ```bash
//! # Monte Carlo estimate
//! chances-of dice --dice 2 --sides 6 --condition "sum>=10" --trials 100000
//!
//! # Exact hypergeometric tail, JSON output
//! chances-of cards --draw 5 --condition "hearts>=3" --exact --json
//!
//! # Sample until the 95% interval is at most 0.01 wide
//! chances-of binomial --n 20 --p 0.1 --condition "successes>=3" --target-ci-width 0.01
//!
//! # Run a JSON request from a file (or `-` for stdin)
//! chances-of run --request request.json
//! ```

use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use chances_of::config::{RunOptions, DEFAULT_BATCH_SIZE, DEFAULT_MAX_TRIALS, DEFAULT_SEED};
use chances_of::presets;
use chances_of::report::RunReport;
use chances_of::request::RunRequest;
use chances_of::scenarios::{BinomialParams, CardsParams, DiceParams, ScenarioParams};
use chances_of::stats::ConfidenceLevel;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Probability calculator
#[derive(Parser, Debug)]
#[command(name = "chances-of")]
#[command(about = "Probabilities through Monte Carlo simulation and exact calculation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Roll dice
    Dice {
        /// Number of dice
        #[arg(long)]
        dice: u32,
        /// Sides per die
        #[arg(long)]
        sides: u32,
        /// sum>=X, sum==X, max>=X or min>=X
        #[arg(long)]
        condition: String,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Draw cards from a standard 52-card deck
    Cards {
        /// Cards to draw
        #[arg(long)]
        draw: u32,
        /// aces>=k, hearts>=k, any_rank=R or any_suit=S
        #[arg(long)]
        condition: String,
        /// Exact hypergeometric calculation (aces>=k and hearts>=k only)
        #[arg(long)]
        exact: bool,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Independent Bernoulli trials
    Binomial {
        /// Trials per experiment
        #[arg(long = "n")]
        n: u32,
        /// Success probability per trial, in (0, 1]
        #[arg(long = "p")]
        p: f64,
        /// successes>=X or successes==X
        #[arg(long)]
        condition: String,
        /// Exact binomial calculation
        #[arg(long)]
        exact: bool,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Run a JSON request read from a file, or stdin for `-`
    Run {
        #[arg(long)]
        request: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a built-in preset
    Preset {
        /// Preset slug (see `presets`)
        slug: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List built-in presets
    Presets,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Random seed
    #[arg(long, default_value_t = DEFAULT_SEED, allow_negative_numbers = true)]
    seed: i64,
    /// Number of trials (fixed mode)
    #[arg(long)]
    trials: Option<u64>,
    /// Stop once the confidence interval is at most this wide
    #[arg(long)]
    target_ci_width: Option<f64>,
    /// Trial budget in precision-stop mode
    #[arg(long, default_value_t = DEFAULT_MAX_TRIALS)]
    max_trials: u64,
    /// Batch size in precision-stop mode
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch: u64,
    /// Confidence level: 0.90, 0.95 or 0.99
    #[arg(long, default_value_t = 0.95)]
    confidence: f64,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    fn options(&self) -> chances_of::Result<RunOptions> {
        Ok(RunOptions {
            seed: self.seed,
            trials: self.trials,
            target_ci_width: self.target_ci_width,
            max_trials: Some(self.max_trials),
            batch_size: Some(self.batch),
            confidence: ConfidenceLevel::try_from(self.confidence)?,
            exact: false,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Command::Dice {
            dice,
            sides,
            condition,
            run,
        } => {
            let params = ScenarioParams::Dice(DiceParams {
                dice,
                sides,
                condition,
            });
            execute(&RunRequest::new(params, run.options()?), run.json)
        }
        Command::Cards {
            draw,
            condition,
            exact,
            run,
        } => {
            let params = ScenarioParams::Cards(CardsParams {
                draw,
                condition,
                exact,
            });
            execute(&RunRequest::new(params, run.options()?), run.json)
        }
        Command::Binomial {
            n,
            p,
            condition,
            exact,
            run,
        } => {
            let params = ScenarioParams::Binomial(BinomialParams {
                n,
                p,
                condition,
                exact,
            });
            execute(&RunRequest::new(params, run.options()?), run.json)
        }
        Command::Run { request, json } => {
            let body = if request.as_os_str() == "-" {
                let mut body = String::new();
                std::io::stdin().read_to_string(&mut body)?;
                body
            } else {
                std::fs::read_to_string(&request)?
            };
            let request = RunRequest::from_json(&body)?;
            request.validate()?;
            execute(&request, json)
        }
        Command::Preset { slug, json } => {
            let preset = presets::find(&slug).ok_or_else(|| {
                format!("unknown preset `{slug}` (run `chances-of presets` to list them)")
            })?;
            tracing::info!(preset = preset.slug, "running preset");
            execute(&preset.request, json)
        }
        Command::Presets => {
            for preset in presets::presets() {
                println!("{:<26} {}", preset.slug, preset.name);
            }
            Ok(())
        }
    }
}

fn execute(request: &RunRequest, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(scenario = request.scenario.name(), "starting run");
    let started = Instant::now();
    let result = request.scenario.run(&request.options)?;
    let report = RunReport::new(
        &request.scenario,
        result,
        request.options.confidence,
        started.elapsed(),
    );

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
