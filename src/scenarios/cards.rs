//! Card draws from a standard 52-card deck.
//!
//! Each trial shuffles a freshly built deck and inspects the top `draw`
//! cards, so draws are without replacement. Counting conditions on aces and
//! hearts also have a hypergeometric closed form.

use std::fmt;
use std::str::FromStr;

use super::{parse_error, parse_target, Scenario};
use crate::distributions::Hypergeometric;
use crate::error::{Error, Result};
use crate::random::Mulberry32;

const SUPPORTED: &str = "aces>=k, hearts>=k, any_rank=K, any_suit=hearts";

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hearts => "hearts",
            Self::Diamonds => "diamonds",
            Self::Clubs => "clubs",
            Self::Spades => "spades",
        }
    }

    /// Inverse of [`Suit::as_str`].
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|suit| suit.as_str() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }

    /// Inverse of [`Rank::as_str`]: `A`, `2`–`10`, `J`, `Q`, `K`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rank| rank.as_str() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

/// The 52 cards in suit-major order (all hearts first, aces first).
pub fn standard_deck() -> [Card; DECK_SIZE] {
    let mut deck = [Card {
        rank: Rank::Ace,
        suit: Suit::Hearts,
    }; DECK_SIZE];
    let cards = Suit::ALL
        .into_iter()
        .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card { rank, suit }));
    for (slot, card) in deck.iter_mut().zip(cards) {
        *slot = card;
    }
    deck
}

/// Parsed card condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardCondition {
    /// At least `k` aces in the hand.
    AcesAtLeast(u64),
    /// At least `k` hearts in the hand.
    HeartsAtLeast(u64),
    /// At least one card of the rank.
    AnyRank(Rank),
    /// At least one card of the suit.
    AnySuit(Suit),
}

impl CardCondition {
    fn holds(self, hand: &[Card]) -> bool {
        match self {
            Self::AcesAtLeast(k) => hand.iter().filter(|c| c.rank == Rank::Ace).count() as u64 >= k,
            Self::HeartsAtLeast(k) => {
                hand.iter().filter(|c| c.suit == Suit::Hearts).count() as u64 >= k
            }
            Self::AnyRank(rank) => hand.iter().any(|c| c.rank == rank),
            Self::AnySuit(suit) => hand.iter().any(|c| c.suit == suit),
        }
    }
}

impl FromStr for CardCondition {
    type Err = Error;

    /// Accepts `aces>=k`, `hearts>=k`, `any_rank=R` with R one of
    /// A, 2–10, J, Q, K, and `any_suit=S` with S one of hearts, diamonds,
    /// clubs, spades.
    fn from_str(s: &str) -> Result<Self> {
        let parsed = if let Some(rest) = s.strip_prefix("aces>=") {
            parse_target(rest).map(Self::AcesAtLeast)
        } else if let Some(rest) = s.strip_prefix("hearts>=") {
            parse_target(rest).map(Self::HeartsAtLeast)
        } else if let Some(rest) = s.strip_prefix("any_rank=") {
            Rank::from_label(rest).map(Self::AnyRank)
        } else if let Some(rest) = s.strip_prefix("any_suit=") {
            Suit::from_label(rest).map(Self::AnySuit)
        } else {
            None
        };
        parsed.ok_or_else(|| parse_error(CardsScenario::NAME, s, SUPPORTED))
    }
}

impl fmt::Display for CardCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AcesAtLeast(k) => write!(f, "aces>={k}"),
            Self::HeartsAtLeast(k) => write!(f, "hearts>={k}"),
            Self::AnyRank(rank) => write!(f, "any_rank={}", rank.as_str()),
            Self::AnySuit(suit) => write!(f, "any_suit={}", suit.as_str()),
        }
    }
}

/// Draw `draw` cards from a shuffled standard deck.
#[derive(Debug, Clone, PartialEq)]
pub struct CardsScenario {
    draw: usize,
    condition: CardCondition,
}

impl CardsScenario {
    /// Parses `condition` and checks `draw ∈ [1, 52]`.
    ///
    /// # Examples
    /// ```
    /// use chances_of::scenarios::CardsScenario;
    /// assert!(CardsScenario::new(5, "any_rank=Q").is_ok());
    /// assert!(CardsScenario::new(53, "aces>=1").is_err());
    /// ```
    pub fn new(draw: u32, condition: &str) -> Result<Self> {
        let condition = condition.parse()?;
        if !(1..=DECK_SIZE as u32).contains(&draw) {
            return Err(Error::invalid(
                "draw",
                format!("must be between 1 and {DECK_SIZE}, got {draw}"),
            ));
        }
        Ok(Self {
            draw: draw as usize,
            condition,
        })
    }

    pub fn condition(&self) -> CardCondition {
        self.condition
    }
}

impl Scenario for CardsScenario {
    const NAME: &'static str = "cards";

    fn sample_once(&self, rng: &mut Mulberry32) -> bool {
        let mut deck = standard_deck();
        rng.shuffle(&mut deck);
        self.condition.holds(&deck[..self.draw])
    }

    /// Upper hypergeometric tail over N = 52 with K = 4 (aces) or K = 13
    /// (hearts); any other condition has no exact mode.
    fn exact_probability(&self) -> Option<Result<f64>> {
        let (marked, k) = match self.condition {
            CardCondition::AcesAtLeast(k) => (4, k),
            CardCondition::HeartsAtLeast(k) => (13, k),
            other => {
                return Some(Err(Error::UnsupportedExactMode {
                    condition: other.to_string(),
                }))
            }
        };
        Some(
            Hypergeometric::new(DECK_SIZE as u64, marked, self.draw as u64)
                .map(|hand| hand.sf(k)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunOptions;
    use crate::engine::SimulationResult;
    use crate::scenarios::run_scenario;
    use std::collections::HashSet;

    fn run(draw: u32, condition: &str, exact: bool, trials: u64) -> Result<SimulationResult> {
        let scenario = CardsScenario::new(draw, condition)?;
        run_scenario(&scenario, exact, &RunOptions::new(42).with_trials(trials))
    }

    #[test]
    fn test_standard_deck_is_complete() {
        let deck = standard_deck();
        let unique: HashSet<Card> = deck.iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
        assert_eq!(deck.iter().filter(|c| c.rank == Rank::Ace).count(), 4);
        assert_eq!(deck.iter().filter(|c| c.suit == Suit::Hearts).count(), 13);
    }

    #[test]
    fn test_labels_round_trip() {
        for rank in Rank::ALL {
            assert_eq!(Rank::from_label(rank.as_str()), Some(rank));
        }
        for suit in Suit::ALL {
            assert_eq!(Suit::from_label(suit.as_str()), Some(suit));
        }
        assert_eq!(Rank::from_label("1"), None);
        assert_eq!(Rank::from_label("k"), None);
        assert_eq!(Suit::from_label("Hearts"), None);
    }

    #[test]
    fn test_parse_all_forms() {
        assert_eq!(
            "aces>=2".parse::<CardCondition>().unwrap(),
            CardCondition::AcesAtLeast(2)
        );
        assert_eq!(
            "hearts>=3".parse::<CardCondition>().unwrap(),
            CardCondition::HeartsAtLeast(3)
        );
        assert_eq!(
            "any_rank=10".parse::<CardCondition>().unwrap(),
            CardCondition::AnyRank(Rank::Ten)
        );
        assert_eq!(
            "any_rank=K".parse::<CardCondition>().unwrap(),
            CardCondition::AnyRank(Rank::King)
        );
        assert_eq!(
            "any_suit=spades".parse::<CardCondition>().unwrap(),
            CardCondition::AnySuit(Suit::Spades)
        );
    }

    #[test]
    fn test_parse_rejects_out_of_grammar() {
        for bad in [
            "", "aces>2", "aces==2", "kings>=1", "any_rank=1", "any_rank=11", "any_rank=B",
            "any_rank=a", "any_suit=stars", "any_suit=Hearts", "hearts>=x",
        ] {
            let err = bad.parse::<CardCondition>().unwrap_err();
            assert!(err.to_string().contains(SUPPORTED), "{bad:?}");
        }
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["aces>=2", "hearts>=13", "any_rank=A", "any_rank=10", "any_suit=clubs"] {
            assert_eq!(text.parse::<CardCondition>().unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_exact_two_aces() {
        let result = run(2, "aces>=2", true, 1).unwrap();
        assert!(result.exact);
        assert_eq!(result.trials, 0);
        assert_eq!(result.successes, None);
        assert_eq!(result.ci_low, None);
        assert_eq!(result.stop_reason, None);
        assert!((result.probability - 6.0 / 1326.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_hearts() {
        let result = run(5, "hearts>=3", true, 1).unwrap();
        assert!((result.probability - 0.09276710684273709).abs() < 1e-12);
    }

    #[test]
    fn test_exact_unsupported_conditions() {
        for condition in ["any_rank=Q", "any_suit=diamonds"] {
            let err = run(5, condition, true, 1).unwrap_err();
            assert_eq!(
                err,
                Error::UnsupportedExactMode {
                    condition: condition.to_string()
                }
            );
        }
    }

    #[test]
    fn test_impossible_five_aces_is_zero() {
        let sampled = run(52, "aces>=5", false, 2_000).unwrap();
        assert_eq!(sampled.probability, 0.0);
        assert_eq!(sampled.successes, Some(0));

        let exact = run(52, "aces>=5", true, 1).unwrap();
        assert_eq!(exact.probability, 0.0);
    }

    #[test]
    fn test_full_deck_is_certain() {
        let result = run(52, "any_suit=clubs", false, 500).unwrap();
        assert_eq!(result.probability, 1.0);
    }

    #[test]
    fn test_sampled_matches_exact() {
        let exact = run(5, "hearts>=3", true, 1).unwrap().probability;
        let sampled = run(5, "hearts>=3", false, 100_000).unwrap();
        let se = (exact * (1.0 - exact) / 100_000.0).sqrt();
        assert!(
            (sampled.probability - exact).abs() < 4.0 * se,
            "sampled {} vs exact {exact}",
            sampled.probability
        );
    }

    #[test]
    fn test_any_rank_in_five() {
        // 1 − C(48,5)/C(52,5)
        let expected = 1.0 - 1_712_304.0 / 2_598_960.0;
        let sampled = run(5, "any_rank=Q", false, 100_000).unwrap().probability;
        assert!((sampled - expected).abs() < 0.01, "p = {sampled}");
    }

    #[test]
    fn test_draw_range() {
        assert!(CardsScenario::new(0, "aces>=1").is_err());
        assert!(CardsScenario::new(52, "aces>=1").is_ok());
    }
}
