pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod partial;

use crate::cards::Card;
use core::cmp::Ordering;
use std::fmt;

pub use combinations::Combinations;
pub use partial::classify_partial;

/// Poker hand category. Ordering follows [`Category::strength`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Category {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];

    /// Strength from 1 (high card) to 10 (royal flush).
    pub const fn strength(self) -> u8 {
        match self {
            Category::HighCard => 1,
            Category::Pair => 2,
            Category::TwoPair => 3,
            Category::ThreeOfAKind => 4,
            Category::Straight => 5,
            Category::Flush => 6,
            Category::FullHouse => 7,
            Category::FourOfAKind => 8,
            Category::StraightFlush => 9,
            Category::RoyalFlush => 10,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }

    /// Phrase used in table messages, e.g. "a Full House" or "Two Pair".
    pub const fn describe(self) -> &'static str {
        match self {
            Category::HighCard => "a High Card",
            Category::Pair => "a Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "a Straight",
            Category::Flush => "a Flush",
            Category::FullHouse => "a Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "a Straight Flush",
            Category::RoyalFlush => "a Royal Flush",
        }
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.strength().cmp(&other.strength())
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Best category among `cards`.
///
/// Five or more cards are evaluated over every five-card combination. Fewer
/// fall back to [`classify_partial`].
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::evaluator::{evaluate, Category};
///
/// let cards = parse_cards("As Ah Qc Jd 9h 3s 2c").unwrap();
/// assert_eq!(evaluate(&cards), Category::Pair);
/// ```
pub fn evaluate(cards: &[Card]) -> Category {
    if cards.len() < 5 {
        return classify_partial(cards);
    }
    Combinations::<5>::new(cards.len())
        .map(|idx| evaluate_five(&idx.map(|i| cards[i])))
        .max()
        .unwrap_or(Category::HighCard)
}

/// Classify exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> Category {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    let analysis = HandAnalysis::new(cards);
    DETECTORS
        .iter()
        .find(|d| d.detect(&analysis))
        .map_or(Category::HighCard, |d| d.category())
}
