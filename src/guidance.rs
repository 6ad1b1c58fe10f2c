//! Plain-language coaching for the human seat.

use crate::cards::Card;
use crate::evaluator::{evaluate, Category};
use crate::game::Stage;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Advice {
    Raise,
    Call,
    Fold,
}

impl Advice {
    pub fn for_category(category: Category) -> Self {
        if category >= Category::TwoPair {
            Advice::Raise
        } else if category == Category::Pair {
            Advice::Call
        } else {
            Advice::Fold
        }
    }

    pub const fn text(self) -> &'static str {
        match self {
            Advice::Raise => "You have a strong hand. Consider raising.",
            Advice::Call => "A pair can be decent, so calling might be safe.",
            Advice::Fold => "Your hand might be weak. Consider folding if big raises come.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guidance {
    pub stage: Stage,
    pub best: Category,
    pub advice: Advice,
    /// An opponent's category, when their cards are shown.
    pub opponent: Option<Category>,
}

impl Guidance {
    /// Reveal an opponent's hand against the same board.
    pub fn with_opponent(mut self, hole: &[Card], community: &[Card]) -> Self {
        self.opponent = Some(best_of(hole, community));
        self
    }
}

impl fmt::Display for Guidance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stage: {}", self.stage)?;
        writeln!(f, "Your Best Hand: {}", self.best.describe())?;
        match self.opponent {
            Some(c) => writeln!(f, "Opponent's Hand: {} (Strength: {})", c.describe(), c.strength())?,
            None => writeln!(f, "Opponent's Hand: (Hidden Hand)")?,
        }
        write!(f, "Advice: {}", self.advice.text())
    }
}

fn best_of(hole: &[Card], community: &[Card]) -> Category {
    let cards: Vec<Card> = hole.iter().chain(community).copied().collect();
    evaluate(&cards)
}

pub fn advise(hole: &[Card], community: &[Card], stage: Stage) -> Guidance {
    let best = best_of(hole, community);
    Guidance { stage, best, advice: Advice::for_category(best), opponent: None }
}
