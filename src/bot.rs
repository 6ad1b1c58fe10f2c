//! Rule-driven bot decisions.
//!
//! [`decide`] is a pure function of the table situation, a [`BotProfile`] and
//! one random draw in `[0, 1)`. Where the draw comes from is up to the caller:
//! [`RngDraws`] for play, [`FixedDraws`] for scripted tests.

use crate::evaluator::Category;
use crate::game::Action;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::str::FromStr;

/// Bot skill tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse a label case-insensitively. Anything unrecognised is `Easy`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }

    /// Cycle Easy -> Medium -> Hard -> Easy.
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn profile(self) -> BotProfile {
        BotProfile::for_difficulty(self)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Difficulty::from_label(s))
    }
}

/// Play style knobs, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct BotProfile {
    /// Chance to bet or re-raise a strong hand.
    pub aggression: f64,
    /// Loosens the pot-odds threshold for calling.
    pub call_stickiness: f64,
    /// Chance to bluff-raise a small bet.
    pub bluff_chance: f64,
}

impl BotProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (aggression, call_stickiness, bluff_chance) = match difficulty {
            Difficulty::Easy => (0.1, 0.2, 0.05),
            Difficulty::Medium => (0.3, 0.5, 0.15),
            Difficulty::Hard => (0.6, 0.8, 0.25),
        };
        Self { aggression, call_stickiness, bluff_chance }
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Easy)
    }
}

/// What a bot sees when it is asked to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotContext {
    /// Category over hole and community cards.
    pub strength: Category,
    pub to_call: u64,
    /// All chips in the middle, side pots included.
    pub pot: u64,
    pub stack: u64,
    /// Bet to match this round.
    pub current_bet: u64,
    pub big_blind: u64,
}

/// Pick an action. `Raise` carries the amount on top of the call.
pub fn decide(ctx: &BotContext, profile: &BotProfile, draw: f64) -> Action {
    let pot = ctx.pot as f64;

    if ctx.to_call == 0 {
        if ctx.strength >= Category::Pair && draw < profile.aggression {
            let size = (pot * (0.4 + profile.aggression)) as u64;
            return Action::Raise(size.max(ctx.big_blind));
        }
        return Action::Check;
    }

    if ctx.stack <= ctx.to_call {
        return if ctx.strength >= Category::TwoPair { Action::Call } else { Action::Fold };
    }

    let call = ctx.to_call as f64;
    let pot_odds = call / (pot + call);
    let threshold = 0.6 - profile.call_stickiness;

    if ctx.strength >= Category::ThreeOfAKind && draw < profile.aggression {
        let size = (pot * (0.6 + profile.aggression)) as u64;
        Action::Raise(size.max(ctx.current_bet.saturating_mul(2)))
    } else if ctx.strength >= Category::Pair && pot_odds < threshold {
        Action::Call
    } else if draw < profile.bluff_chance && pot_odds < 0.1 {
        Action::Raise(ctx.current_bet.saturating_mul(2))
    } else {
        Action::Fold
    }
}

/// Source of uniform draws in `[0, 1)` for bot decisions.
pub trait DrawSource: fmt::Debug {
    fn next_draw(&mut self) -> f64;
}

/// Draws from a ChaCha generator.
#[derive(Debug, Clone)]
pub struct RngDraws {
    rng: ChaCha8Rng,
}

impl RngDraws {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_rng(&mut rand::rng()) }
    }
}

impl DrawSource for RngDraws {
    fn next_draw(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct FixedDraws {
    values: Vec<f64>,
    pos: usize,
}

impl FixedDraws {
    /// An empty list always draws `0.0`.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, pos: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl DrawSource for FixedDraws {
    fn next_draw(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos = self.pos.wrapping_add(1);
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(strength: Category, to_call: u64, pot: u64, stack: u64) -> BotContext {
        BotContext { strength, to_call, pot, stack, current_bet: to_call, big_blind: 100 }
    }

    #[test]
    fn labels_parse_and_default_to_easy() {
        assert_eq!(Difficulty::from_label("HARD"), Difficulty::Hard);
        assert_eq!(Difficulty::from_label("medium"), Difficulty::Medium);
        assert_eq!(Difficulty::from_label("nightmare"), Difficulty::Easy);
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    }

    #[test]
    fn difficulty_cycles() {
        assert_eq!(Difficulty::Easy.next(), Difficulty::Medium);
        assert_eq!(Difficulty::Medium.next(), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
    }

    #[test]
    fn presets_match_tiers() {
        let hard = Difficulty::Hard.profile();
        assert_eq!((hard.aggression, hard.call_stickiness, hard.bluff_chance), (0.6, 0.8, 0.25));
        let easy = BotProfile::default();
        assert_eq!((easy.aggression, easy.call_stickiness, easy.bluff_chance), (0.1, 0.2, 0.05));
    }

    #[test]
    fn opens_with_a_pair_when_draw_is_low() {
        let p = Difficulty::Hard.profile();
        let c = ctx(Category::Pair, 0, 1000, 2000);
        assert_eq!(decide(&c, &p, 0.1), Action::Raise(1000));
        assert_eq!(decide(&c, &p, 0.9), Action::Check);
        let small = ctx(Category::Pair, 0, 50, 2000);
        assert_eq!(decide(&small, &p, 0.1), Action::Raise(100));
    }

    #[test]
    fn high_card_checks_when_free() {
        let p = Difficulty::Hard.profile();
        assert_eq!(decide(&ctx(Category::HighCard, 0, 500, 2000), &p, 0.0), Action::Check);
    }

    #[test]
    fn all_in_calls_need_two_pair() {
        let p = Difficulty::Easy.profile();
        let c = ctx(Category::Pair, 500, 1000, 500);
        assert_eq!(decide(&c, &p, 0.0), Action::Fold);
        let c = ctx(Category::TwoPair, 500, 1000, 400);
        assert_eq!(decide(&c, &p, 0.99), Action::Call);
    }

    #[test]
    fn calls_a_pair_with_good_odds() {
        let p = Difficulty::Easy.profile();
        // 100 / 1100 < 0.4
        assert_eq!(decide(&ctx(Category::Pair, 100, 1000, 2000), &p, 0.99), Action::Call);
        // 1000 / 1100 > 0.4
        assert_eq!(decide(&ctx(Category::Pair, 1000, 100, 2000), &p, 0.99), Action::Fold);
    }

    #[test]
    fn reraises_trips_when_aggressive() {
        let p = Difficulty::Hard.profile();
        let c = BotContext {
            strength: Category::ThreeOfAKind,
            to_call: 100,
            pot: 300,
            stack: 2000,
            current_bet: 200,
            big_blind: 100,
        };
        assert_eq!(decide(&c, &p, 0.5), Action::Raise(400));
    }

    #[test]
    fn bluffs_small_bets() {
        let p = Difficulty::Hard.profile();
        let c = BotContext {
            strength: Category::HighCard,
            to_call: 50,
            pot: 1000,
            stack: 2000,
            current_bet: 100,
            big_blind: 100,
        };
        assert_eq!(decide(&c, &p, 0.2), Action::Raise(200));
        assert_eq!(decide(&c, &p, 0.3), Action::Fold);
    }

    #[test]
    fn fixed_draws_cycle() {
        let mut d = FixedDraws::new(vec![0.1, 0.2]);
        assert_eq!(d.next_draw(), 0.1);
        assert_eq!(d.next_draw(), 0.2);
        assert_eq!(d.next_draw(), 0.1);
        assert_eq!(FixedDraws::new(Vec::new()).next_draw(), 0.0);
    }

    #[test]
    fn seeded_draws_are_in_range_and_reproducible() {
        let mut a = RngDraws::seeded(9);
        let mut b = RngDraws::seeded(9);
        for _ in 0..100 {
            let x = a.next_draw();
            assert!((0.0..1.0).contains(&x));
            assert_eq!(x, b.next_draw());
        }
    }
}
