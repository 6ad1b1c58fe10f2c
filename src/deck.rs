use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// An ordered pack of cards, dealt from the front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// The 52 distinct cards in suit-major order.
    ///
    /// ```
    /// use holdem_engine::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s)))
            .collect();
        Self { cards }
    }

    /// A deck holding exactly `cards`, in order. May be shorter than 52.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards: cards.into() }
    }

    /// A full deck whose first cards are `front`, followed by every remaining
    /// standard card in suit-major order. Duplicates in `front` are dropped.
    pub fn stacked(front: &[Card]) -> Self {
        let mut cards: VecDeque<Card> = VecDeque::with_capacity(52);
        for &c in front {
            if !cards.contains(&c) {
                cards.push_back(c);
            }
        }
        for c in Deck::standard().cards {
            if !cards.contains(&c) {
                cards.push_back(c);
            }
        }
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Draw one card from the front of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Draw up to `n` cards; fewer when the deck runs out.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).map_while(|_| self.draw()).collect()
    }

    pub fn peek(&self) -> Option<&Card> {
        self.cards.front()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}
