use crate::cards::Card;
use crate::evaluator::Category;

/// Rough classification for fewer than five cards.
///
/// Only rank groups and a shared suit are recognised; straights and two pair
/// need more cards than this is ever given.
pub fn classify_partial(cards: &[Card]) -> Category {
    let mut rank_counts = [0u8; 15];
    for c in cards {
        rank_counts[c.rank().value() as usize] += 1;
    }

    match rank_counts.iter().copied().max().unwrap_or(0) {
        n if n >= 4 => return Category::FourOfAKind,
        3 => return Category::ThreeOfAKind,
        2 => return Category::Pair,
        _ => {}
    }

    match cards.split_first() {
        Some((first, rest)) if rest.iter().all(|c| c.suit() == first.suit()) => Category::Flush,
        _ => Category::HighCard,
    }
}
