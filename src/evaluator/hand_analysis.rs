use crate::cards::{Card, Rank};

/// Facts about a five-card hand that the category detectors share.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    /// Occurrences per numeric rank, indexed `0..=14`.
    pub rank_counts: [u8; 15],
    pub is_flush: bool,
    pub is_straight: bool,
    /// Highest rank of the straight (Five for the wheel), when there is one.
    pub straight_high: Option<Rank>,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 5]) -> Self {
        let mut rank_counts = [0u8; 15];
        for c in cards {
            rank_counts[c.rank().value() as usize] += 1;
        }

        let first_suit = cards[0].suit();
        let is_flush = cards.iter().all(|c| c.suit() == first_suit);
        let straight_high = straight_high(&rank_counts);

        Self {
            rank_counts,
            is_flush,
            is_straight: straight_high.is_some(),
            straight_high,
        }
    }

    /// Group sizes sorted largest first, e.g. `[3, 2]` for a full house.
    pub fn group_sizes(&self) -> Vec<u8> {
        let mut sizes: Vec<u8> = self.rank_counts.iter().copied().filter(|&n| n > 0).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }

    pub fn count_of_size(&self, size: u8) -> usize {
        self.rank_counts.iter().filter(|&&n| n == size).count()
    }

    pub fn max_group(&self) -> u8 {
        self.rank_counts.iter().copied().max().unwrap_or(0)
    }

    /// A flush running up to the Ace. The wheel tops out at Five.
    pub fn is_royal(&self) -> bool {
        self.is_flush && self.straight_high == Some(Rank::Ace)
    }
}

/// Scan the distinct ranks for five in a row, including A-2-3-4-5.
fn straight_high(rank_counts: &[u8; 15]) -> Option<Rank> {
    let present = |v: usize| rank_counts[v] > 0;

    let distinct = (2..=14).filter(|&v| present(v)).count();
    if distinct != 5 {
        return None;
    }

    for high in (6..=14).rev() {
        if (high - 4..=high).all(present) {
            return Rank::from_value(high as u8);
        }
    }

    let wheel = [14, 2, 3, 4, 5];
    if wheel.iter().all(|&v| present(v)) {
        return Some(Rank::Five);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn analyze(s: &str) -> HandAnalysis {
        let v = parse_cards(s).unwrap();
        HandAnalysis::new(&[v[0], v[1], v[2], v[3], v[4]])
    }

    #[test]
    fn detects_broadway_and_wheel() {
        let a = analyze("Ts Jh Qd Kc As");
        assert_eq!(a.straight_high, Some(Rank::Ace));
        let w = analyze("As 2h 3d 4c 5s");
        assert_eq!(w.straight_high, Some(Rank::Five));
        assert!(!w.is_royal());
    }

    #[test]
    fn no_wraparound_straight() {
        let a = analyze("Qs Kh Ad 2c 3s");
        assert!(!a.is_straight);
    }

    #[test]
    fn group_sizes_are_sorted() {
        let a = analyze("9s 9h 9d 4c 4s");
        assert_eq!(a.group_sizes(), vec![3, 2]);
        assert_eq!(a.max_group(), 3);
        assert_eq!(a.count_of_size(2), 1);
    }

    #[test]
    fn royal_needs_flush_straight_with_ace_and_king() {
        assert!(analyze("Th Jh Qh Kh Ah").is_royal());
        assert!(!analyze("9h Th Jh Qh Kh").is_royal());
        assert!(!analyze("Th Jh Qh Kh As").is_royal());
        assert!(!analyze("Ah 2h 3h 4h 5h").is_royal());
    }
}
