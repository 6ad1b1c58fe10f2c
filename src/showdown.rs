use crate::evaluator::Category;
use crate::pot::SidePot;

/// Outcome of paying out every pot at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settlement {
    /// Chips won, indexed by seat.
    pub payouts: Vec<u64>,
    /// Winning seats per pot, ascending, in pot order.
    pub pot_winners: Vec<Vec<usize>>,
    /// Chips no contender could take. Only non-zero with no contenders at all.
    pub unclaimed: u64,
}

impl Settlement {
    /// Seats that won anything, ascending.
    pub fn winners(&self) -> Vec<usize> {
        self.payouts
            .iter()
            .enumerate()
            .filter(|(_, &won)| won > 0)
            .map(|(seat, _)| seat)
            .collect()
    }
}

/// Split `amount` evenly among `winners`; the remainder goes one chip at a
/// time to the lowest seat indices.
///
/// ```
/// use holdem_engine::showdown::split_evenly;
///
/// assert_eq!(split_evenly(100, &[2, 0, 1]), vec![(0, 34), (1, 33), (2, 33)]);
/// ```
pub fn split_evenly(amount: u64, winners: &[usize]) -> Vec<(usize, u64)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let mut seats = winners.to_vec();
    seats.sort_unstable();
    seats.dedup();
    let n = seats.len() as u64;
    let share = amount / n;
    let remainder = (amount % n) as usize;
    seats
        .into_iter()
        .enumerate()
        .map(|(i, seat)| (seat, share + u64::from(i < remainder)))
        .collect()
}

/// Highest-category seats among `contenders`.
fn best_of(contenders: &[(usize, Category)]) -> Vec<usize> {
    let Some(best) = contenders.iter().map(|&(_, c)| c).max() else {
        return Vec::new();
    };
    let mut seats: Vec<usize> =
        contenders.iter().filter(|&&(_, c)| c == best).map(|&(s, _)| s).collect();
    seats.sort_unstable();
    seats
}

/// Pay out `pots` in order to the best hands among `contenders`.
///
/// For each pot the contenders are those eligible for it. A pot nobody
/// eligible is contesting goes to the best hand at the table instead.
pub fn distribute(pots: &[SidePot], contenders: &[(usize, Category)], seats: usize) -> Settlement {
    let mut settlement = Settlement { payouts: vec![0; seats], ..Settlement::default() };
    let overall = best_of(contenders);

    for pot in pots {
        let eligible: Vec<(usize, Category)> =
            contenders.iter().copied().filter(|(s, _)| pot.eligible.contains(s)).collect();
        let mut winners = best_of(&eligible);
        if winners.is_empty() && pot.amount > 0 {
            log::warn!("pot of {} has no eligible contender; awarding to best hand", pot.amount);
            winners = overall.clone();
        }
        if winners.is_empty() {
            settlement.unclaimed += pot.amount;
        }
        for (seat, won) in split_evenly(pot.amount, &winners) {
            if let Some(slot) = settlement.payouts.get_mut(seat) {
                *slot += won;
            } else {
                settlement.unclaimed += won;
            }
        }
        settlement.pot_winners.push(winners);
    }
    settlement
}
