use std::collections::BTreeSet;

/// One pot and the seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidePot {
    pub amount: u64,
    pub eligible: BTreeSet<usize>,
}

impl SidePot {
    pub fn new(amount: u64, eligible: impl IntoIterator<Item = usize>) -> Self {
        Self { amount, eligible: eligible.into_iter().collect() }
    }
}

/// Ordered pots for a hand, derived from what each seat has put in.
///
/// Every all-in seat caps a level at its hand total. Chips up to the lowest cap
/// form the main pot; each further level becomes a side pot that only seats
/// still above the cap can win. Index 0 is the main pot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotLedger {
    contributed: Vec<u64>,
    capped: Vec<bool>,
    pots: Vec<SidePot>,
}

impl PotLedger {
    /// A single empty main pot open to every seat.
    pub fn new(seats: usize) -> Self {
        let mut ledger =
            Self { contributed: vec![0; seats], capped: vec![false; seats], pots: Vec::new() };
        ledger.rebuild();
        ledger
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.contributed.len());
    }

    /// Add `amount` from `seat`. With `all_in` the seat can win no more than
    /// its hand total from each opponent.
    pub fn contribute(&mut self, seat: usize, amount: u64, all_in: bool) {
        let Some(total) = self.contributed.get_mut(seat) else {
            log::warn!("ignoring {amount} chips from unknown seat {seat}");
            return;
        };
        *total += amount;
        if all_in && !self.capped[seat] {
            self.capped[seat] = true;
            log::debug!("seat {seat} all-in, capped at {total}");
        }
        self.rebuild();
    }

    /// Chips `seat` has put in this hand.
    pub fn contributed(&self, seat: usize) -> u64 {
        self.contributed.get(seat).copied().unwrap_or(0)
    }

    fn rebuild(&mut self) {
        let seats = self.contributed.len();
        let mut levels: Vec<u64> =
            (0..seats).filter(|&i| self.capped[i]).map(|i| self.contributed[i]).collect();
        levels.sort_unstable();
        levels.dedup();
        levels.push(u64::MAX);

        self.pots.clear();
        let mut prev = 0;
        for level in levels {
            let amount: u64 =
                self.contributed.iter().map(|&c| c.min(level).saturating_sub(prev)).sum();
            let eligible = (0..seats).filter(|&i| !self.capped[i] || self.contributed[i] >= level);
            if amount > 0 {
                self.pots.push(SidePot::new(amount, eligible));
            } else if level == u64::MAX && self.pots.is_empty() {
                self.pots.push(SidePot::new(0, eligible));
            }
            prev = level;
        }
    }

    pub fn total(&self) -> u64 {
        self.pots.iter().map(|p| p.amount).sum()
    }

    pub fn main(&self) -> u64 {
        self.pots.first().map_or(0, |p| p.amount)
    }

    pub fn sides(&self) -> &[SidePot] {
        self.pots.get(1..).unwrap_or(&[])
    }

    pub fn pots(&self) -> &[SidePot] {
        &self.pots
    }

    pub fn len(&self) -> usize {
        self.pots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
