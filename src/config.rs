use crate::bot::Difficulty;

/// Who controls a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeatKind {
    Human,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatConfig {
    pub name: String,
    pub kind: SeatKind,
    pub chips: u64,
}

impl SeatConfig {
    pub fn new(name: impl Into<String>, kind: SeatKind, chips: u64) -> Self {
        Self { name: name.into(), kind, chips }
    }
}

/// Table setup for a session.
///
/// ```
/// use holdem_engine::config::TableConfig;
///
/// let cfg = TableConfig::default().with_blinds(10, 20).with_seed(7);
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.seats.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub seats: Vec<SeatConfig>,
    pub small_blind: u64,
    pub big_blind: u64,
    pub difficulty: Difficulty,
    /// Dealer button for the first hand.
    pub first_dealer: usize,
    /// Seed for shuffles and bot draws. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

pub const DEFAULT_CHIPS: u64 = 2000;

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seats: vec![
                SeatConfig::new("You", SeatKind::Human, DEFAULT_CHIPS),
                SeatConfig::new("Bot 1", SeatKind::Bot, DEFAULT_CHIPS),
                SeatConfig::new("Bot 2", SeatKind::Bot, DEFAULT_CHIPS),
            ],
            small_blind: 50,
            big_blind: 100,
            difficulty: Difficulty::Easy,
            first_dealer: 0,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_blinds(mut self, small: u64, big: u64) -> Self {
        self.small_blind = small;
        self.big_blind = big;
        self
    }

    /// Set one seat's starting stack. Out-of-range seats are ignored.
    pub fn with_seat_chips(mut self, seat: usize, chips: u64) -> Self {
        if let Some(s) = self.seats.get_mut(seat) {
            s.chips = chips;
        }
        self
    }

    /// Same starting stack for every seat.
    pub fn with_chips(mut self, chips: u64) -> Self {
        for s in &mut self.seats {
            s.chips = chips;
        }
        self
    }

    pub fn with_dealer(mut self, seat: usize) -> Self {
        self.first_dealer = seat;
        self
    }

    pub fn with_seats(mut self, seats: Vec<SeatConfig>) -> Self {
        self.seats = seats;
        self
    }

    /// Turn every human seat into a bot.
    pub fn bots_only(mut self) -> Self {
        for s in &mut self.seats {
            s.kind = SeatKind::Bot;
        }
        self
    }

    pub fn human_seat(&self) -> Option<usize> {
        self.seats.iter().position(|s| s.kind == SeatKind::Human)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.seats.len();
        if !(MIN_SEATS..=MAX_SEATS).contains(&n) {
            return Err(ConfigError::SeatCount(n));
        }
        let humans = self.seats.iter().filter(|s| s.kind == SeatKind::Human).count();
        if humans > 1 {
            return Err(ConfigError::TooManyHumans(humans));
        }
        if self.small_blind == 0 || self.small_blind > self.big_blind {
            return Err(ConfigError::Blinds { small: self.small_blind, big: self.big_blind });
        }
        if self.first_dealer >= n {
            return Err(ConfigError::Dealer(self.first_dealer));
        }
        Ok(())
    }
}

pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 10;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("table needs 2 to 10 seats, got {0}")]
    SeatCount(usize),
    #[error("at most one human seat is supported, got {0}")]
    TooManyHumans(usize),
    #[error("invalid blinds {small}/{big}")]
    Blinds { small: u64, big: u64 },
    #[error("dealer seat {0} is out of range")]
    Dealer(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        let cfg = TableConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.human_seat(), Some(0));
        assert!(cfg.seats.iter().all(|s| s.chips == 2000));
    }

    #[test]
    fn builders_apply() {
        let cfg = TableConfig::default()
            .with_seat_chips(0, 30)
            .with_seat_chips(9, 1)
            .with_dealer(2)
            .with_difficulty(Difficulty::Hard)
            .bots_only();
        assert_eq!(cfg.seats[0].chips, 30);
        assert_eq!(cfg.first_dealer, 2);
        assert_eq!(cfg.human_seat(), None);
        assert_eq!(cfg.difficulty, Difficulty::Hard);
    }

    #[test]
    fn rejects_bad_tables() {
        let one = TableConfig::default().with_seats(vec![SeatConfig::new("A", SeatKind::Bot, 10)]);
        assert_eq!(one.validate(), Err(ConfigError::SeatCount(1)));

        let mut two_humans = TableConfig::default();
        two_humans.seats[1].kind = SeatKind::Human;
        assert_eq!(two_humans.validate(), Err(ConfigError::TooManyHumans(2)));

        let blinds = TableConfig::default().with_blinds(200, 100);
        assert!(matches!(blinds.validate(), Err(ConfigError::Blinds { .. })));
        assert!(TableConfig::default().with_blinds(0, 100).validate().is_err());

        let dealer = TableConfig::default().with_dealer(3);
        assert_eq!(dealer.validate(), Err(ConfigError::Dealer(3)));
    }
}
