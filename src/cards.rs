use std::fmt;
use std::str::FromStr;

/// Card ranks from Two (low) to Ace (high). The discriminant is the numeric rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
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
        Rank::Ace,
    ];

    /// Numeric rank in `2..=14`.
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Rank> {
        Rank::ALL.iter().copied().find(|r| r.value() == value)
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for Rank {
    type Error = CardParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let value = match c.to_ascii_uppercase() {
            'T' => 10,
            'J' => 11,
            'Q' => 12,
            'K' => 13,
            'A' => 14,
            d => d.to_digit(10).map(|v| v as u8).unwrap_or(0),
        };
        Rank::from_value(value).ok_or_else(|| CardParseError::Rank(c.to_string()))
    }
}

/// Four suits, indexed `0..=3` as spades, hearts, diamonds, clubs.
/// The index has no hand-strength meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Suit> {
        Suit::ALL.get(index as usize).copied()
    }

    pub const fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for Suit {
    type Error = CardParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            's' => Ok(Suit::Spades),
            'h' => Ok(Suit::Hearts),
            'd' => Ok(Suit::Diamonds),
            'c' => Ok(Suit::Clubs),
            _ => Err(CardParseError::Suit(c.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error("invalid rank: '{0}'")]
    Rank(String),
    #[error("invalid suit: '{0}'")]
    Suit(String),
    #[error("card out of range: rank {rank}, suit {suit}")]
    OutOfRange { rank: u8, suit: u8 },
}

/// One card of the 52.
///
/// ```
/// use holdem_engine::cards::{Card, Rank, Suit};
///
/// let queen = Card::new(Rank::Queen, Suit::Hearts);
/// assert_eq!(queen.to_string(), "Qh");
/// assert_eq!(Card::from_parts(12, 1).unwrap(), queen);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Build a card from its numeric rank (`2..=14`) and suit index (`0..=3`).
    pub fn from_parts(rank: u8, suit: u8) -> Result<Self, CardParseError> {
        match (Rank::from_value(rank), Suit::from_index(suit)) {
            (Some(r), Some(s)) => Ok(Card::new(r, s)),
            _ => Err(CardParseError::OutOfRange { rank, suit }),
        }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let chars: Vec<char> = t.chars().collect();
        let (rank, suit) = match chars.as_slice() {
            [r, s] => (Rank::try_from(*r)?, *s),
            ['1', '0', s] => (Rank::Ten, *s),
            _ => return Err(CardParseError::Invalid(s.to_string())),
        };
        Ok(Card::new(rank, Suit::try_from(suit)?))
    }
}

/// Read a board or hand written like `"Jc 10c, 9c"`.
///
/// ```
/// use holdem_engine::cards::{parse_cards, Card, Rank, Suit};
///
/// let board = parse_cards("Jc 10c, 9c").unwrap();
/// assert_eq!(board.len(), 3);
/// assert_eq!(board[1], Card::new(Rank::Ten, Suit::Clubs));
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

/// Render cards as a space separated list, e.g. `"As Kd"`.
pub fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(Card::to_string).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_values_round_trip() {
        assert_eq!(Rank::from_value(14), Some(Rank::Ace));
        assert_eq!(Rank::from_value(2), Some(Rank::Two));
        assert_eq!(Rank::from_value(1), None);
        assert_eq!(Rank::from_value(15), None);
    }

    #[test]
    fn suit_indices_follow_table_order() {
        assert_eq!(Suit::Spades.index(), 0);
        assert_eq!(Suit::Clubs.index(), 3);
        assert_eq!(Suit::from_index(1), Some(Suit::Hearts));
        assert_eq!(Suit::from_index(4), None);
    }

    #[test]
    fn parses_both_ten_spellings() {
        let seven = Card::new(Rank::Seven, Suit::Clubs);
        assert_eq!(seven.to_string(), "7c");
        assert_eq!("7C".parse::<Card>().unwrap(), seven);
        assert_eq!(Card::from_str(" 10d ").unwrap(), Card::new(Rank::Ten, Suit::Diamonds));
        assert_eq!(Card::from_str("td").unwrap(), Card::new(Rank::Ten, Suit::Diamonds));
        assert!(matches!(Card::from_str("1s"), Err(CardParseError::Rank(_))));
        assert!(matches!(Card::from_str("Ax"), Err(CardParseError::Suit(_))));
        assert!(matches!(Card::from_str("Asd"), Err(CardParseError::Invalid(_))));
    }

    #[test]
    fn from_parts_rejects_out_of_range() {
        assert_eq!(Card::from_parts(10, 3).unwrap(), Card::new(Rank::Ten, Suit::Clubs));
        assert!(matches!(
            Card::from_parts(15, 0),
            Err(CardParseError::OutOfRange { rank: 15, suit: 0 })
        ));
        assert!(Card::from_parts(5, 4).is_err());
    }

    #[test]
    fn format_cards_joins_with_spaces() {
        let xs = parse_cards("As Kd").unwrap();
        assert_eq!(format_cards(&xs), "As Kd");
        assert_eq!(format_cards(&[]), "");
    }
}
