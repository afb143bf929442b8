//! Card types.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseCardError;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    /// Clubs.
    Clubs,
    /// Diamonds.
    Diamonds,
    /// Hearts.
    Hearts,
    /// Spades.
    Spades,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Self; 4] = [Self::Clubs, Self::Diamonds, Self::Hearts, Self::Spades];

    /// Returns the lowercase name used in asset ids.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clubs => "clubs",
            Self::Diamonds => "diamonds",
            Self::Hearts => "hearts",
            Self::Spades => "spades",
        }
    }
}

/// Card rank, ordered from two up to ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    /// 2.
    Two,
    /// 3.
    Three,
    /// 4.
    Four,
    /// 5.
    Five,
    /// 6.
    Six,
    /// 7.
    Seven,
    /// 8.
    Eight,
    /// 9.
    Nine,
    /// 10.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
    /// Ace (high).
    Ace,
}

impl Rank {
    /// All ranks in deck order.
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    /// Returns the comparison strength of the rank (2 through 14).
    #[must_use]
    pub const fn strength(self) -> u8 {
        self as u8 + 2
    }

    /// Returns the symbol used in asset ids (`"2"`..`"10"`, `"J"`, `"Q"`, `"K"`, `"A"`).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
        }
    }
}

/// A playing card.
///
/// Cards display and parse as their asset id, `"<suit>_<rank>"`:
///
/// ```
/// use warcards::{Card, Rank, Suit};
///
/// let card: Card = "clubs_K".parse().unwrap();
/// assert_eq!(card, Card::new(Suit::Clubs, Rank::King));
/// assert_eq!(card.to_string(), "clubs_K");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card.
    pub rank: Rank,
}

impl Card {
    /// Creates a new card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Returns the comparison strength of the card (2 through 14).
    ///
    /// Suits never break ties.
    #[must_use]
    pub const fn strength(self) -> u8 {
        self.rank.strength()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.suit.name(), self.rank.symbol())
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (suit, rank) = s.split_once('_').ok_or(ParseCardError::Malformed)?;
        let suit = Suit::ALL
            .into_iter()
            .find(|candidate| candidate.name() == suit)
            .ok_or(ParseCardError::UnknownSuit)?;
        let rank = Rank::ALL
            .into_iter()
            .find(|candidate| candidate.symbol() == rank)
            .ok_or(ParseCardError::UnknownRank)?;
        Ok(Self::new(suit, rank))
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn rank_strengths_span_two_to_fourteen() {
        assert_eq!(Rank::Two.strength(), 2);
        assert_eq!(Rank::Ten.strength(), 10);
        assert_eq!(Rank::Jack.strength(), 11);
        assert_eq!(Rank::King.strength(), 13);
        assert_eq!(Rank::Ace.strength(), 14);
    }

    #[test]
    fn asset_ids_parse_back() {
        let card = Card::new(Suit::Hearts, Rank::Ten);
        assert_eq!(card.to_string(), "hearts_10");
        assert_eq!("hearts_10".parse::<Card>(), Ok(card));
    }

    #[test]
    fn parse_rejects_bad_ids() {
        assert_eq!("hearts7".parse::<Card>(), Err(ParseCardError::Malformed));
        assert_eq!("cups_7".parse::<Card>(), Err(ParseCardError::UnknownSuit));
        assert_eq!("hearts_1".parse::<Card>(), Err(ParseCardError::UnknownRank));
        assert_eq!("back_light".parse::<Card>(), Err(ParseCardError::UnknownSuit));
    }
}
