//! The standard deck and draw sources.

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use crate::card::{Card, DECK_SIZE, Rank, Suit};

/// The full 52-card domain draws are taken from.
///
/// Cards are never removed: every draw samples the whole deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Generates the standard deck, suit-major (clubs, diamonds, hearts,
    /// spades) and rank-minor (2 up to ace).
    #[must_use]
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);

        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(suit, rank));
            }
        }

        Self { cards }
    }

    /// Returns the cards in generation order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Looks up a card's strength by asset id (`"hearts_7"`).
    ///
    /// Ids outside the deck yield 0.
    #[must_use]
    pub fn strength_of(&self, id: &str) -> u8 {
        let found = id
            .parse::<Card>()
            .ok()
            .filter(|card| self.cards.contains(card));
        found.map_or_else(
            || {
                warn!(id, "strength lookup missed the deck");
                0
            },
            Card::strength,
        )
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

/// A source of card draws.
///
/// Each call is an independent pick from `deck`; returning `None` means no
/// card could be drawn and scores as strength 0.
pub trait CardDraw {
    /// Draws one card.
    fn draw(&mut self, deck: &[Card]) -> Option<Card>;
}

impl<F> CardDraw for F
where
    F: FnMut(&[Card]) -> Option<Card>,
{
    fn draw(&mut self, deck: &[Card]) -> Option<Card> {
        self(deck)
    }
}

/// Uniform draws with replacement from a seeded `ChaCha8` generator.
#[derive(Debug, Clone)]
pub struct RandomDraw {
    rng: ChaCha8Rng,
}

impl RandomDraw {
    /// Creates a draw source with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl CardDraw for RandomDraw {
    fn draw(&mut self, deck: &[Card]) -> Option<Card> {
        deck.choose(&mut self.rng).copied()
    }
}
