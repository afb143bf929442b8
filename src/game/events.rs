//! Change notifications for observers of a game.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::card::Card;
use crate::result::{FinalScore, RoundResult};

use super::state::Phase;

/// A change to the observable game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The phase changed.
    PhaseChanged(Phase),
    /// One or both scores changed.
    ScoreChanged {
        /// The player's score.
        player: u32,
        /// The computer's score.
        computer: u32,
    },
    /// The round index changed.
    RoundChanged(u8),
    /// The countdown changed.
    CountdownChanged(u8),
    /// The current cards changed.
    CardsChanged {
        /// The player's card.
        player: Option<Card>,
        /// The computer's card.
        computer: Option<Card>,
    },
    /// Cards were turned face up or face down.
    RevealChanged(bool),
    /// A flip was scored.
    RoundResolved(RoundResult),
    /// The game finished. Sent once per game.
    Finished(FinalScore),
}

/// Handle returned by [`Game::subscribe`](super::Game::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&GameEvent)>;

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, event: &GameEvent) {
        for (_, observer) in &mut self.entries {
            observer(event);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
