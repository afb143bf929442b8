//! Game state types.

use crate::card::Card;

/// Game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Created but never reset.
    Idle,
    /// Counting down to the next flip.
    Counting,
    /// Cards are face up for the display window.
    Revealing,
    /// All rounds have been played.
    Finished,
}

/// A snapshot of the observable game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    /// Current phase.
    pub phase: Phase,
    /// The player's score.
    pub player_score: u32,
    /// The computer's score.
    pub computer_score: u32,
    /// Zero-based index of the current round.
    pub round: u8,
    /// Seconds left before the next flip.
    pub countdown: u8,
    /// The player's card from the latest flip.
    pub player_card: Option<Card>,
    /// The computer's card from the latest flip.
    pub computer_card: Option<Card>,
    /// Whether cards are face up.
    pub is_revealed: bool,
}
