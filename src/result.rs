//! Round and game result types.

use crate::card::Card;

/// Outcome of one flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The player's card was stronger.
    PlayerWins,
    /// The computer's card was stronger.
    ComputerWins,
    /// Equal strengths; both sides score.
    Push,
}

impl RoundOutcome {
    /// Compares two strengths.
    ///
    /// ```
    /// use warcards::RoundOutcome;
    ///
    /// assert_eq!(RoundOutcome::compare(13, 2), RoundOutcome::PlayerWins);
    /// assert_eq!(RoundOutcome::compare(7, 7), RoundOutcome::Push);
    /// ```
    #[must_use]
    pub const fn compare(player_strength: u8, computer_strength: u8) -> Self {
        if player_strength > computer_strength {
            Self::PlayerWins
        } else if computer_strength > player_strength {
            Self::ComputerWins
        } else {
            Self::Push
        }
    }

    /// Returns the points `(player, computer)` this outcome awards.
    #[must_use]
    pub const fn points(self) -> (u32, u32) {
        match self {
            Self::PlayerWins => (1, 0),
            Self::ComputerWins => (0, 1),
            Self::Push => (1, 1),
        }
    }
}

/// Result of a single resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    /// Zero-based round index.
    pub round: u8,
    /// The player's card, if one could be drawn.
    pub player_card: Option<Card>,
    /// The computer's card, if one could be drawn.
    pub computer_card: Option<Card>,
    /// Strength of the player's card (0 if none).
    pub player_strength: u8,
    /// Strength of the computer's card (0 if none).
    pub computer_strength: u8,
    /// Who scored.
    pub outcome: RoundOutcome,
}

/// Winner of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// The player scored more.
    Player,
    /// The computer scored more.
    Computer,
    /// Scores are level; the house takes it.
    House,
}

impl Winner {
    /// Returns the name shown on the results screen.
    #[must_use]
    pub const fn label(self, player_name: &str) -> &str {
        match self {
            Self::Player => player_name,
            Self::Computer => "PC",
            Self::House => "The House",
        }
    }
}

/// Final scores of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    /// The player's score.
    pub player: u32,
    /// The computer's score.
    pub computer: u32,
}

impl FinalScore {
    /// Returns the winner.
    #[must_use]
    pub const fn winner(&self) -> Winner {
        if self.player > self.computer {
            Winner::Player
        } else if self.computer > self.player {
            Winner::Computer
        } else {
            Winner::House
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winner_labels() {
        let score = FinalScore {
            player: 6,
            computer: 5,
        };
        assert_eq!(score.winner().label("Ada"), "Ada");

        let score = FinalScore {
            player: 4,
            computer: 7,
        };
        assert_eq!(score.winner().label("Ada"), "PC");

        let score = FinalScore {
            player: 5,
            computer: 5,
        };
        assert_eq!(score.winner(), Winner::House);
        assert_eq!(score.winner().label("Ada"), "The House");
    }

    #[test]
    fn push_awards_both() {
        assert_eq!(RoundOutcome::compare(0, 0).points(), (1, 1));
        assert_eq!(RoundOutcome::compare(2, 14).points(), (0, 1));
    }
}
