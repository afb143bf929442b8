use tracing::{debug, info, warn};

use crate::audio::{AudioBackend, Cue};
use crate::card::Card;
use crate::result::{RoundOutcome, RoundResult};
use crate::schedule::{Scheduler, Timer};

use super::{Game, GameEvent, Phase};

fn strength(card: Option<Card>) -> u8 {
    card.map_or_else(
        || {
            warn!("no card drawn, scoring strength 0");
            0
        },
        Card::strength,
    )
}

impl<A: AudioBackend, S: Scheduler> Game<A, S> {
    /// Draws and scores one card per side, then schedules the end of the
    /// display window.
    ///
    /// The round index advances immediately unless this was the final round.
    pub(super) fn flip_cards(&mut self) {
        self.phase = Phase::Revealing;
        self.revealed = true;
        self.clock.clear();

        let player_card = self.draws.draw(self.deck.cards());
        let computer_card = self.draws.draw(self.deck.cards());
        self.player_card = player_card;
        self.computer_card = computer_card;

        self.audio
            .play_effect(Cue::Flip, self.options.flip_volume, &mut self.scheduler);

        let player_strength = strength(player_card);
        let computer_strength = strength(computer_card);
        let outcome = RoundOutcome::compare(player_strength, computer_strength);
        let (player_points, computer_points) = outcome.points();
        self.player_score += player_points;
        self.computer_score += computer_points;

        let result = RoundResult {
            round: self.round,
            player_card,
            computer_card,
            player_strength,
            computer_strength,
            outcome,
        };
        self.history.push(result);

        debug!(
            round = self.round,
            player = player_strength,
            computer = computer_strength,
            ?outcome,
            "cards flipped"
        );

        self.emit(GameEvent::PhaseChanged(Phase::Revealing));
        self.emit(GameEvent::RevealChanged(true));
        self.emit(GameEvent::CountdownChanged(0));
        self.emit_cards();
        self.emit_scores();
        self.emit(GameEvent::RoundResolved(result));

        if !self.is_final_flip() {
            self.round += 1;
            self.emit(GameEvent::RoundChanged(self.round));
        }

        self.scheduler.schedule(
            self.options.reveal_delay,
            Timer::RevealEnd {
                generation: self.generation,
            },
        );
    }

    fn is_final_flip(&self) -> bool {
        self.history.len() >= usize::from(self.options.rounds)
    }

    /// Ends the display window: either rearms the clock for the next round
    /// or finishes the game.
    pub(super) fn end_reveal(&mut self, generation: u64) {
        if self.is_stale(generation) || self.phase != Phase::Revealing {
            return;
        }

        self.revealed = false;
        self.emit(GameEvent::RevealChanged(false));

        if self.is_final_flip() {
            self.finish();
            return;
        }

        self.phase = Phase::Counting;
        self.clock.rewind();
        self.emit(GameEvent::PhaseChanged(Phase::Counting));
        self.emit(GameEvent::CountdownChanged(self.clock.countdown()));
        if !self.paused {
            self.unmute_ambient();
        }
        self.start();
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        let score = self.score();

        if score.player > score.computer {
            self.audio
                .play_effect(Cue::Win, self.options.win_volume, &mut self.scheduler);
        }
        self.audio.stop_ambient();

        info!(
            player = score.player,
            computer = score.computer,
            winner = ?score.winner(),
            "game finished"
        );

        self.emit(GameEvent::PhaseChanged(Phase::Finished));
        self.emit(GameEvent::Finished(score));
    }
}
