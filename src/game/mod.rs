//! Game engine and state management.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::time::Duration;

use tracing::{debug, trace};

use crate::audio::{AudioBackend, AudioCues, Cue};
use crate::card::Card;
use crate::clock::{RoundClock, TickOutcome};
use crate::deck::{CardDraw, Deck, RandomDraw};
use crate::options::GameOptions;
use crate::result::{FinalScore, RoundResult};
use crate::schedule::{ManualScheduler, Scheduler, Timer};
use crate::side::{LocationProvider, SideAssigner, SideRequest};

mod events;
mod flip;
pub mod state;

pub use events::{GameEvent, SubscriptionId};
pub use state::{GameState, Phase};

use events::Observers;

/// A War-style game against the computer.
///
/// Each round counts down, then both sides draw a card from the full deck
/// (with replacement) and the stronger card scores. The game owns its
/// [`Scheduler`], which it drains through [`Game::pump`] (or
/// [`Game::advance`] on virtual time), and its audio cues. All mutation
/// happens through `&mut self` on a single control thread.
pub struct Game<A, S> {
    options: GameOptions,
    deck: Deck,
    draws: Box<dyn CardDraw>,
    scheduler: S,
    audio: AudioCues<A>,
    clock: RoundClock,
    observers: Observers,
    phase: Phase,
    player_score: u32,
    computer_score: u32,
    round: u8,
    player_card: Option<Card>,
    computer_card: Option<Card>,
    revealed: bool,
    paused: bool,
    /// The ambient loop was stopped by a pause and not yet restarted.
    ambient_muted: bool,
    /// Bumped on every reset; timers armed under an older value are stale.
    generation: u64,
    history: Vec<RoundResult>,
    side_requests: Vec<(u64, SideRequest)>,
    next_side_request: u64,
}

impl<A: AudioBackend, S: Scheduler> Game<A, S> {
    /// Creates an idle game drawing cards from a generator seeded with `seed`.
    ///
    /// Zero `rounds` or `countdown_start` are raised to 1.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use warcards::{AudioBackend, AudioError};
    /// # struct Silent;
    /// # impl AudioBackend for Silent {
    /// #     fn play_ambient(&mut self, _: &str, _: f32) -> Result<(), AudioError> { Ok(()) }
    /// #     fn set_ambient_volume(&mut self, _: f32) {}
    /// #     fn stop_ambient(&mut self) {}
    /// #     fn play_effect(&mut self, _: &str, _: f32) -> Result<(), AudioError> { Ok(()) }
    /// # }
    /// use warcards::{Game, GameOptions, ManualScheduler};
    ///
    /// let mut game = Game::new(GameOptions::default(), 42, Silent, ManualScheduler::new());
    /// game.reset();
    /// game.start();
    /// ```
    #[must_use]
    pub fn new(mut options: GameOptions, seed: u64, audio: A, scheduler: S) -> Self {
        options.rounds = options.rounds.max(1);
        options.countdown_start = options.countdown_start.max(1);

        let clock = RoundClock::new(
            options.countdown_start,
            options.tick_interval,
            options.rounds,
        );
        let audio = AudioCues::new(audio, options.duck_factor, options.duck_window);

        Self {
            deck: Deck::standard(),
            draws: Box::new(RandomDraw::new(seed)),
            scheduler,
            audio,
            clock,
            observers: Observers::default(),
            phase: Phase::Idle,
            player_score: 0,
            computer_score: 0,
            round: 0,
            player_card: None,
            computer_card: None,
            revealed: false,
            paused: false,
            ambient_muted: false,
            generation: 0,
            history: Vec::new(),
            side_requests: Vec::new(),
            next_side_request: 0,
            options,
        }
    }

    /// Replaces the draw source.
    #[must_use]
    pub fn with_draws<D: CardDraw + 'static>(mut self, draws: D) -> Self {
        self.draws = Box::new(draws);
        self
    }

    /// Starts a new game.
    ///
    /// Stops the clock, zeroes scores and the round, rewinds the countdown,
    /// clears the cards and starts the ambient loop. Continuations scheduled
    /// by the previous game are discarded when they fire. The clock is not
    /// started; call [`Game::start`].
    pub fn reset(&mut self) {
        self.clock.stop(&mut self.scheduler);
        self.generation += 1;

        self.phase = Phase::Counting;
        self.player_score = 0;
        self.computer_score = 0;
        self.round = 0;
        self.clock.rewind();
        self.player_card = None;
        self.computer_card = None;
        self.revealed = false;
        self.paused = false;
        self.ambient_muted = false;
        self.history.clear();

        debug!(generation = self.generation, "game reset");
        self.audio
            .start_ambient(Cue::Ambient, self.options.ambient_volume);

        self.emit(GameEvent::PhaseChanged(Phase::Counting));
        self.emit_scores();
        self.emit(GameEvent::RoundChanged(0));
        self.emit(GameEvent::CountdownChanged(self.clock.countdown()));
        self.emit_cards();
        self.emit(GameEvent::RevealChanged(false));
    }

    /// Starts the countdown.
    ///
    /// Does nothing unless the game is counting, unpaused and the clock is
    /// stopped. Returns whether the clock was started.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Counting || self.paused {
            return false;
        }
        self.clock
            .start(self.round, self.generation, &mut self.scheduler)
    }

    /// Stops the countdown. Idempotent.
    pub fn stop(&mut self) {
        self.clock.stop(&mut self.scheduler);
    }

    /// Pauses for backgrounding: stops the countdown and the ambient loop.
    ///
    /// A display window that ends while paused prepares the next round but
    /// leaves the clock stopped.
    pub fn pause(&mut self) {
        self.stop();
        self.audio.stop_ambient();
        self.paused = true;
        self.ambient_muted = true;
    }

    /// Resumes after [`Game::pause`].
    ///
    /// Restarts the countdown and the ambient loop only when cards are not
    /// revealed and time remains on the countdown. Resuming during the
    /// display window defers both to the start of the next round.
    pub fn resume(&mut self) {
        self.paused = false;
        if self.phase != Phase::Counting || self.revealed || self.clock.countdown() == 0 {
            return;
        }
        self.start();
        self.unmute_ambient();
    }

    /// Restarts the ambient loop if a pause stopped it.
    fn unmute_ambient(&mut self) {
        if !self.ambient_muted {
            return;
        }
        self.ambient_muted = false;
        self.audio
            .start_ambient(Cue::Ambient, self.options.ambient_volume);
    }

    /// Requests the player's side using the game's threshold and location
    /// timeout.
    ///
    /// The deadline runs on the game's scheduler, so a provider that never
    /// answers times the request out on the pump that reaches it.
    pub fn request_side<P>(&mut self, provider: &mut P) -> SideRequest
    where
        P: LocationProvider + ?Sized,
    {
        let request =
            SideAssigner::from_options(&self.options).request(provider, self.scheduler.now());
        if request.is_pending() {
            let id = self.next_side_request;
            self.next_side_request += 1;
            self.scheduler.schedule(
                self.options.location_timeout,
                Timer::SideDeadline { request: id },
            );
            self.side_requests.push((id, request.watch()));
        }
        request
    }

    fn expire_side_request(&mut self, id: u64) {
        let Some(index) = self.side_requests.iter().position(|(key, _)| *key == id) else {
            return;
        };
        let (_, request) = self.side_requests.swap_remove(index);
        if request.check_deadline(self.scheduler.now()) {
            debug!(request = id, "side request timed out");
        }
    }

    /// Fires every timer that is due.
    pub fn pump(&mut self) {
        while let Some(timer) = self.scheduler.pop_due() {
            self.dispatch(timer);
        }
    }

    fn dispatch(&mut self, timer: Timer) {
        match timer {
            Timer::Tick { generation } => self.on_tick(generation),
            Timer::RevealEnd { generation } => self.end_reveal(generation),
            Timer::RestoreAmbient { duck } => self.audio.restore(duck),
            Timer::SideDeadline { request } => self.expire_side_request(request),
        }
    }

    fn is_stale(&self, generation: u64) -> bool {
        if generation == self.generation {
            return false;
        }
        trace!(
            generation,
            current = self.generation,
            "discarding stale continuation"
        );
        true
    }

    fn on_tick(&mut self, generation: u64) {
        if self.is_stale(generation) {
            return;
        }
        match self.clock.tick(generation, &mut self.scheduler) {
            TickOutcome::Counted(countdown) => self.emit(GameEvent::CountdownChanged(countdown)),
            TickOutcome::Expired => self.flip_cards(),
        }
    }

    /// Subscribes to state changes.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Removes a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn emit(&mut self, event: GameEvent) {
        self.observers.emit(&event);
    }

    fn emit_scores(&mut self) {
        self.emit(GameEvent::ScoreChanged {
            player: self.player_score,
            computer: self.computer_score,
        });
    }

    fn emit_cards(&mut self) {
        self.emit(GameEvent::CardsChanged {
            player: self.player_card,
            computer: self.computer_card,
        });
    }

    /// Returns a snapshot of the observable state.
    pub fn state(&self) -> GameState {
        GameState {
            phase: self.phase,
            player_score: self.player_score,
            computer_score: self.computer_score,
            round: self.round,
            countdown: self.clock.countdown(),
            player_card: self.player_card,
            computer_card: self.computer_card,
            is_revealed: self.revealed,
        }
    }

    /// Returns the current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the player's score.
    pub const fn player_score(&self) -> u32 {
        self.player_score
    }

    /// Returns the computer's score.
    pub const fn computer_score(&self) -> u32 {
        self.computer_score
    }

    /// Returns the zero-based round index.
    pub const fn round(&self) -> u8 {
        self.round
    }

    /// Returns the seconds left before the next flip.
    pub const fn countdown(&self) -> u8 {
        self.clock.countdown()
    }

    /// Returns whether cards are face up.
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Returns whether the game is paused.
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns whether the countdown is ticking.
    pub const fn is_counting_down(&self) -> bool {
        self.clock.is_running()
    }

    /// Returns the rounds resolved so far in this game.
    pub fn history(&self) -> &[RoundResult] {
        &self.history
    }

    /// Returns the final score once the game has finished.
    pub const fn final_score(&self) -> Option<FinalScore> {
        match self.phase {
            Phase::Finished => Some(self.score()),
            _ => None,
        }
    }

    const fn score(&self) -> FinalScore {
        FinalScore {
            player: self.player_score,
            computer: self.computer_score,
        }
    }

    /// Returns the game options.
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the deck draws are taken from.
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the audio cue coordinator.
    pub const fn audio(&self) -> &AudioCues<A> {
        &self.audio
    }

    /// Returns the scheduler.
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<A: AudioBackend> Game<A, ManualScheduler> {
    /// Moves virtual time forward by `by`, firing timers in deadline order.
    pub fn advance(&mut self, by: Duration) {
        let target = self.scheduler.now() + by;
        while let Some(due) = self
            .scheduler
            .next_deadline()
            .filter(|due| *due <= target)
        {
            self.scheduler.advance_to(due);
            self.pump();
        }
        self.scheduler.advance_to(target);
        self.pump();
    }
}
