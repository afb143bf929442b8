//! Shared test doubles.

#![allow(dead_code)]

use alloc::collections::VecDeque;
use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};
use warcards::{
    AudioBackend, AudioError, Authorization, Card, Game, GameOptions, Location, LocationProvider,
    LocationReply, ManualScheduler,
};

static INIT: Once = Once::new();

/// Installs a test subscriber. Level comes from `TEST_LOG`, then `RUST_LOG`,
/// then defaults to `warn`.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Audio backend that records every call.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub effects: Vec<String>,
    pub ambient_starts: usize,
    pub ambient_stops: usize,
    pub ambient_volume: f32,
    pub playing: bool,
    pub missing: Vec<&'static str>,
}

impl RecordingAudio {
    pub fn effect_count(&self, asset: &str) -> usize {
        self.effects.iter().filter(|name| *name == asset).count()
    }
}

impl AudioBackend for RecordingAudio {
    fn play_ambient(&mut self, asset: &str, volume: f32) -> Result<(), AudioError> {
        if self.missing.iter().any(|name| *name == asset) {
            return Err(AudioError::AssetNotFound(asset.to_string()));
        }
        self.ambient_starts += 1;
        self.ambient_volume = volume;
        self.playing = true;
        Ok(())
    }

    fn set_ambient_volume(&mut self, volume: f32) {
        self.ambient_volume = volume;
    }

    fn stop_ambient(&mut self) {
        self.ambient_stops += 1;
        self.playing = false;
    }

    fn play_effect(&mut self, asset: &str, _volume: f32) -> Result<(), AudioError> {
        if self.missing.iter().any(|name| *name == asset) {
            return Err(AudioError::AssetNotFound(asset.to_string()));
        }
        self.effects.push(asset.to_string());
        Ok(())
    }
}

pub type TestGame = Game<RecordingAudio, ManualScheduler>;

pub fn card(id: &str) -> Card {
    id.parse().expect("valid card id")
}

/// Draws `(player, computer)` pairs in order, then falls back to the first card.
pub fn scripted(pairs: &[(&str, &str)]) -> impl FnMut(&[Card]) -> Option<Card> + use<> {
    let mut queue: VecDeque<Card> = pairs
        .iter()
        .flat_map(|(player, computer)| [card(player), card(computer)])
        .collect();
    move |deck: &[Card]| queue.pop_front().or_else(|| deck.first().copied())
}

pub fn game(options: GameOptions) -> TestGame {
    init_logging();
    Game::new(options, 42, RecordingAudio::default(), ManualScheduler::new())
}

pub fn scripted_game(pairs: &[(&str, &str)]) -> TestGame {
    game(GameOptions::default()).with_draws(scripted(pairs))
}

/// Location provider with a fixed permission state that answers on demand.
#[derive(Default)]
pub struct FakeLocation {
    pub authorization: Option<Authorization>,
    pub prompts: usize,
    pub pending: Option<LocationReply>,
    pub fix: Option<Location>,
}

impl FakeLocation {
    pub fn authorized_at(latitude: f64) -> Self {
        Self {
            authorization: Some(Authorization::Authorized),
            fix: Some(Location::new(latitude, 0.0)),
            ..Self::default()
        }
    }

    pub fn with_authorization(authorization: Authorization) -> Self {
        Self {
            authorization: Some(authorization),
            ..Self::default()
        }
    }
}

impl LocationProvider for FakeLocation {
    fn authorization(&self) -> Authorization {
        self.authorization.unwrap_or(Authorization::NotDetermined)
    }

    fn request_authorization(&mut self, reply: LocationReply) {
        self.prompts += 1;
        self.pending = Some(reply);
    }

    fn request_location(&mut self, reply: LocationReply) {
        match self.fix {
            Some(fix) => {
                reply.complete(Ok(fix));
            }
            None => self.pending = Some(reply),
        }
    }
}
