//! A War-style card comparison game engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs a fixed number of rounds
//! against a computer opponent: a countdown per round, an independent draw
//! for each side, scoring, a display window, and a finish notification. Time
//! comes from an injectable [`Scheduler`]; audio and location are external
//! collaborators behind the [`AudioBackend`] and [`LocationProvider`] traits.
//!
//! # Example
//!
//! ```no_run
//! # use warcards::{AudioBackend, AudioError};
//! # struct Silent;
//! # impl AudioBackend for Silent {
//! #     fn play_ambient(&mut self, _: &str, _: f32) -> Result<(), AudioError> { Ok(()) }
//! #     fn set_ambient_volume(&mut self, _: f32) {}
//! #     fn stop_ambient(&mut self) {}
//! #     fn play_effect(&mut self, _: &str, _: f32) -> Result<(), AudioError> { Ok(()) }
//! # }
//! use core::time::Duration;
//! use warcards::{Game, GameOptions, ManualScheduler};
//!
//! let mut game = Game::new(GameOptions::default(), 42, Silent, ManualScheduler::new());
//! game.reset();
//! game.start();
//! game.advance(Duration::from_secs(70));
//! let _ = game.final_score();
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod audio;
pub mod card;
pub mod clock;
pub mod deck;
pub mod error;
pub mod game;
pub mod identity;
pub mod options;
pub mod result;
pub mod schedule;
pub mod side;
mod sync;

// Re-export main types
pub use audio::{AudioBackend, AudioCues, Cue};
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use clock::{RoundClock, TickOutcome};
pub use deck::{CardDraw, Deck, RandomDraw};
pub use error::{AudioError, LocationError, ParseCardError, StoreError};
pub use game::{Game, GameEvent, GameState, Phase, SubscriptionId};
pub use identity::{DEFAULT_PLAYER_NAME, KeyValueStore, MemoryStore, PLAYER_NAME_KEY, PlayerIdentity};
pub use options::{DEFAULT_SIDE_THRESHOLD, GameOptions};
pub use result::{FinalScore, RoundOutcome, RoundResult, Winner};
#[cfg(feature = "std")]
pub use schedule::SystemScheduler;
pub use schedule::{ManualScheduler, Scheduler, Timer, TimerId, TimerQueue};
pub use side::{Authorization, Location, LocationProvider, LocationReply, Seat, Side, SideAssigner, SideRequest};
