//! CLI War example.
//!
//! Plays one full game in real time. Pass a latitude to pick a side:
//!
//! ```text
//! cargo run --example cli_war -- 40.0
//! ```

#![allow(clippy::missing_docs_in_private_items)]

use core::time::Duration;
use std::io::{self, Write};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;
use warcards::{
    AudioBackend, AudioError, Authorization, Game, GameEvent, GameOptions, Location,
    LocationProvider, LocationReply, MemoryStore, Phase, PlayerIdentity, Scheduler,
    Seat, Side, SideAssigner, SystemScheduler,
};

/// Prints cues instead of playing them.
struct TerminalAudio;

impl AudioBackend for TerminalAudio {
    fn play_ambient(&mut self, asset: &str, volume: f32) -> Result<(), AudioError> {
        println!("  [audio] looping {asset} at {volume:.2}");
        Ok(())
    }

    fn set_ambient_volume(&mut self, _volume: f32) {}

    fn stop_ambient(&mut self) {
        println!("  [audio] ambient stopped");
    }

    fn play_effect(&mut self, asset: &str, _volume: f32) -> Result<(), AudioError> {
        println!("  [audio] {asset}");
        Ok(())
    }
}

/// Answers with a fixed latitude, or not at all.
struct FixedLocation(Option<f64>);

impl LocationProvider for FixedLocation {
    fn authorization(&self) -> Authorization {
        if self.0.is_some() {
            Authorization::Authorized
        } else {
            Authorization::Denied
        }
    }

    fn request_authorization(&mut self, reply: LocationReply) {
        reply.complete(Err(warcards::LocationError::Denied));
    }

    fn request_location(&mut self, reply: LocationReply) {
        if let Some(latitude) = self.0 {
            reply.complete(Ok(Location::new(latitude, 0.0)));
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .without_time()
        .init();

    println!("War CLI example");

    let mut store = MemoryStore::new();
    let name = prompt_line("Your name (blank to keep the default): ");
    let identity = if name.is_empty() {
        PlayerIdentity::load(&store)
    } else {
        PlayerIdentity::save(&mut store, &name).unwrap_or_else(|_| PlayerIdentity::load(&store))
    };

    let latitude = std::env::args().nth(1).and_then(|arg| arg.parse().ok());
    let options = GameOptions::default();
    let scheduler = SystemScheduler::new();
    let mut provider = FixedLocation(latitude);
    let request = SideAssigner::from_options(&options).request(&mut provider, scheduler.now());
    request.check_deadline(scheduler.now());

    let side = match request.try_take() {
        Some(Ok(side)) => side,
        _ => {
            println!("Location is required to determine your side.");
            return;
        }
    };
    println!("Hi {}, you are on the {}.", identity.name(), side.label());

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut game = Game::new(options, seed, TerminalAudio, scheduler);

    let player_name = identity.name().to_string();
    game.subscribe(move |event| print_event(event, side, &player_name));

    game.reset();
    game.start();

    while game.phase() != Phase::Finished {
        thread::sleep(Duration::from_millis(50));
        game.pump();
    }

    if let Some(score) = game.final_score() {
        println!("Winner: {}", score.winner().label(identity.name()));
        println!("{}: {}", identity.name(), score.player);
        println!("PC: {}", score.computer);
    }
}

fn print_event(event: &GameEvent, side: Side, player_name: &str) {
    match event {
        GameEvent::CountdownChanged(seconds) if *seconds > 0 => {
            print!("{seconds}.. ");
            let _ = io::stdout().flush();
        }
        GameEvent::RoundResolved(result) => {
            let shown = |seat: Seat| match seat {
                Seat::Player => result
                    .player_card
                    .map_or_else(|| "?".to_string(), |card| card.to_string()),
                Seat::Computer => result
                    .computer_card
                    .map_or_else(|| "?".to_string(), |card| card.to_string()),
            };
            let [left, right] = side.seats();
            println!(
                "\nRound {}: {} vs {} ({:?})",
                result.round + 1,
                shown(left),
                shown(right),
                result.outcome
            );
        }
        GameEvent::ScoreChanged { player, computer } => {
            println!("  {player_name} {player} - {computer} PC");
        }
        GameEvent::Finished(_) => println!("Game over."),
        _ => {}
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_string()
}
