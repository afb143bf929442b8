//! Audio cues with ambient ducking.

use core::time::Duration;

use tracing::{debug, warn};

use crate::error::AudioError;
use crate::schedule::{Scheduler, Timer};

/// A logical sound the game asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Background loop.
    Ambient,
    /// Cards flipping.
    Flip,
    /// Player won the game.
    Win,
}

impl Cue {
    /// Returns the asset name the backend resolves.
    #[must_use]
    pub const fn asset_name(self) -> &'static str {
        match self {
            Self::Ambient => "bgm",
            Self::Flip => "flip",
            Self::Win => "win",
        }
    }
}

/// Playback device with an ambient loop channel and a one-shot effect channel.
pub trait AudioBackend {
    /// Starts looping `asset` on the ambient channel, replacing any current loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset cannot be found or played.
    fn play_ambient(&mut self, asset: &str, volume: f32) -> Result<(), AudioError>;

    /// Changes the volume of the current ambient loop.
    fn set_ambient_volume(&mut self, volume: f32);

    /// Stops the ambient loop.
    fn stop_ambient(&mut self);

    /// Plays `asset` once on the effect channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset cannot be found or played.
    fn play_effect(&mut self, asset: &str, volume: f32) -> Result<(), AudioError>;
}

/// Coordinates cues on an [`AudioBackend`].
///
/// Starting an effect ducks the ambient loop to `duck_factor` of its volume
/// for `duck_window`. Backend failures are logged and never returned.
#[derive(Debug)]
pub struct AudioCues<A> {
    backend: A,
    ambient_volume: f32,
    ambient_playing: bool,
    duck_factor: f32,
    duck_window: Duration,
    ducks: u64,
}

impl<A: AudioBackend> AudioCues<A> {
    /// Wraps a backend.
    #[must_use]
    pub const fn new(backend: A, duck_factor: f32, duck_window: Duration) -> Self {
        Self {
            backend,
            ambient_volume: 0.0,
            ambient_playing: false,
            duck_factor,
            duck_window,
            ducks: 0,
        }
    }

    /// Returns the backend.
    pub const fn backend(&self) -> &A {
        &self.backend
    }

    /// Returns the backend mutably.
    pub const fn backend_mut(&mut self) -> &mut A {
        &mut self.backend
    }

    /// Returns whether the ambient loop is playing.
    #[must_use]
    pub const fn is_ambient_playing(&self) -> bool {
        self.ambient_playing
    }

    /// Starts the ambient loop for `cue`.
    pub fn start_ambient(&mut self, cue: Cue, volume: f32) {
        match self.backend.play_ambient(cue.asset_name(), volume) {
            Ok(()) => {
                self.ambient_volume = volume;
                self.ambient_playing = true;
            }
            Err(err) => {
                warn!(asset = cue.asset_name(), error = %err, "ambient cue failed");
            }
        }
    }

    /// Stops the ambient loop.
    pub fn stop_ambient(&mut self) {
        self.backend.stop_ambient();
        self.ambient_playing = false;
    }

    /// Plays `cue` once and ducks the ambient loop.
    pub fn play_effect<S: Scheduler>(&mut self, cue: Cue, volume: f32, scheduler: &mut S) {
        if let Err(err) = self.backend.play_effect(cue.asset_name(), volume) {
            warn!(asset = cue.asset_name(), error = %err, "effect cue failed");
            return;
        }

        self.ducks += 1;
        if self.ambient_playing {
            self.backend
                .set_ambient_volume(self.ambient_volume * self.duck_factor);
        }
        scheduler.schedule(self.duck_window, Timer::RestoreAmbient { duck: self.ducks });
    }

    /// Ends the ducking window of `duck`.
    ///
    /// Only the most recent duck restores the volume, and only while the loop
    /// is still playing.
    pub fn restore(&mut self, duck: u64) {
        if duck != self.ducks || !self.ambient_playing {
            debug!(duck, latest = self.ducks, "skipping ambient restore");
            return;
        }
        self.backend.set_ambient_volume(self.ambient_volume);
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::float_cmp, reason = "volumes are set, not computed")]

    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use super::*;
    use crate::schedule::ManualScheduler;

    #[derive(Debug, Default)]
    struct Log {
        calls: Vec<String>,
        volume: f32,
        missing: Option<&'static str>,
    }

    impl AudioBackend for Log {
        fn play_ambient(&mut self, asset: &str, volume: f32) -> Result<(), AudioError> {
            if self.missing == Some(asset) {
                return Err(AudioError::AssetNotFound(asset.to_string()));
            }
            self.volume = volume;
            self.calls.push(alloc::format!("ambient {asset}"));
            Ok(())
        }

        fn set_ambient_volume(&mut self, volume: f32) {
            self.volume = volume;
        }

        fn stop_ambient(&mut self) {
            self.calls.push("stop".to_string());
        }

        fn play_effect(&mut self, asset: &str, _volume: f32) -> Result<(), AudioError> {
            if self.missing == Some(asset) {
                return Err(AudioError::AssetNotFound(asset.to_string()));
            }
            self.calls.push(alloc::format!("effect {asset}"));
            Ok(())
        }
    }

    fn restore_due(cues: &mut AudioCues<Log>, scheduler: &mut ManualScheduler) {
        while let Some(Timer::RestoreAmbient { duck }) = scheduler.pop_due() {
            cues.restore(duck);
        }
    }

    #[test]
    fn effect_ducks_then_restores() {
        let mut scheduler = ManualScheduler::new();
        let mut cues = AudioCues::new(Log::default(), 0.4, Duration::from_millis(1500));
        cues.start_ambient(Cue::Ambient, 0.5);
        cues.play_effect(Cue::Flip, 1.0, &mut scheduler);
        assert_eq!(cues.backend().volume, 0.2);

        scheduler.advance_to(Duration::from_millis(1499));
        restore_due(&mut cues, &mut scheduler);
        assert_eq!(cues.backend().volume, 0.2);

        scheduler.advance_to(Duration::from_millis(1500));
        restore_due(&mut cues, &mut scheduler);
        assert_eq!(cues.backend().volume, 0.5);
    }

    #[test]
    fn overlapping_effects_restore_once_at_the_end() {
        let mut scheduler = ManualScheduler::new();
        let mut cues = AudioCues::new(Log::default(), 0.4, Duration::from_millis(1500));
        cues.start_ambient(Cue::Ambient, 0.5);
        cues.play_effect(Cue::Flip, 1.0, &mut scheduler);
        scheduler.advance_to(Duration::from_secs(1));
        cues.play_effect(Cue::Win, 1.0, &mut scheduler);

        scheduler.advance_to(Duration::from_millis(1500));
        restore_due(&mut cues, &mut scheduler);
        assert_eq!(cues.backend().volume, 0.2);

        scheduler.advance_to(Duration::from_millis(2500));
        restore_due(&mut cues, &mut scheduler);
        assert_eq!(cues.backend().volume, 0.5);
    }

    #[test]
    fn missing_asset_is_swallowed() {
        let mut scheduler = ManualScheduler::new();
        let log = Log {
            missing: Some("flip"),
            ..Log::default()
        };
        let mut cues = AudioCues::new(log, 0.4, Duration::from_millis(1500));
        cues.start_ambient(Cue::Ambient, 0.5);
        cues.play_effect(Cue::Flip, 1.0, &mut scheduler);

        assert_eq!(cues.backend().volume, 0.5);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(cues.backend().calls, ["ambient bgm"]);
    }

    #[test]
    fn missing_ambient_leaves_loop_stopped() {
        let log = Log {
            missing: Some("bgm"),
            ..Log::default()
        };
        let mut cues = AudioCues::new(log, 0.4, Duration::from_millis(1500));
        cues.start_ambient(Cue::Ambient, 0.5);
        assert!(!cues.is_ambient_playing());
    }

    #[test]
    fn restore_after_stop_is_skipped() {
        let mut scheduler = ManualScheduler::new();
        let mut cues = AudioCues::new(Log::default(), 0.4, Duration::from_millis(1500));
        cues.start_ambient(Cue::Ambient, 0.5);
        cues.play_effect(Cue::Win, 0.5, &mut scheduler);
        cues.stop_ambient();

        scheduler.advance_to(Duration::from_secs(2));
        restore_due(&mut cues, &mut scheduler);
        assert_eq!(cues.backend().volume, 0.2);
        assert_eq!(cues.backend().calls, ["ambient bgm", "effect win", "stop"]);
    }
}
