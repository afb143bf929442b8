//! Game configuration options.

use core::time::Duration;

/// Latitude splitting the West and East sides.
pub const DEFAULT_SIDE_THRESHOLD: f64 = 34.817_549_168_324_334;

/// Configuration options for a game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use core::time::Duration;
/// use warcards::GameOptions;
///
/// let options = GameOptions::default()
///     .with_rounds(3)
///     .with_countdown_start(2)
///     .with_reveal_delay(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    /// Countdown seconds before each reveal.
    pub countdown_start: u8,
    /// Rounds per game.
    pub rounds: u8,
    /// Clock period.
    pub tick_interval: Duration,
    /// How long revealed cards stay on display before the next round.
    pub reveal_delay: Duration,
    /// Volume of the ambient loop.
    pub ambient_volume: f32,
    /// Volume of the flip effect.
    pub flip_volume: f32,
    /// Volume of the win effect.
    pub win_volume: f32,
    /// Multiplier applied to the ambient volume while an effect plays.
    pub duck_factor: f32,
    /// How long the ambient loop stays ducked after an effect starts.
    pub duck_window: Duration,
    /// Latitudes strictly above this are on the West side.
    pub side_threshold: f64,
    /// Deadline for a side request.
    pub location_timeout: Duration,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            countdown_start: 5,
            rounds: 10,
            tick_interval: Duration::from_secs(1),
            reveal_delay: Duration::from_millis(1500),
            ambient_volume: 0.05,
            flip_volume: 1.0,
            win_volume: 0.5,
            duck_factor: 0.4,
            duck_window: Duration::from_millis(1500),
            side_threshold: DEFAULT_SIDE_THRESHOLD,
            location_timeout: Duration::from_secs(15),
        }
    }
}

impl GameOptions {
    /// Sets the countdown start value.
    ///
    /// # Example
    ///
    /// ```
    /// use warcards::GameOptions;
    ///
    /// let options = GameOptions::default().with_countdown_start(3);
    /// assert_eq!(options.countdown_start, 3);
    /// ```
    #[must_use]
    pub const fn with_countdown_start(mut self, seconds: u8) -> Self {
        self.countdown_start = seconds;
        self
    }

    /// Sets the number of rounds per game.
    ///
    /// # Example
    ///
    /// ```
    /// use warcards::GameOptions;
    ///
    /// let options = GameOptions::default().with_rounds(5);
    /// assert_eq!(options.rounds, 5);
    /// ```
    #[must_use]
    pub const fn with_rounds(mut self, rounds: u8) -> Self {
        self.rounds = rounds;
        self
    }

    /// Sets the clock period.
    #[must_use]
    pub const fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Sets the post-flip display window.
    #[must_use]
    pub const fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    /// Sets the ambient loop volume.
    #[must_use]
    pub const fn with_ambient_volume(mut self, volume: f32) -> Self {
        self.ambient_volume = volume;
        self
    }

    /// Sets the flip effect volume.
    #[must_use]
    pub const fn with_flip_volume(mut self, volume: f32) -> Self {
        self.flip_volume = volume;
        self
    }

    /// Sets the win effect volume.
    #[must_use]
    pub const fn with_win_volume(mut self, volume: f32) -> Self {
        self.win_volume = volume;
        self
    }

    /// Sets the ducking multiplier and window.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use warcards::GameOptions;
    ///
    /// let options = GameOptions::default().with_ducking(0.5, Duration::from_secs(1));
    /// assert_eq!(options.duck_factor, 0.5);
    /// assert_eq!(options.duck_window, Duration::from_secs(1));
    /// ```
    #[must_use]
    pub const fn with_ducking(mut self, factor: f32, window: Duration) -> Self {
        self.duck_factor = factor;
        self.duck_window = window;
        self
    }

    /// Sets the latitude splitting West from East.
    #[must_use]
    pub const fn with_side_threshold(mut self, latitude: f64) -> Self {
        self.side_threshold = latitude;
        self
    }

    /// Sets the side request deadline.
    #[must_use]
    pub const fn with_location_timeout(mut self, timeout: Duration) -> Self {
        self.location_timeout = timeout;
        self
    }
}
