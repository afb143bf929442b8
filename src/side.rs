//! Side assignment from a one-shot location fix.
//!
//! A [`SideAssigner`] asks a [`LocationProvider`] for a fix and hands back a
//! [`SideRequest`], a future resolving to exactly one of a [`Side`] or a
//! [`LocationError`]. The provider answers through the [`LocationReply`] it
//! was given, possibly much later (for instance after a permission prompt).
//! The request carries an explicit deadline so it cannot stay pending
//! forever, and it can be cancelled.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use core::time::Duration;

use tracing::{info, warn};

use crate::error::LocationError;
use crate::options::GameOptions;
use crate::sync::Shared;

/// Which half of the table the player sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// North of the threshold latitude.
    West,
    /// At or south of the threshold latitude.
    East,
}

/// A seat at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    /// The human player.
    Player,
    /// The computer opponent.
    Computer,
}

impl Side {
    /// Derives the side from a latitude.
    ///
    /// ```
    /// use warcards::Side;
    ///
    /// assert_eq!(Side::from_latitude(40.0, 34.8), Side::West);
    /// assert_eq!(Side::from_latitude(30.0, 34.8), Side::East);
    /// ```
    #[must_use]
    pub fn from_latitude(latitude: f64, threshold: f64) -> Self {
        if latitude > threshold {
            Self::West
        } else {
            Self::East
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::West => "West Side",
            Self::East => "East Side",
        }
    }

    /// Returns the seats from left to right.
    ///
    /// West puts the player on the left; East puts the computer there.
    #[must_use]
    pub const fn seats(self) -> [Seat; 2] {
        match self {
            Self::West => [Seat::Player, Seat::Computer],
            Self::East => [Seat::Computer, Seat::Player],
        }
    }
}

/// A location fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Location {
    /// Creates a location.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Location permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// The user has not been asked yet.
    NotDetermined,
    /// The user refused.
    Denied,
    /// Access is blocked by policy.
    Restricted,
    /// Access is granted.
    Authorized,
}

/// A platform positioning service.
pub trait LocationProvider {
    /// Returns the current permission state.
    fn authorization(&self) -> Authorization;

    /// Prompts for permission.
    ///
    /// The provider keeps `reply` and answers it once the user responds: with
    /// a fix if access was granted, or an error otherwise.
    fn request_authorization(&mut self, reply: LocationReply);

    /// Requests a single fix, answering through `reply`.
    fn request_location(&mut self, reply: LocationReply);
}

struct Slot {
    threshold: f64,
    outcome: Option<Result<Side, LocationError>>,
    waker: Option<Waker>,
}

impl Slot {
    /// Records the first outcome. Returns the waker to notify, if any.
    fn resolve(&mut self, result: Result<Location, LocationError>) -> Option<Option<Waker>> {
        if self.outcome.is_some() {
            return None;
        }

        let outcome = result.map(|location| Side::from_latitude(location.latitude, self.threshold));
        match outcome {
            Ok(side) => info!(side = side.label(), "side assigned"),
            Err(err) => warn!(error = %err, "side assignment failed"),
        }
        self.outcome = Some(outcome);
        Some(self.waker.take())
    }
}

fn resolve(slot: &Shared<Slot>, result: Result<Location, LocationError>) -> bool {
    match slot.with(|slot| slot.resolve(result)) {
        Some(waker) => {
            if let Some(waker) = waker {
                waker.wake();
            }
            true
        }
        None => false,
    }
}

/// One-shot handle a [`LocationProvider`] answers a request through.
pub struct LocationReply {
    slot: Shared<Slot>,
}

impl LocationReply {
    /// Delivers the fix or failure.
    ///
    /// Returns `false` if the request had already resolved (timed out or
    /// cancelled), in which case the result is dropped.
    pub fn complete(self, result: Result<Location, LocationError>) -> bool {
        resolve(&self.slot, result)
    }

    /// Returns whether the request is still waiting for an answer.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot.with(|slot| slot.outcome.is_none())
    }
}

/// A pending side assignment.
///
/// Resolves exactly once. Poll it as a future, or call
/// [`SideRequest::try_take`] from an event loop.
pub struct SideRequest {
    slot: Shared<Slot>,
    deadline: Duration,
}

impl SideRequest {
    /// Returns the time after which the request times out.
    #[must_use]
    pub const fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Times the request out if `now` has reached the deadline.
    ///
    /// Returns whether this call resolved the request. Requests started
    /// through `Game::request_side` are timed out by the game's scheduler;
    /// others must be checked by the caller.
    pub fn check_deadline(&self, now: Duration) -> bool {
        now >= self.deadline && resolve(&self.slot, Err(LocationError::Timeout))
    }

    /// Returns whether the request is still waiting for an answer.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot.with(|slot| slot.outcome.is_none())
    }

    /// Second handle on the same request, kept by whoever enforces the deadline.
    pub(crate) fn watch(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            deadline: self.deadline,
        }
    }

    /// Cancels the request if it is still pending.
    pub fn cancel(&self) -> bool {
        resolve(&self.slot, Err(LocationError::Cancelled))
    }

    /// Returns the outcome if the request has resolved.
    #[must_use]
    pub fn try_take(&self) -> Option<Result<Side, LocationError>> {
        self.slot.with(|slot| slot.outcome)
    }
}

/// Resolves once the provider answers, the request is cancelled, or the
/// deadline is enforced. Nothing enforces the deadline for a bare future;
/// start it with `Game::request_side` or call [`SideRequest::check_deadline`].
impl Future for SideRequest {
    type Output = Result<Side, LocationError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.slot.with(|slot| match slot.outcome {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                slot.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        })
    }
}

/// Starts side requests against a location provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideAssigner {
    threshold: f64,
    timeout: Duration,
}

impl SideAssigner {
    /// Creates an assigner splitting sides at `threshold` and giving up after `timeout`.
    #[must_use]
    pub const fn new(threshold: f64, timeout: Duration) -> Self {
        Self { threshold, timeout }
    }

    /// Creates an assigner from game options.
    #[must_use]
    pub const fn from_options(options: &GameOptions) -> Self {
        Self::new(options.side_threshold, options.location_timeout)
    }

    /// Requests a side, starting at time `now`.
    ///
    /// Denied or restricted access resolves immediately. Undetermined access
    /// prompts the user and stays pending until the provider answers or the
    /// deadline passes.
    pub fn request<P>(&self, provider: &mut P, now: Duration) -> SideRequest
    where
        P: LocationProvider + ?Sized,
    {
        let slot = Shared::new(Slot {
            threshold: self.threshold,
            outcome: None,
            waker: None,
        });
        let request = SideRequest {
            slot: slot.clone(),
            deadline: now + self.timeout,
        };
        let reply = LocationReply { slot };

        match provider.authorization() {
            Authorization::Denied => {
                reply.complete(Err(LocationError::Denied));
            }
            Authorization::Restricted => {
                reply.complete(Err(LocationError::Restricted));
            }
            Authorization::NotDetermined => provider.request_authorization(reply),
            Authorization::Authorized => provider.request_location(reply),
        }

        request
    }
}

impl Default for SideAssigner {
    fn default() -> Self {
        Self::from_options(&GameOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DEFAULT_SIDE_THRESHOLD;

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(
            Side::from_latitude(DEFAULT_SIDE_THRESHOLD, DEFAULT_SIDE_THRESHOLD),
            Side::East
        );
        assert_eq!(Side::from_latitude(34.82, DEFAULT_SIDE_THRESHOLD), Side::West);
        assert_eq!(Side::from_latitude(-10.0, DEFAULT_SIDE_THRESHOLD), Side::East);
    }

    #[test]
    fn seats_follow_side() {
        assert_eq!(Side::West.seats(), [Seat::Player, Seat::Computer]);
        assert_eq!(Side::East.seats(), [Seat::Computer, Seat::Player]);
        assert_eq!(Side::West.label(), "West Side");
    }

    #[test]
    fn first_resolution_wins() {
        let slot = Shared::new(Slot {
            threshold: DEFAULT_SIDE_THRESHOLD,
            outcome: None,
            waker: None,
        });
        let request = SideRequest {
            slot: slot.clone(),
            deadline: Duration::from_secs(1),
        };
        let reply = LocationReply { slot };

        assert!(!request.check_deadline(Duration::from_millis(999)));
        assert!(reply.is_pending());
        assert!(request.check_deadline(Duration::from_secs(1)));
        assert!(!reply.is_pending());
        assert!(!reply.complete(Ok(Location::new(40.0, 0.0))));
        assert_eq!(request.try_take(), Some(Err(LocationError::Timeout)));
        assert!(!request.cancel());
    }
}
