//! Error types for collaborator operations.

use alloc::string::String;

use thiserror::Error;

/// Errors that can occur while resolving a location fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user denied location access.
    #[error("location access denied")]
    Denied,
    /// Location access is restricted on this device.
    #[error("location access restricted")]
    Restricted,
    /// The positioning service could not produce a fix.
    #[error("location unavailable")]
    Unavailable,
    /// No fix arrived before the request deadline.
    #[error("location request timed out")]
    Timeout,
    /// The request was cancelled before it resolved.
    #[error("location request cancelled")]
    Cancelled,
}

/// Errors reported by an audio backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    /// No bundled asset matches the cue name.
    #[error("audio asset `{0}` not found")]
    AssetNotFound(String),
    /// The asset exists but could not be played.
    #[error("audio playback failed")]
    Playback,
}

/// Errors that can occur when writing to a key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store cannot be reached.
    #[error("store unavailable")]
    Unavailable,
    /// The store refused the write.
    #[error("store rejected the write")]
    Rejected,
}

/// Errors that can occur when parsing a card asset id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The id is not of the form `<suit>_<rank>`.
    #[error("card id is not of the form <suit>_<rank>")]
    Malformed,
    /// The suit part is unknown.
    #[error("unknown suit")]
    UnknownSuit,
    /// The rank part is unknown.
    #[error("unknown rank")]
    UnknownRank,
}
