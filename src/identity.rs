//! The player's persisted display name.

use alloc::string::{String, ToString};
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::error::StoreError;

/// Key the player name is stored under.
pub const PLAYER_NAME_KEY: &str = "playerName";

/// Name used until the player saves one.
pub const DEFAULT_PLAYER_NAME: &str = "You";

/// A string key-value store, such as platform user defaults.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot persist the value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// An in-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The player's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    name: String,
    saved: bool,
}

impl PlayerIdentity {
    /// Loads the stored name, falling back to [`DEFAULT_PLAYER_NAME`].
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        store.get(PLAYER_NAME_KEY).map_or_else(
            || Self {
                name: DEFAULT_PLAYER_NAME.to_string(),
                saved: false,
            },
            |name| Self { name, saved: true },
        )
    }

    /// Saves `name`, overwriting any stored name.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, name: &str) -> Result<Self, StoreError> {
        store.set(PLAYER_NAME_KEY, name)?;
        Ok(Self {
            name: name.to_string(),
            saved: true,
        })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the name came from the store rather than the default.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        self.saved
    }
}

impl Default for PlayerIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAYER_NAME.to_string(),
            saved: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnly;

    impl KeyValueStore for ReadOnly {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Rejected)
        }
    }

    #[test]
    fn load_defaults_when_absent() {
        let identity = PlayerIdentity::load(&MemoryStore::new());
        assert_eq!(identity.name(), "You");
        assert!(!identity.is_saved());
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::new();
        let saved = PlayerIdentity::save(&mut store, "Ada").unwrap();
        assert_eq!(saved.name(), "Ada");
        assert_eq!(store.get(PLAYER_NAME_KEY).as_deref(), Some("Ada"));

        PlayerIdentity::save(&mut store, "Grace").unwrap();
        let loaded = PlayerIdentity::load(&store);
        assert_eq!(loaded.name(), "Grace");
        assert!(loaded.is_saved());
    }

    #[test]
    fn rejected_save_surfaces_error() {
        let mut store = ReadOnly;
        assert_eq!(
            PlayerIdentity::save(&mut store, "Ada"),
            Err(StoreError::Rejected)
        );
    }
}
