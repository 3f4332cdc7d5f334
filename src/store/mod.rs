//! Keyed persistence of [`GameState`] records.
//!
//! A store holds at most one game per player. The single-key operations
//! ([`get`](GameStore::get), [`put`](GameStore::put) and
//! [`delete`](GameStore::delete)) are atomic with respect to each other, so two
//! players acting at the same time cannot overwrite each other's games.

use alloc::collections::BTreeMap;

use crate::error::StoreError;
use crate::game::{GameState, PlayerId};

#[cfg(feature = "std")]
mod json;
mod memory;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// The whole content of a store: player ID to game.
pub type GameMap = BTreeMap<PlayerId, GameState>;

/// Storage backend for games.
pub trait GameStore {
    /// Loads every stored game.
    ///
    /// Returns an empty map if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupted`] if the stored data cannot be parsed,
    /// or [`StoreError::Read`] if it cannot be read at all.
    fn load_all(&self) -> Result<GameMap, StoreError>;

    /// Replaces the whole content of the store with `games`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the data cannot be written.
    fn save_all(&self, games: &GameMap) -> Result<(), StoreError>;

    /// Returns the game stored for `player_id`, if any.
    ///
    /// # Errors
    ///
    /// Same as [`load_all`](Self::load_all).
    fn get(&self, player_id: PlayerId) -> Result<Option<GameState>, StoreError>;

    /// Stores `state` under its player ID, replacing any previous game.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the data cannot be written, or
    /// [`StoreError::Read`] if the current content cannot be read.
    fn put(&self, state: &GameState) -> Result<(), StoreError>;

    /// Removes the game stored for `player_id`.
    ///
    /// Returns whether a game was removed.
    ///
    /// # Errors
    ///
    /// Same as [`put`](Self::put).
    fn delete(&self, player_id: PlayerId) -> Result<bool, StoreError>;
}

impl<S: GameStore + ?Sized> GameStore for &S {
    fn load_all(&self) -> Result<GameMap, StoreError> {
        (**self).load_all()
    }

    fn save_all(&self, games: &GameMap) -> Result<(), StoreError> {
        (**self).save_all(games)
    }

    fn get(&self, player_id: PlayerId) -> Result<Option<GameState>, StoreError> {
        (**self).get(player_id)
    }

    fn put(&self, state: &GameState) -> Result<(), StoreError> {
        (**self).put(state)
    }

    fn delete(&self, player_id: PlayerId) -> Result<bool, StoreError> {
        (**self).delete(player_id)
    }
}
