#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::error::StoreError;
use crate::game::{GameState, PlayerId};
use crate::sync::{Mutex, MutexGuard};

use super::{GameMap, GameStore};

/// A store that keeps games in memory.
///
/// Useful for tests and for hosts that persist games some other way.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: Mutex<HashMap<PlayerId, GameState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored games.
    pub fn len(&self) -> usize {
        self.games().len()
    }

    /// Returns whether no games are stored.
    pub fn is_empty(&self) -> bool {
        self.games().is_empty()
    }

    fn games(&self) -> MutexGuard<'_, HashMap<PlayerId, GameState>> {
        self.games.lock()
    }
}

impl GameStore for MemoryStore {
    fn load_all(&self) -> Result<GameMap, StoreError> {
        Ok(self
            .games()
            .iter()
            .map(|(id, state)| (*id, state.clone()))
            .collect())
    }

    fn save_all(&self, games: &GameMap) -> Result<(), StoreError> {
        let mut stored = self.games();
        stored.clear();
        stored.extend(games.iter().map(|(id, state)| (*id, state.clone())));
        Ok(())
    }

    fn get(&self, player_id: PlayerId) -> Result<Option<GameState>, StoreError> {
        Ok(self.games().get(&player_id).cloned())
    }

    fn put(&self, state: &GameState) -> Result<(), StoreError> {
        self.games().insert(state.player_id, state.clone());
        Ok(())
    }

    fn delete(&self, player_id: PlayerId) -> Result<bool, StoreError> {
        Ok(self.games().remove(&player_id).is_some())
    }
}
