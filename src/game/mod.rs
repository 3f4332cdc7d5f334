//! Game engine and state management.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::deck::shuffled_deck;
use crate::error::{ActionError, StartError, StoreError};
use crate::options::GameOptions;
use crate::result::Deal;
use crate::store::GameStore;
use crate::sync::Mutex;

mod actions;
mod dealer;
pub mod state;

pub use dealer::draw_probability;
pub use state::{GameState, INITIAL_DEAL, PlayerId};

/// A blackjack engine that plays one game per player against the dealer.
///
/// The engine keeps no games in memory. Every action reads the player's game
/// from the store, applies the move and writes it back, or deletes it once the
/// game is over. This makes each action independent, so a bot can drive the
/// engine from separate interaction events.
///
/// Actions are serialized by an internal lock, so one engine can be shared
/// between tasks without lost updates.
pub struct GameEngine<S, R = ChaCha8Rng> {
    /// Engine options.
    pub options: GameOptions,
    /// Game storage.
    store: S,
    /// Random number generator used for shuffling and dealer decisions.
    rng: Mutex<R>,
    /// Held for the whole read-modify-write cycle of an action.
    writer: Mutex<()>,
}

impl<S: GameStore> GameEngine<S> {
    /// Creates an engine with a `ChaCha8` generator seeded with `seed`.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{GameEngine, GameOptions, MemoryStore};
    ///
    /// let engine = GameEngine::new(MemoryStore::new(), GameOptions::default(), 42);
    /// let deal = engine.start(7).unwrap();
    /// assert_eq!(deal.player_hand.len(), 2);
    /// ```
    #[must_use]
    pub fn new(store: S, options: GameOptions, seed: u64) -> Self {
        Self::with_rng(store, options, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<S: GameStore, R: RngCore> GameEngine<S, R> {
    /// Creates an engine drawing randomness from `rng`.
    #[must_use]
    pub const fn with_rng(store: S, options: GameOptions, rng: R) -> Self {
        Self {
            options,
            store,
            rng: Mutex::new(rng),
            writer: Mutex::new(()),
        }
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Starts a new game for `player_id` with a freshly shuffled deck.
    ///
    /// The player receives the first and third cards, the dealer the second
    /// and fourth.
    ///
    /// # Errors
    ///
    /// Returns [`StartError::GameInProgress`] if the player already has a game
    /// and [`GameOptions::replace_in_progress`] is disabled.
    pub fn start(&self, player_id: PlayerId) -> Result<Deal, StartError> {
        let _guard = self.writer.lock();

        if self.find(player_id).is_some() {
            if !self.options.replace_in_progress {
                return Err(StartError::GameInProgress);
            }
            info!(player_id, "replacing game in progress");
        }

        let deck = shuffled_deck(&mut *self.rng.lock());
        let state = GameState::deal(player_id, deck);
        self.persist(&state);

        info!(
            player_id,
            player = %state.player_hand,
            dealer = %state.dealer_hand,
            "started game"
        );

        Ok(Deal {
            player_id,
            player_hand: state.player_hand,
            dealer_hand: state.dealer_hand,
        })
    }

    /// Returns the stored game for `player_id` without changing it.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::GameNotFound`] if the player has no game, or
    /// [`ActionError::Storage`] if the store cannot be read.
    pub fn game(&self, player_id: PlayerId) -> Result<GameState, ActionError> {
        let _guard = self.writer.lock();
        self.load(player_id)
    }

    /// Loads the player's game, treating a corrupted store as empty.
    fn load(&self, player_id: PlayerId) -> Result<GameState, ActionError> {
        match self.store.get(player_id) {
            Ok(Some(state)) => Ok(state),
            Ok(None) => Err(ActionError::GameNotFound),
            Err(StoreError::Corrupted(reason)) => {
                warn!(player_id, %reason, "game store is corrupted, treating it as empty");
                Err(ActionError::GameNotFound)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn find(&self, player_id: PlayerId) -> Option<GameState> {
        match self.load(player_id) {
            Ok(state) => Some(state),
            Err(ActionError::GameNotFound) => None,
            Err(err) => {
                warn!(player_id, %err, "could not check for a game in progress");
                None
            }
        }
    }

    /// Saves the game. A failed write is logged; the caller still reports the
    /// move to the player.
    fn persist(&self, state: &GameState) {
        if let Err(err) = self.store.put(state) {
            warn!(player_id = state.player_id, %err, "failed to save game");
        }
    }

    /// Removes a finished game. A failed write is logged.
    fn discard(&self, player_id: PlayerId) {
        if let Err(err) = self.store.delete(player_id) {
            warn!(player_id, %err, "failed to remove finished game");
        }
    }
}
