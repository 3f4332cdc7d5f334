use alloc::vec::Vec;

use rand::{Rng, RngCore};
use tracing::{debug, info};

use crate::card::Card;
use crate::error::ActionError;
use crate::hand::BLACKJACK;
use crate::result::{HandOutcome, StandResult};
use crate::store::GameStore;

use super::{GameEngine, GameState, PlayerId};

/// Chance that the dealer draws another card at `dealer_value`.
///
/// Falls linearly from 1 at zero to 0 at 21, and is negative past 21, so a
/// busted dealer never draws.
#[must_use]
pub fn draw_probability(dealer_value: u8) -> f64 {
    let target = f64::from(BLACKJACK);
    (target - f64::from(dealer_value)) / target
}

impl<S: GameStore, R: RngCore> GameEngine<S, R> {
    /// Player action: Stand (keep current hand).
    ///
    /// The dealer then plays out its hand and the game is resolved and
    /// removed from the store. Cards the dealer draws are listed in
    /// [`StandResult::dealer_draws`].
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::GameNotFound`] if the player has no game.
    pub fn stand(&self, player_id: PlayerId) -> Result<StandResult, ActionError> {
        self.stand_with(player_id, |_| {})
    }

    /// Like [`stand`](Self::stand), calling `on_draw` for each card the dealer
    /// draws, before the next draw is decided.
    ///
    /// `on_draw` runs while the engine is locked and must not call back into
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::GameNotFound`] if the player has no game.
    pub fn stand_with<F>(&self, player_id: PlayerId, on_draw: F) -> Result<StandResult, ActionError>
    where
        F: FnMut(&Card),
    {
        let _guard = self.writer.lock();
        let state = self.load(player_id)?;
        Ok(self.play_out(state, on_draw))
    }

    /// Dealer plays its hand, then the game is resolved and discarded.
    ///
    /// While cards remain and the dealer is not bust, the dealer draws with
    /// probability `(21 - dealer value) / 21`.
    pub(super) fn play_out<F>(&self, mut state: GameState, mut on_draw: F) -> StandResult
    where
        F: FnMut(&Card),
    {
        let player_id = state.player_id;
        let mut dealer_draws = Vec::new();

        let mut rng = self.rng.lock();
        while !state.is_exhausted() && !state.dealer_hand.is_bust() {
            let probability = draw_probability(state.dealer_hand.value());
            let roll: f64 = rng.random();
            if roll >= probability {
                break;
            }

            let Some(card) = state.draw() else {
                break;
            };
            state.dealer_hand.add_card(card);
            debug!(
                player_id,
                %card,
                dealer_value = state.dealer_hand.value(),
                cursor = state.cursor,
                "dealer drew"
            );
            on_draw(&card);
            dealer_draws.push(card);
        }
        drop(rng);

        let player_value = state.player_hand.value();
        let dealer_value = state.dealer_hand.value();
        let outcome = HandOutcome::resolve(player_value, dealer_value);

        self.discard(player_id);
        info!(player_id, player_value, dealer_value, ?outcome, "game over");

        StandResult {
            dealer_draws,
            dealer_hand: state.dealer_hand,
            dealer_value,
            player_hand: state.player_hand,
            player_value,
            outcome,
        }
    }
}
