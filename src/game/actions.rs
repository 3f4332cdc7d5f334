use rand::RngCore;
use tracing::{debug, info};

use crate::error::ActionError;
use crate::hand::BLACKJACK;
use crate::result::{Action, HitResult};
use crate::store::GameStore;

use super::{GameEngine, PlayerId};

impl<S: GameStore, R: RngCore> GameEngine<S, R> {
    /// Player action: Hit (draw a card).
    ///
    /// A hand over 21 ends the game as a loss and removes it from the store.
    /// Otherwise the updated game is saved and the player may act again.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::GameNotFound`] if the player has no game, or
    /// [`ActionError::DeckExhausted`] if every card has been drawn. In the
    /// latter case the stored game is left untouched, unless
    /// [`GameOptions::resolve_on_exhausted`](crate::GameOptions::resolve_on_exhausted)
    /// is enabled, in which case the game is resolved as a stand instead.
    pub fn hit(&self, player_id: PlayerId) -> Result<HitResult, ActionError> {
        let _guard = self.writer.lock();
        let mut state = self.load(player_id)?;

        let Some(card) = state.draw() else {
            if self.options.resolve_on_exhausted {
                info!(player_id, "deck exhausted on hit, resolving game");
                return Ok(HitResult::Resolved(self.play_out(state, |_| {})));
            }
            return Err(ActionError::DeckExhausted);
        };
        state.player_hand.add_card(card);

        let score = state.player_hand.value();
        debug!(player_id, %card, score, cursor = state.cursor, "player drew");

        if score > BLACKJACK {
            self.discard(player_id);
            info!(player_id, score, "player busted");
            return Ok(HitResult::Bust {
                card,
                hand: state.player_hand,
                score,
            });
        }

        self.persist(&state);

        Ok(HitResult::InProgress {
            card,
            hand: state.player_hand,
            next_actions: Action::AVAILABLE,
        })
    }
}
