//! The persisted per-player game record.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::InvalidGameError;
use crate::hand::Hand;

/// Number of cards dealt before the player acts.
pub const INITIAL_DEAL: usize = 4;

/// Identifier of the player owning a game.
pub type PlayerId = u64;

/// One in-progress game.
///
/// The deck is fixed when the game starts. Cards are drawn from it in order
/// through `cursor`, so the two hands and the undrawn tail always partition
/// the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The player ID.
    pub player_id: PlayerId,
    /// The full shuffled deck.
    pub deck: Vec<Card>,
    /// The player's hand.
    pub player_hand: Hand,
    /// The dealer's hand.
    pub dealer_hand: Hand,
    /// Index of the next card to draw.
    pub cursor: usize,
}

impl GameState {
    /// Deals a new game from `deck`.
    ///
    /// Cards 0 and 2 go to the player, cards 1 and 3 to the dealer, and the
    /// cursor is left at 4. A deck shorter than four cards deals what it has
    /// in the same order.
    #[must_use]
    pub fn deal(player_id: PlayerId, deck: Vec<Card>) -> Self {
        let mut player_hand = Hand::new();
        let mut dealer_hand = Hand::new();

        for (i, card) in deck.iter().take(INITIAL_DEAL).enumerate() {
            if i % 2 == 0 {
                player_hand.add_card(*card);
            } else {
                dealer_hand.add_card(*card);
            }
        }

        let cursor = INITIAL_DEAL.min(deck.len());
        Self {
            player_id,
            deck,
            player_hand,
            dealer_hand,
            cursor,
        }
    }

    /// Returns the number of cards left to draw.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.len().saturating_sub(self.cursor)
    }

    /// Returns whether every card of the deck has been drawn.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.deck.len()
    }

    /// Draws the next card from the deck, advancing the cursor.
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.deck.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(card)
    }

    /// Checks that the game is consistent with its deck.
    ///
    /// The cursor must be within the deck, the deck must not repeat a card,
    /// and the two hands together must hold exactly the cards before the
    /// cursor.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), InvalidGameError> {
        if self.cursor > self.deck.len() {
            return Err(InvalidGameError::CursorOutOfRange {
                cursor: self.cursor,
                len: self.deck.len(),
            });
        }

        let mut deck = self.deck.clone();
        deck.sort_unstable();
        if deck.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(InvalidGameError::DuplicateCard);
        }

        let mut drawn = self.deck[..self.cursor].to_vec();
        drawn.sort_unstable();
        let mut held: Vec<Card> = self
            .player_hand
            .cards()
            .iter()
            .chain(self.dealer_hand.cards())
            .copied()
            .collect();
        held.sort_unstable();
        if drawn != held {
            return Err(InvalidGameError::HandMismatch);
        }

        Ok(())
    }
}
