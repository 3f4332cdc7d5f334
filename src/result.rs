//! Result records returned to the layer that renders the game.

use alloc::vec::Vec;

use crate::card::Card;
use crate::game::PlayerId;
use crate::hand::Hand;

/// Final result of a game from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has higher value).
    Win,
    /// Player loses (player busts or dealer has higher value).
    Lose,
    /// Push (tie).
    Push,
}

impl HandOutcome {
    /// Resolves a finished game from both hand values.
    #[must_use]
    pub const fn resolve(player_value: u8, dealer_value: u8) -> Self {
        if dealer_value > crate::hand::BLACKJACK || player_value > dealer_value {
            Self::Win
        } else if player_value < dealer_value {
            Self::Lose
        } else {
            Self::Push
        }
    }
}

/// An action the player can take on a game in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Draw another card.
    Hit,
    /// Keep the current hand and let the dealer play.
    Stand,
}

impl Action {
    /// Actions offered while a game is in progress.
    pub const AVAILABLE: [Self; 2] = [Self::Hit, Self::Stand];
}

/// The opening hands of a new game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// The player ID.
    pub player_id: PlayerId,
    /// The player's two cards.
    pub player_hand: Hand,
    /// The dealer's two cards. Both are shown.
    pub dealer_hand: Hand,
}

/// Outcome of a hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitResult {
    /// The player is still under 21 and may act again.
    InProgress {
        /// The card just drawn.
        card: Card,
        /// The player's hand including the drawn card.
        hand: Hand,
        /// What the player can do next.
        next_actions: [Action; 2],
    },
    /// The player went over 21 and lost. The game has been removed.
    Bust {
        /// The card just drawn.
        card: Card,
        /// The player's final hand.
        hand: Hand,
        /// The player's final score.
        score: u8,
    },
    /// The deck ran out and the game was resolved as a stand.
    ///
    /// Only produced when
    /// [`GameOptions::resolve_on_exhausted`](crate::GameOptions::resolve_on_exhausted)
    /// is enabled.
    Resolved(StandResult),
}

/// Final state of a game after the player stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandResult {
    /// Cards the dealer drew, in order.
    pub dealer_draws: Vec<Card>,
    /// The dealer's final hand.
    pub dealer_hand: Hand,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// The player's final hand.
    pub player_hand: Hand,
    /// The player's final hand value.
    pub player_value: u8,
    /// Result for the player.
    pub outcome: HandOutcome,
}

impl StandResult {
    /// Returns whether the dealer busted.
    #[must_use]
    pub const fn dealer_bust(&self) -> bool {
        self.dealer_value > crate::hand::BLACKJACK
    }
}
