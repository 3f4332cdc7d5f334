//! Hand representation and blackjack scoring.

use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Highest value a hand can have without busting.
pub const BLACKJACK: u8 = 21;

const fn card_value(rank: u8) -> u32 {
    match rank {
        1 => 11,
        2..=10 => rank as u32,
        11..=13 => 10,
        _ => 0,
    }
}

fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut value: u32 = 0;
    let mut aces: usize = 0;

    for card in cards {
        if card.is_ace() {
            aces = aces.saturating_add(1);
        }
        value = value.saturating_add(card_value(card.rank));
    }

    while value > u32::from(BLACKJACK) && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0;
    (u8::try_from(value).unwrap_or(u8::MAX), is_soft)
}

/// Computes the blackjack value of a card sequence.
///
/// Number cards count their face value, J/Q/K count 10 and each ace counts
/// 11 until the total would exceed 21, at which point aces are demoted to 1
/// one at a time.
///
/// ```
/// use bjtable::{Card, hand_value};
///
/// let cards: Vec<Card> = ["10♠", "A♥"].iter().map(|c| c.parse().unwrap()).collect();
/// assert_eq!(hand_value(&cards), 21);
/// ```
#[must_use]
pub fn hand_value(cards: &[Card]) -> u8 {
    evaluate_cards(cards).0
}

/// An ordered, append-only sequence of cards held by the player or the dealer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the most recently added card.
    #[must_use]
    pub fn last(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Calculates the value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
