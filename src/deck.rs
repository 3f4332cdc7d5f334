//! Deck construction and shuffling.

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, Suit};

/// Ranks in deck-building order: 2 through 10, then J, Q, K, A.
const RANKS: [u8; 13] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 1];

/// Builds an unshuffled deck, suit by suit.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);

    for suit in Suit::ALL {
        for rank in RANKS {
            cards.push(Card::new(suit, rank));
        }
    }

    cards
}

/// Builds a deck and returns it in uniformly random order.
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut cards = standard_deck();
    cards.shuffle(rng);
    cards
}
