//! Error types for game and storage operations.

use alloc::string::String;

use thiserror::Error;

/// Errors that can occur when starting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    /// The player already has a game and replacing it is disabled.
    #[error("a game is already in progress for this player")]
    GameInProgress,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No game is stored for the player.
    #[error("game not found")]
    GameNotFound,
    /// No cards left in the deck.
    #[error("the deck is exhausted, no more cards can be drawn")]
    DeckExhausted,
    /// The game could not be read from the store.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Errors raised by a [`GameStore`](crate::store::GameStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing storage could not be read.
    #[error("failed to read game store: {0}")]
    Read(String),
    /// The persisted document could not be parsed.
    #[error("game store is corrupted: {0}")]
    Corrupted(String),
    /// The backing storage could not be written.
    #[error("failed to write game store: {0}")]
    Write(String),
}

/// Ways a stored game can contradict its own deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidGameError {
    /// The cursor points past the end of the deck.
    #[error("cursor {cursor} is past the end of a {len}-card deck")]
    CursorOutOfRange {
        /// The stored cursor.
        cursor: usize,
        /// The deck length.
        len: usize,
    },
    /// The deck holds the same card more than once.
    #[error("deck holds a card more than once")]
    DuplicateCard,
    /// The hands are not exactly the cards drawn so far.
    #[error("hands do not match the cards drawn from the deck")]
    HandMismatch,
}

/// Errors that can occur when parsing card notation such as `10♠`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The input was empty.
    #[error("empty card notation")]
    Empty,
    /// The rank is not one of 2-10, J, Q, K, A.
    #[error("invalid card rank")]
    InvalidRank,
    /// The suit symbol is not one of ♠ ♥ ♦ ♣.
    #[error("invalid card suit")]
    InvalidSuit,
}
