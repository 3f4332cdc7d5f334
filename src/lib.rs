//! A resumable single-player blackjack engine with optional `no_std` support.
//!
//! The crate provides a [`GameEngine`] that plays one game per player against
//! an automated dealer. Games are kept in a [`GameStore`] between actions, so
//! every start, hit and stand can arrive as an independent event, as it does
//! from chat-bot buttons.
//!
//! # Example
//!
//! ```
//! use bjtable::{GameEngine, GameOptions, HitResult, MemoryStore};
//!
//! let engine = GameEngine::new(MemoryStore::new(), GameOptions::default(), 42);
//! let player = 1_u64;
//!
//! let deal = engine.start(player).unwrap();
//! println!("dealer: {}, you: {}", deal.dealer_hand, deal.player_hand);
//!
//! match engine.hit(player).unwrap() {
//!     HitResult::InProgress { hand, .. } => {
//!         let result = engine.stand(player).unwrap();
//!         println!("{hand} -> {:?}", result.outcome);
//!     }
//!     HitResult::Bust { score, .. } => println!("bust with {score}"),
//!     HitResult::Resolved(result) => println!("{:?}", result.outcome),
//! }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod result;
pub mod store;
mod sync;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use deck::{shuffled_deck, standard_deck};
pub use error::{ActionError, InvalidGameError, ParseCardError, StartError, StoreError};
pub use game::{GameEngine, GameState, PlayerId, draw_probability};
pub use hand::{BLACKJACK, Hand, hand_value};
pub use options::GameOptions;
pub use result::{Action, Deal, HandOutcome, HitResult, StandResult};
#[cfg(feature = "std")]
pub use store::JsonFileStore;
pub use store::{GameMap, GameStore, MemoryStore};
