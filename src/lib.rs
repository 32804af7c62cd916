//! A single-player blackjack round engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that owns one player's session: a single
//! shuffled deck, the player and dealer hands, the wager and the balance. It
//! drives the round from betting through the player's actions and the
//! dealer's fixed policy to settlement.
//!
//! # Example
//!
//! ```
//! use bjround::{Chips, Game, GameOptions, GameState};
//!
//! let mut game = Game::new(GameOptions::default(), 42);
//! let view = game.place_bet(Chips::new(10)).unwrap();
//! if view.state == GameState::PlayerTurn {
//!     game.stand().unwrap();
//! }
//! assert_eq!(game.state(), GameState::Settled);
//! game.new_round().unwrap();
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod chips;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod policy;
pub mod result;

// Re-export main types
pub use card::{Card, DECK_SIZE, Deck, Rank, Suit};
pub use chips::{CENTS_PER_CHIP, Chips};
pub use error::{ActionError, BetError, DeckError, ParseChipsError, RoundError};
pub use game::{Game, GameState};
pub use hand::{Hand, evaluate_cards, hand_value};
pub use options::{GameOptions, RoundingMode};
pub use policy::should_draw;
pub use result::{RoundOutcome, RoundView};
