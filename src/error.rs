//! Error types for game operations.

use thiserror::Error;

/// Errors raised by the deck itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// More cards were requested than remain.
    #[error("deck exhausted: requested {requested} card(s), {remaining} remaining")]
    Exhausted {
        /// Cards requested.
        requested: usize,
        /// Cards left in the deck.
        remaining: usize,
    },
}

/// Error returned when a string is not a chip amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid chip amount")]
pub struct ParseChipsError;

/// Errors that can occur while placing a bet or adjusting the bet amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Invalid game state for betting.
    #[error("invalid game state for betting")]
    InvalidState,
    /// Bet amount is zero or exceeds the balance.
    #[error("invalid bet amount")]
    InvalidBet,
    /// Not enough cards to deal the opening hands.
    #[error("not enough cards in the deck")]
    DeckExhausted,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Balance does not cover the additional stake.
    #[error("insufficient balance")]
    InsufficientBalance,
    /// Splitting is not offered.
    #[error("split is not available")]
    SplitDisabled,
    /// The deck ran out mid-round.
    #[error("no cards left in the deck")]
    DeckExhausted,
}

/// Errors that can occur when starting a new round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The current round has not been settled.
    #[error("round is not settled")]
    InvalidState,
}

impl From<DeckError> for ActionError {
    fn from(_: DeckError) -> Self {
        Self::DeckExhausted
    }
}

impl From<DeckError> for BetError {
    fn from(_: DeckError) -> Self {
        Self::DeckExhausted
    }
}
