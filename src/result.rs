//! Round outcomes and state snapshots.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::chips::Chips;
use crate::game::GameState;

/// How a settled round ended for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Natural on the opening two cards.
    Blackjack,
    /// Player busted.
    Bust,
    /// Dealer busted.
    DealerBust,
    /// Player beat the dealer's total.
    Win,
    /// Dealer beat the player's total.
    Lose,
    /// Equal totals; stake returned.
    Push,
}

impl RoundOutcome {
    /// Returns the message shown for this outcome.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Blackjack => "Blackjack! You win!",
            Self::Bust => "Bust! Dealer wins",
            Self::DealerBust => "Dealer bust! You win!",
            Self::Win => "You win!",
            Self::Lose => "Dealer wins",
            Self::Push => "Push",
        }
    }

    /// Returns whether the player won the round.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Blackjack | Self::DealerBust | Self::Win)
    }
}

impl core::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// Owned copy of everything a view may read from the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundView {
    /// Current phase.
    pub state: GameState,
    /// Player cards.
    pub player_cards: Vec<Card>,
    /// Dealer cards, including the hole card.
    pub dealer_cards: Vec<Card>,
    /// Player hand value.
    pub player_value: u8,
    /// Dealer hand value as displayed, `None` while the hole card is hidden.
    pub dealer_display_value: Option<u8>,
    /// Session balance.
    pub balance: Chips,
    /// Stake at risk in the current round.
    pub wager: Chips,
    /// Preselected bet amount.
    pub bet: Chips,
    /// Result of the last settled round.
    pub outcome: Option<RoundOutcome>,
}

impl RoundView {
    /// Returns the outcome message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        self.outcome.map(RoundOutcome::message)
    }
}
