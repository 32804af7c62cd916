//! Game configuration options.

use crate::chips::Chips;

/// Rounding mode for payouts that fall between two cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Configuration options for a blackjack session.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjround::{Chips, GameOptions};
///
/// let options = GameOptions::default()
///     .with_initial_balance(Chips::new(500))
///     .with_default_bet(Chips::new(25));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    /// Starting balance of the session.
    pub initial_balance: Chips,
    /// Bet amount preselected in the betting phase.
    pub default_bet: Chips,
    /// Blackjack winnings ratio, paid on top of the returned stake.
    pub blackjack_pays: f64,
    /// Rounding mode for blackjack winnings that are not a whole cent.
    pub rounding_blackjack: RoundingMode,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            initial_balance: Chips::new(1000),
            default_bet: Chips::new(10),
            blackjack_pays: 1.5,
            rounding_blackjack: RoundingMode::Down,
        }
    }
}

impl GameOptions {
    /// Sets the starting balance.
    ///
    /// # Example
    ///
    /// ```
    /// use bjround::{Chips, GameOptions};
    ///
    /// let options = GameOptions::default().with_initial_balance(Chips::new(250));
    /// assert_eq!(options.initial_balance, Chips::new(250));
    /// ```
    #[must_use]
    pub const fn with_initial_balance(mut self, balance: Chips) -> Self {
        self.initial_balance = balance;
        self
    }

    /// Sets the preselected bet amount.
    ///
    /// # Example
    ///
    /// ```
    /// use bjround::{Chips, GameOptions};
    ///
    /// let options = GameOptions::default().with_default_bet(Chips::from_cents(250));
    /// assert_eq!(options.default_bet.to_string(), "2.50");
    /// ```
    #[must_use]
    pub const fn with_default_bet(mut self, bet: Chips) -> Self {
        self.default_bet = bet;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use bjround::GameOptions;
    ///
    /// let options = GameOptions::default().with_blackjack_pays(1.2);
    /// assert_eq!(options.blackjack_pays, 1.2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }
}
