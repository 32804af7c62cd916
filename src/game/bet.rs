use rand::Rng;
use tracing::{debug, error, warn};

use crate::card::Deck;
use crate::chips::Chips;
use crate::error::BetError;
use crate::result::{RoundOutcome, RoundView};

use super::{Game, GameState};

/// Cards dealt before the player acts: two each.
const OPENING_CARDS: usize = 4;

/// Floor for [`Game::halve_bet`].
const MIN_HALVED_BET: Chips = Chips::new(1);

impl<R: Rng> Game<R> {
    fn ensure_betting(&self, action: &'static str) -> Result<(), BetError> {
        if self.state != GameState::Betting {
            warn!(action, state = ?self.state, "bet command rejected");
            return Err(BetError::InvalidState);
        }

        Ok(())
    }

    fn validate_bet(&self, amount: Chips) -> Result<(), BetError> {
        self.ensure_betting("place_bet")?;

        if amount.is_zero() || amount > self.balance {
            debug!(%amount, balance = %self.balance, "invalid bet amount");
            return Err(BetError::InvalidBet);
        }

        Ok(())
    }

    /// Places a bet and deals the opening hands from a freshly shuffled deck.
    ///
    /// A natural on the player's first two cards is paid and settled at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state, or the amount is
    /// zero or larger than the balance.
    ///
    /// # Example
    ///
    /// ```
    /// use bjround::{Chips, Game, GameOptions, GameState};
    ///
    /// let mut game = Game::new(GameOptions::default(), 7);
    /// let view = game.place_bet(Chips::new(10)).unwrap();
    /// assert_ne!(view.state, GameState::Betting);
    /// assert_eq!(view.player_cards.len(), 2);
    /// ```
    pub fn place_bet(&mut self, amount: Chips) -> Result<RoundView, BetError> {
        self.validate_bet(amount)?;

        let deck = Deck::new().shuffled(&mut self.rng);
        self.deal_from(amount, deck)
    }

    /// Places the preselected bet amount.
    ///
    /// # Errors
    ///
    /// Same as [`Game::place_bet`].
    pub fn place_default_bet(&mut self) -> Result<RoundView, BetError> {
        self.place_bet(self.bet)
    }

    /// Places a bet and deals from `deck` as given, front card first.
    ///
    /// Cards at positions 0 and 2 go to the player, 1 and 3 to the dealer.
    /// Used to replay a recorded deck order.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state, the amount is
    /// invalid, or `deck` holds fewer than four cards.
    pub fn deal_from(&mut self, amount: Chips, mut deck: Deck) -> Result<RoundView, BetError> {
        self.validate_bet(amount)?;

        let opening = deck.draw(OPENING_CARDS).map_err(|err| {
            error!(%err, "deck cannot cover the opening deal");
            BetError::from(err)
        })?;

        self.player.clear();
        self.dealer.clear();
        for (index, card) in opening.into_iter().enumerate() {
            if index % 2 == 0 {
                self.player.add_card(card);
            } else {
                self.dealer.add_card(card);
            }
        }

        self.deck = deck;
        self.balance -= amount;
        self.wager = amount;
        self.bet = amount;
        self.outcome = None;
        self.state = GameState::PlayerTurn;

        debug!(
            wager = %amount,
            balance = %self.balance,
            player_value = self.player.value(),
            "opening hands dealt"
        );

        if self.player.is_blackjack() {
            self.settle(RoundOutcome::Blackjack);
        }

        Ok(self.snapshot())
    }

    /// Sets the preselected bet amount. The amount is validated when placed.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state.
    pub fn set_bet(&mut self, amount: Chips) -> Result<Chips, BetError> {
        self.ensure_betting("set_bet")?;
        self.bet = amount;
        Ok(self.bet)
    }

    /// Halves the preselected bet, never going below one chip.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state.
    pub fn halve_bet(&mut self) -> Result<Chips, BetError> {
        self.ensure_betting("halve_bet")?;
        self.bet = self.bet.half().max(MIN_HALVED_BET);
        Ok(self.bet)
    }

    /// Doubles the preselected bet, capped at the balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state.
    pub fn double_bet(&mut self) -> Result<Chips, BetError> {
        self.ensure_betting("double_bet")?;
        self.bet = self.bet.saturating_mul(2).min(self.balance);
        Ok(self.bet)
    }

    /// Sets the preselected bet to the whole balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state.
    pub fn max_bet(&mut self) -> Result<Chips, BetError> {
        self.ensure_betting("max_bet")?;
        self.bet = self.balance;
        Ok(self.bet)
    }
}
