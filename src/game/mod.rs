//! Round engine and state management.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::card::{Card, Deck};
use crate::chips::Chips;
use crate::error::RoundError;
use crate::hand::Hand;
use crate::options::GameOptions;
use crate::result::{RoundOutcome, RoundView};

mod actions;
mod bet;
mod dealer;
pub mod state;

pub use state::GameState;

/// A single-player blackjack engine that owns the deck, both hands, the wager
/// and the session balance.
///
/// Every command takes `&mut self` and runs to completion, so one engine serves
/// exactly one session. Commands either apply fully and return the new
/// [`RoundView`], or fail and leave the engine untouched.
///
/// The random source is a type parameter so callers can inject a seeded or
/// scripted generator; [`Game::new`] uses [`ChaCha8Rng`].
#[derive(Debug, Clone)]
pub struct Game<R = ChaCha8Rng> {
    /// Game options.
    options: GameOptions,
    /// Current round phase.
    state: GameState,
    /// Cards left to deal this round.
    deck: Deck,
    /// Player's hand.
    player: Hand,
    /// Dealer's hand.
    dealer: Hand,
    /// Session balance.
    balance: Chips,
    /// Stake committed to the current round.
    wager: Chips,
    /// Preselected bet amount, carried between rounds.
    bet: Chips,
    /// Result of the last settled round.
    outcome: Option<RoundOutcome>,
    /// Random number generator.
    rng: R,
}

impl Game<ChaCha8Rng> {
    /// Creates a new game with the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjround::{Chips, Game, GameOptions, GameState};
    ///
    /// let game = Game::new(GameOptions::default(), 42);
    /// assert_eq!(game.state(), GameState::Betting);
    /// assert_eq!(game.balance(), Chips::new(1000));
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        Self::with_rng(options, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Creates a new game drawing randomness from `rng`.
    #[must_use]
    pub fn with_rng(options: GameOptions, mut rng: R) -> Self {
        let deck = Deck::new().shuffled(&mut rng);

        Self {
            balance: options.initial_balance,
            bet: options.default_bet,
            options,
            state: GameState::Betting,
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
            wager: Chips::ZERO,
            outcome: None,
            rng,
        }
    }

    /// Clears the hands and outcome of a settled round and returns to betting.
    ///
    /// Balance and the preselected bet carry over.
    ///
    /// # Errors
    ///
    /// Returns an error if the current round is not settled.
    pub fn new_round(&mut self) -> Result<RoundView, RoundError> {
        if self.state != GameState::Settled {
            warn!(state = ?self.state, "new round rejected");
            return Err(RoundError::InvalidState);
        }

        self.player.clear();
        self.dealer.clear();
        self.outcome = None;
        self.wager = Chips::ZERO;
        self.state = GameState::Betting;
        debug!(balance = %self.balance, bet = %self.bet, "new round");

        Ok(self.snapshot())
    }
}

impl<R> Game<R> {
    /// Returns the game options.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the current round phase.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Returns the player's hand.
    #[must_use]
    pub const fn player_hand(&self) -> &Hand {
        &self.player
    }

    /// Returns the dealer's hand, hole card included.
    #[must_use]
    pub const fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    /// Returns the player's hand value.
    #[must_use]
    pub fn player_value(&self) -> u8 {
        self.player.value()
    }

    /// Returns the dealer's full hand value.
    #[must_use]
    pub fn dealer_value(&self) -> u8 {
        self.dealer.value()
    }

    /// Returns the dealer value a view may show.
    ///
    /// `None` while the player is acting and the dealer still holds only the
    /// up card and the hole card.
    #[must_use]
    pub fn dealer_display_value(&self) -> Option<u8> {
        if self.state == GameState::PlayerTurn && self.dealer.len() == 2 {
            None
        } else {
            Some(self.dealer.value())
        }
    }

    /// Returns the dealer cards a view may show; the hole card is `None`
    /// while hidden.
    #[must_use]
    pub fn dealer_visible_cards(&self) -> impl Iterator<Item = Option<Card>> + '_ {
        let hidden = self.dealer_display_value().is_none();
        self.dealer
            .cards()
            .iter()
            .enumerate()
            .map(move |(index, card)| (!(hidden && index == 1)).then_some(*card))
    }

    /// Returns the session balance.
    #[must_use]
    pub const fn balance(&self) -> Chips {
        self.balance
    }

    /// Returns the stake committed to the current round.
    #[must_use]
    pub const fn wager(&self) -> Chips {
        self.wager
    }

    /// Returns the preselected bet amount.
    #[must_use]
    pub const fn bet(&self) -> Chips {
        self.bet
    }

    /// Returns the result of the last settled round.
    #[must_use]
    pub const fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Returns the outcome message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        self.outcome.map(RoundOutcome::message)
    }

    /// Returns the number of cards left in the deck.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }

    /// Returns whether a double down would currently be accepted.
    #[must_use]
    pub fn can_double(&self) -> bool {
        self.state == GameState::PlayerTurn && self.player.len() == 2 && self.balance >= self.wager
    }

    /// Returns an owned copy of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> RoundView {
        RoundView {
            state: self.state,
            player_cards: self.player.cards().to_vec(),
            dealer_cards: self.dealer.cards().to_vec(),
            player_value: self.player.value(),
            dealer_display_value: self.dealer_display_value(),
            balance: self.balance,
            wager: self.wager,
            bet: self.bet,
            outcome: self.outcome,
        }
    }
}
