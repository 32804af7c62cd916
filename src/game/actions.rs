use rand::Rng;
use tracing::{debug, error, warn};

use crate::card::Deck;
use crate::error::ActionError;
use crate::hand::{BLACKJACK, Hand};
use crate::result::{RoundOutcome, RoundView};

use super::dealer::compare_hands;
use super::{Game, GameState};

/// Where the round goes after the player receives a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerTransition {
    /// Player keeps acting.
    Continue,
    /// Player is done; the dealer plays and the hands are compared.
    Stand,
    /// Player busted; the round is lost without a dealer turn.
    Bust,
}

impl PlayerTransition {
    /// Guard evaluated after every player card. Reaching 21 stands
    /// automatically; `forced` stands on anything that did not bust.
    const fn after_card(value: u8, forced: bool) -> Self {
        if value > BLACKJACK {
            Self::Bust
        } else if value == BLACKJACK || forced {
            Self::Stand
        } else {
            Self::Continue
        }
    }
}

/// Fully computed result of a player action, applied only once nothing can fail.
struct Resolution {
    deck: Deck,
    player: Hand,
    dealer: Hand,
    transition: PlayerTransition,
}

impl<R: Rng> Game<R> {
    fn ensure_player_turn(&self, action: &'static str) -> Result<(), ActionError> {
        if self.state != GameState::PlayerTurn {
            warn!(action, state = ?self.state, "action rejected outside player turn");
            return Err(ActionError::InvalidState);
        }

        Ok(())
    }

    /// Deals one card to a copy of the player's hand and runs the transition
    /// guard, playing the dealer out on copies when the player stands.
    fn resolve(&self, mut player: Hand, forced: bool) -> Result<Resolution, ActionError> {
        let mut deck = self.deck.clone();
        let mut dealer = self.dealer.clone();

        let card = deck.draw_one().map_err(|err| {
            error!(%err, player_value = player.value(), "deck exhausted during player turn");
            ActionError::from(err)
        })?;
        player.add_card(card);
        debug!(%card, player_value = player.value(), "player draws");

        let transition = PlayerTransition::after_card(player.value(), forced);
        if transition == PlayerTransition::Stand {
            self.play_dealer(&mut deck, &mut dealer)?;
        }

        Ok(Resolution {
            deck,
            player,
            dealer,
            transition,
        })
    }

    /// Commits a resolution and settles the round if it ended.
    fn apply(&mut self, resolution: Resolution) {
        self.deck = resolution.deck;
        self.player = resolution.player;

        match resolution.transition {
            PlayerTransition::Continue => {}
            PlayerTransition::Bust => self.settle(RoundOutcome::Bust),
            PlayerTransition::Stand => {
                self.state = GameState::DealerTurn;
                self.dealer = resolution.dealer;
                let outcome = compare_hands(self.player.value(), self.dealer.value());
                self.settle(outcome);
            }
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// Busting settles the round as a loss. Reaching 21 stands automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, or the deck
    /// runs out.
    pub fn hit(&mut self) -> Result<RoundView, ActionError> {
        self.ensure_player_turn("hit")?;

        let resolution = self.resolve(self.player.clone(), false)?;
        self.apply(resolution);

        Ok(self.snapshot())
    }

    /// Player action: Stand (keep current hand).
    ///
    /// The dealer draws until the policy stands, then the hands are compared.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, or the deck
    /// runs out during the dealer's turn.
    pub fn stand(&mut self) -> Result<RoundView, ActionError> {
        self.ensure_player_turn("stand")?;

        let mut deck = self.deck.clone();
        let mut dealer = self.dealer.clone();
        self.play_dealer(&mut deck, &mut dealer)?;

        self.state = GameState::DealerTurn;
        self.deck = deck;
        self.dealer = dealer;
        let outcome = compare_hands(self.player.value(), self.dealer.value());
        self.settle(outcome);

        Ok(self.snapshot())
    }

    /// Player action: Double down (double the wager, receive one card, then
    /// stand).
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, the hand does
    /// not hold exactly two cards, the balance cannot cover the additional
    /// stake, or the deck runs out.
    pub fn double_down(&mut self) -> Result<RoundView, ActionError> {
        self.ensure_player_turn("double_down")?;

        // Can only double on first two cards
        if self.player.len() != 2 {
            return Err(ActionError::CannotDouble);
        }

        if self.balance < self.wager {
            debug!(
                balance = %self.balance,
                wager = %self.wager,
                "double down needs more balance"
            );
            return Err(ActionError::InsufficientBalance);
        }

        let resolution = self.resolve(self.player.clone(), true)?;

        self.balance -= self.wager;
        self.wager = self.wager.saturating_mul(2);
        debug!(wager = %self.wager, balance = %self.balance, "wager doubled");
        self.apply(resolution);

        Ok(self.snapshot())
    }

    /// Player action: Split. Not offered at this table.
    ///
    /// # Errors
    ///
    /// Always returns an error: [`ActionError::InvalidState`] outside the
    /// player's turn, [`ActionError::SplitDisabled`] otherwise.
    pub fn split(&mut self) -> Result<RoundView, ActionError> {
        self.ensure_player_turn("split")?;
        Err(ActionError::SplitDisabled)
    }
}
