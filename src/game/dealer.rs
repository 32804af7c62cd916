use tracing::{debug, error, info};

use crate::card::Deck;
use crate::chips::Chips;
use crate::error::ActionError;
use crate::hand::{BLACKJACK, Hand};
use crate::options::RoundingMode;
use crate::policy::should_draw;
use crate::result::RoundOutcome;

use super::{Game, GameState};

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> u64 {
    match mode {
        RoundingMode::Up => amount.ceil() as u64,
        RoundingMode::Down => amount.floor() as u64,
        RoundingMode::Nearest => amount.round() as u64,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> u64 {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as u64,
        RoundingMode::Down => libm::floor(amount) as u64,
        RoundingMode::Nearest => libm::round(amount) as u64,
    }
}

/// Compares two standing hands. The player is known not to be bust.
pub(super) const fn compare_hands(player_value: u8, dealer_value: u8) -> RoundOutcome {
    if dealer_value > BLACKJACK {
        RoundOutcome::DealerBust
    } else if player_value > dealer_value {
        RoundOutcome::Win
    } else if player_value < dealer_value {
        RoundOutcome::Lose
    } else {
        RoundOutcome::Push
    }
}

impl<R> Game<R> {
    /// Plays the dealer's hand on `deck` until the policy says stand.
    ///
    /// Works on the caller's copies so a failure leaves the engine untouched.
    pub(super) fn play_dealer(&self, deck: &mut Deck, dealer: &mut Hand) -> Result<(), ActionError> {
        while should_draw(dealer.value()) {
            let card = deck.draw_one().map_err(|err| {
                error!(%err, dealer_value = dealer.value(), "deck exhausted during dealer turn");
                ActionError::from(err)
            })?;
            dealer.add_card(card);
            debug!(%card, dealer_value = dealer.value(), "dealer draws");
        }

        debug!(dealer_value = dealer.value(), "dealer stands");
        Ok(())
    }

    /// Returns the amount credited back to the balance for `outcome`.
    ///
    /// Blackjack winnings that fall between two cents are rounded with
    /// `rounding_blackjack`.
    pub(super) fn payout(&self, outcome: RoundOutcome) -> Chips {
        let wager = self.wager;
        match outcome {
            RoundOutcome::Blackjack => {
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "f64 has sufficient precision for monetary values"
                )]
                let winnings = (wager.cents() as f64) * self.options.blackjack_pays;
                let winnings = round_amount(winnings, self.options.rounding_blackjack);
                wager + Chips::from_cents(winnings)
            }
            RoundOutcome::Win | RoundOutcome::DealerBust => wager.saturating_mul(2),
            RoundOutcome::Push => wager,
            RoundOutcome::Bust | RoundOutcome::Lose => Chips::ZERO,
        }
    }

    /// Pays `outcome` and moves to [`GameState::Settled`]. The balance
    /// saturates at [`Chips::MAX`].
    pub(super) fn settle(&mut self, outcome: RoundOutcome) {
        let payout = self.payout(outcome);
        self.balance += payout;
        self.outcome = Some(outcome);
        self.state = GameState::Settled;

        info!(
            ?outcome,
            wager = %self.wager,
            %payout,
            balance = %self.balance,
            player_value = self.player.value(),
            dealer_value = self.dealer.value(),
            "round settled"
        );
    }
}
