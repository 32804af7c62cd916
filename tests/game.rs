//! Game integration tests.

#![allow(clippy::float_cmp)]

use bjround::{
    ActionError, BetError, Card, Chips, Deck, Game, GameOptions, GameState, Rank, RoundError,
    RoundOutcome, RoundingMode, Suit,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Builds a deck dealt in the given order. Suits rotate so cards stay distinct
/// for small stacks.
fn stacked(ranks: &[Rank]) -> Deck {
    ranks
        .iter()
        .enumerate()
        .map(|(i, &rank)| Card::new(Suit::ALL[i % 4], rank))
        .collect::<Vec<_>>()
        .into()
}

fn chips(amount: u64) -> Chips {
    Chips::new(amount)
}

fn new_game() -> Game {
    Game::new(GameOptions::default(), 1)
}

#[test]
fn natural_pays_three_to_two_and_settles() {
    let mut game = new_game();

    let view = game
        .deal_from(
            chips(10),
            stacked(&[Rank::Ace, Rank::Nine, Rank::King, Rank::Seven]),
        )
        .unwrap();

    assert_eq!(view.state, GameState::Settled);
    assert_eq!(view.outcome, Some(RoundOutcome::Blackjack));
    assert_eq!(view.message(), Some("Blackjack! You win!"));
    assert!(RoundOutcome::Blackjack.is_win());
    assert_eq!(view.balance, chips(1015));
    assert_eq!(view.player_value, 21);
    // Dealer does not draw and the hole card is shown.
    assert_eq!(view.dealer_cards.len(), 2);
    assert_eq!(view.dealer_display_value, Some(16));
}

#[test]
fn opening_deal_alternates_player_and_dealer() {
    let mut game = new_game();
    let deck = stacked(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]);
    let order = deck.cards().to_vec();

    game.deal_from(chips(10), deck).unwrap();

    assert_eq!(game.player_hand().cards(), &[order[0], order[2]]);
    assert_eq!(game.dealer_hand().cards(), &[order[1], order[3]]);
    assert_eq!(game.cards_remaining(), 1);
    assert_eq!(game.state(), GameState::PlayerTurn);
    assert_eq!(game.balance(), chips(990));
    assert_eq!(game.wager(), chips(10));
}

#[test]
fn bust_forfeits_stake() {
    let mut game = new_game();
    game.deal_from(
        chips(10),
        stacked(&[Rank::Ten, Rank::Nine, Rank::Six, Rank::Eight, Rank::King]),
    )
    .unwrap();

    let view = game.hit().unwrap();
    assert_eq!(view.state, GameState::Settled);
    assert_eq!(view.outcome, Some(RoundOutcome::Bust));
    assert_eq!(view.player_value, 26);
    assert_eq!(view.balance, chips(990));
    assert_eq!(view.dealer_cards.len(), 2);
}

#[test]
fn push_returns_stake() {
    let mut game = new_game();
    game.deal_from(
        chips(10),
        stacked(&[Rank::King, Rank::Ten, Rank::Queen, Rank::Jack]),
    )
    .unwrap();

    let view = game.stand().unwrap();
    assert_eq!(view.outcome, Some(RoundOutcome::Push));
    assert_eq!(view.message(), Some("Push"));
    assert_eq!(view.balance, chips(1000));
    assert_eq!(view.state, GameState::Settled);
}

#[test]
fn dealer_bust_pays_even_money() {
    let mut game = new_game();
    game.deal_from(
        chips(10),
        stacked(&[Rank::Ten, Rank::Ten, Rank::Eight, Rank::Six, Rank::King]),
    )
    .unwrap();

    let view = game.stand().unwrap();
    assert_eq!(view.outcome, Some(RoundOutcome::DealerBust));
    assert_eq!(view.dealer_cards.len(), 3);
    assert_eq!(view.dealer_display_value, Some(26));
    assert_eq!(view.balance, chips(1010));
}

#[test]
fn higher_dealer_total_wins() {
    let mut game = new_game();
    game.deal_from(
        chips(10),
        stacked(&[Rank::Ten, Rank::Ten, Rank::Seven, Rank::Nine]),
    )
    .unwrap();

    let view = game.stand().unwrap();
    assert_eq!(view.outcome, Some(RoundOutcome::Lose));
    assert_eq!(view.message(), Some("Dealer wins"));
    assert!(!RoundOutcome::Lose.is_win());
    assert_eq!(view.balance, chips(990));
}

#[test]
fn hitting_to_twenty_one_stands_automatically() {
    let mut game = new_game();
    game.deal_from(
        chips(10),
        stacked(&[Rank::Five, Rank::Ten, Rank::Six, Rank::Seven, Rank::King]),
    )
    .unwrap();

    let view = game.hit().unwrap();
    assert_eq!(view.player_value, 21);
    assert_eq!(view.state, GameState::Settled);
    assert_eq!(view.outcome, Some(RoundOutcome::Win));
    // Dealer already on 17, no draw.
    assert_eq!(view.dealer_cards.len(), 2);
    assert_eq!(view.balance, chips(1010));
}

#[test]
fn hit_below_twenty_one_keeps_player_turn() {
    let mut game = new_game();
    game.deal_from(
        chips(10),
        stacked(&[Rank::Two, Rank::Ten, Rank::Three, Rank::Seven, Rank::Four]),
    )
    .unwrap();

    let view = game.hit().unwrap();
    assert_eq!(view.state, GameState::PlayerTurn);
    assert_eq!(view.player_value, 9);
    assert_eq!(view.dealer_display_value, None);
    assert!(!game.can_double());
}

#[test]
fn double_down_doubles_exposure_and_stands() {
    let mut game = new_game();
    game.deal_from(
        chips(10),
        stacked(&[
            Rank::Five,
            Rank::Ten,
            Rank::Six,
            Rank::Six,
            Rank::Nine,
            Rank::Two,
        ]),
    )
    .unwrap();
    assert!(game.can_double());

    let view = game.double_down().unwrap();
    assert_eq!(view.wager, chips(20));
    assert_eq!(view.player_cards.len(), 3);
    assert_eq!(view.player_value, 20);
    assert_eq!(view.dealer_cards.len(), 3);
    assert_eq!(view.outcome, Some(RoundOutcome::Win));
    // 1000 - 10 - 10 + 40
    assert_eq!(view.balance, chips(1020));
    // Preselected bet keeps the placed amount.
    assert_eq!(view.bet, chips(10));
}

#[test]
fn double_down_bust_loses_both_stakes() {
    let mut game = new_game();
    game.deal_from(
        chips(10),
        stacked(&[Rank::Ten, Rank::Nine, Rank::Two, Rank::Nine, Rank::King]),
    )
    .unwrap();

    let view = game.double_down().unwrap();
    assert_eq!(view.outcome, Some(RoundOutcome::Bust));
    assert_eq!(view.wager, chips(20));
    assert_eq!(view.balance, chips(980));
    assert_eq!(view.dealer_cards.len(), 2);
}

#[test]
fn double_down_requires_balance_and_two_cards() {
    let options = GameOptions::default().with_initial_balance(chips(15));
    let mut game = Game::new(options, 3);
    game.deal_from(
        chips(10),
        stacked(&[
            Rank::Two,
            Rank::Ten,
            Rank::Three,
            Rank::Seven,
            Rank::Four,
            Rank::Five,
        ]),
    )
    .unwrap();

    let before = game.snapshot();
    assert!(!game.can_double());
    assert_eq!(
        game.double_down().unwrap_err(),
        ActionError::InsufficientBalance
    );
    assert_eq!(game.snapshot(), before);

    // Player may still act normally.
    game.hit().unwrap();
    assert_eq!(game.double_down().unwrap_err(), ActionError::CannotDouble);
}

#[test]
fn invalid_bets_leave_state_unchanged() {
    let mut game = new_game();
    let before = game.snapshot();

    assert_eq!(game.place_bet(chips(0)).unwrap_err(), BetError::InvalidBet);
    assert_eq!(game.place_bet(chips(1001)).unwrap_err(), BetError::InvalidBet);
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.state(), GameState::Betting);

    assert_eq!(BetError::InvalidBet.to_string(), "invalid bet amount");
}

#[test]
fn whole_balance_can_be_bet() {
    let mut game = new_game();
    game.deal_from(
        chips(1000),
        stacked(&[Rank::Ten, Rank::Ten, Rank::Seven, Rank::Nine]),
    )
    .unwrap();
    game.stand().unwrap();
    assert_eq!(game.balance(), chips(0));

    game.new_round().unwrap();
    assert_eq!(game.place_bet(chips(1)).unwrap_err(), BetError::InvalidBet);
}

#[test]
fn commands_outside_their_phase_are_rejected() {
    let mut game = new_game();
    let betting = game.snapshot();

    assert_eq!(game.hit().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.stand().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.double_down().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.new_round().unwrap_err(), RoundError::InvalidState);
    assert_eq!(game.snapshot(), betting);

    game.deal_from(
        chips(10),
        stacked(&[Rank::Ten, Rank::Ten, Rank::Seven, Rank::Nine, Rank::Two]),
    )
    .unwrap();
    let playing = game.snapshot();
    assert_eq!(game.place_bet(chips(10)).unwrap_err(), BetError::InvalidState);
    assert_eq!(game.max_bet().unwrap_err(), BetError::InvalidState);
    assert_eq!(game.new_round().unwrap_err(), RoundError::InvalidState);
    assert_eq!(game.snapshot(), playing);

    game.stand().unwrap();
    let settled = game.snapshot();
    assert_eq!(game.hit().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.stand().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.split().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.snapshot(), settled);
}

#[test]
fn split_is_disabled() {
    let mut game = new_game();
    game.deal_from(
        chips(10),
        stacked(&[Rank::Eight, Rank::Ten, Rank::Eight, Rank::Seven]),
    )
    .unwrap();
    let before = game.snapshot();

    assert_eq!(game.split().unwrap_err(), ActionError::SplitDisabled);
    assert_eq!(game.snapshot(), before);
}

#[test]
fn dealer_hole_card_hidden_during_player_turn() {
    let mut game = new_game();
    assert_eq!(game.dealer_display_value(), Some(0));

    game.deal_from(
        chips(10),
        stacked(&[Rank::Two, Rank::Ten, Rank::Three, Rank::Seven, Rank::Four]),
    )
    .unwrap();

    assert_eq!(game.dealer_display_value(), None);
    assert_eq!(game.dealer_value(), 17);
    let visible: Vec<_> = game.dealer_visible_cards().collect();
    assert_eq!(visible.len(), 2);
    assert!(visible[0].is_some());
    assert!(visible[1].is_none());

    game.stand().unwrap();
    assert_eq!(game.dealer_display_value(), Some(17));
    assert!(game.dealer_visible_cards().all(|card| card.is_some()));
}

#[test]
fn short_deck_is_reported_without_mutation() {
    let mut game = new_game();
    let before = game.snapshot();
    assert_eq!(
        game.deal_from(chips(10), stacked(&[Rank::Two, Rank::Three, Rank::Four]))
            .unwrap_err(),
        BetError::DeckExhausted
    );
    assert_eq!(game.snapshot(), before);

    // Four cards deal fine, but nothing is left to hit.
    game.deal_from(chips(10), stacked(&[Rank::Five, Rank::Two, Rank::Six, Rank::Three]))
        .unwrap();
    let dealt = game.snapshot();
    assert_eq!(game.hit().unwrap_err(), ActionError::DeckExhausted);
    assert_eq!(game.stand().unwrap_err(), ActionError::DeckExhausted);
    assert_eq!(game.double_down().unwrap_err(), ActionError::DeckExhausted);
    assert_eq!(game.snapshot(), dealt);
}

#[test]
fn new_round_clears_hands_and_keeps_balance() {
    let mut game = new_game();
    game.deal_from(
        chips(25),
        stacked(&[Rank::Ten, Rank::Ten, Rank::Nine, Rank::Eight]),
    )
    .unwrap();
    game.stand().unwrap();
    assert_eq!(game.balance(), chips(1025));

    let view = game.new_round().unwrap();
    assert_eq!(view.state, GameState::Betting);
    assert!(view.player_cards.is_empty());
    assert!(view.dealer_cards.is_empty());
    assert_eq!(view.outcome, None);
    assert_eq!(view.wager, chips(0));
    assert_eq!(view.balance, chips(1025));
    assert_eq!(view.bet, chips(25));

    let view = game.place_default_bet().unwrap();
    assert_ne!(view.state, GameState::Betting);
    assert_eq!(view.wager, chips(25));
}

#[test]
fn bet_controls() {
    let options = GameOptions::default()
        .with_initial_balance(chips(100))
        .with_default_bet(chips(30));
    let mut game = Game::new(options, 5);

    assert_eq!(game.halve_bet(), Ok(chips(15)));
    assert_eq!(game.double_bet(), Ok(chips(30)));
    assert_eq!(game.double_bet(), Ok(chips(60)));
    assert_eq!(game.double_bet(), Ok(chips(100)));
    assert_eq!(game.max_bet(), Ok(chips(100)));
    assert_eq!(game.set_bet(chips(5)), Ok(chips(5)));
    assert_eq!(game.halve_bet(), Ok(Chips::from_cents(250)));
    assert_eq!(game.halve_bet(), Ok(Chips::from_cents(125)));
    assert_eq!(game.halve_bet(), Ok(chips(1)));
    assert_eq!(game.halve_bet(), Ok(chips(1)));
    assert_eq!(game.set_bet(chips(500)), Ok(chips(500)));
    assert_eq!(game.place_default_bet().unwrap_err(), BetError::InvalidBet);
}

#[test]
fn natural_on_odd_wager_pays_the_half_chip() {
    let mut game = new_game();
    let view = game
        .deal_from(
            chips(5),
            stacked(&[Rank::Ace, Rank::Nine, Rank::King, Rank::Seven]),
        )
        .unwrap();

    assert_eq!(view.outcome, Some(RoundOutcome::Blackjack));
    // 995 + 5 * 2.5
    assert_eq!(view.balance, Chips::from_cents(100_750));
    assert_eq!(view.balance.to_string(), "1007.50");
}

#[test]
fn blackjack_payout_rounding() {
    let natural = [Rank::Ace, Rank::Nine, Rank::Queen, Rank::Seven];
    let five_cents = Chips::from_cents(5);

    // 1.5 * 5 cents falls between two cents.
    let mut down = Game::new(GameOptions::default(), 1);
    down.deal_from(five_cents, stacked(&natural)).unwrap();
    assert_eq!(down.balance(), Chips::from_cents(100_000 - 5 + 5 + 7));

    let options = GameOptions::default().with_rounding_blackjack(RoundingMode::Up);
    let mut up = Game::new(options, 1);
    up.deal_from(five_cents, stacked(&natural)).unwrap();
    assert_eq!(up.balance(), Chips::from_cents(100_000 - 5 + 5 + 8));

    let options = GameOptions::default().with_blackjack_pays(1.2);
    let mut six_five = Game::new(options, 1);
    six_five.deal_from(chips(10), stacked(&natural)).unwrap();
    assert_eq!(six_five.balance(), chips(1000 - 10 + 10 + 12));
}

#[test]
fn settlement_saturates_at_max_balance() {
    let options = GameOptions::default().with_initial_balance(Chips::MAX);

    let mut game = Game::new(options.clone(), 1);
    game.deal_from(
        Chips::MAX,
        stacked(&[Rank::Ten, Rank::Ten, Rank::Ten, Rank::Seven]),
    )
    .unwrap();
    assert_eq!(game.balance(), Chips::ZERO);
    let view = game.stand().unwrap();
    assert_eq!(view.outcome, Some(RoundOutcome::Win));
    assert_eq!(view.balance, Chips::MAX);

    let mut natural = Game::new(options.clone(), 1);
    let view = natural
        .deal_from(
            Chips::MAX,
            stacked(&[Rank::Ace, Rank::Nine, Rank::King, Rank::Seven]),
        )
        .unwrap();
    assert_eq!(view.outcome, Some(RoundOutcome::Blackjack));
    assert_eq!(view.balance, Chips::MAX);

    let mut doubled = Game::new(options, 1);
    doubled
        .deal_from(
            Chips::MAX.half(),
            stacked(&[
                Rank::Five,
                Rank::Ten,
                Rank::Six,
                Rank::Six,
                Rank::Nine,
                Rank::Two,
            ]),
        )
        .unwrap();
    let view = doubled.double_down().unwrap();
    assert_eq!(view.outcome, Some(RoundOutcome::Win));
    assert_eq!(view.wager, Chips::MAX.half().saturating_mul(2));
    assert_eq!(view.balance, Chips::MAX);
}

#[test]
fn options_builder_sets_fields() {
    let options = GameOptions::default()
        .with_initial_balance(chips(50))
        .with_default_bet(chips(2))
        .with_blackjack_pays(1.2)
        .with_rounding_blackjack(RoundingMode::Nearest);

    assert_eq!(options.initial_balance, chips(50));
    assert_eq!(options.default_bet, chips(2));
    assert_eq!(options.blackjack_pays, 1.2);
    assert_eq!(options.rounding_blackjack, RoundingMode::Nearest);

    let game = Game::new(options, 9);
    assert_eq!(game.balance(), chips(50));
    assert_eq!(game.bet(), chips(2));
    assert_eq!(game.cards_remaining(), 52);
}

#[test]
fn same_seed_deals_same_rounds() {
    let mut a = Game::new(GameOptions::default(), 1234);
    let mut b = Game::new(GameOptions::default(), 1234);

    for _ in 0..5 {
        assert_eq!(a.place_bet(chips(10)).unwrap(), b.place_bet(chips(10)).unwrap());
        if a.state() == GameState::PlayerTurn {
            assert_eq!(a.stand().unwrap(), b.stand().unwrap());
        }
        a.new_round().unwrap();
        b.new_round().unwrap();
    }
}

#[test]
fn dealer_always_finishes_on_seventeen_or_bust() {
    for seed in 0..300 {
        let mut game = Game::new(GameOptions::default(), seed);
        game.place_bet(chips(10)).unwrap();
        if game.state() != GameState::PlayerTurn {
            continue;
        }

        let opening_value = game.dealer_value();
        game.stand().unwrap();

        let dealer = game.dealer_hand();
        assert!(dealer.value() >= 17, "seed {seed}: dealer {}", dealer.value());
        if opening_value >= 17 {
            assert_eq!(dealer.len(), 2, "seed {seed}: drew on {opening_value}");
        }
        // Every card before the last was drawn below 17.
        let cards = dealer.cards();
        for end in 2..cards.len() {
            assert!(bjround::hand_value(&cards[..end]) < 17, "seed {seed}");
        }
    }
}

#[test]
fn random_play_conserves_chips() {
    let mut driver = ChaCha8Rng::seed_from_u64(77);

    for seed in 0..50 {
        let options = GameOptions::default().with_initial_balance(chips(200));
        let mut game = Game::new(options, seed);

        for _ in 0..40 {
            if game.balance().is_zero() {
                break;
            }

            let before = game.balance().cents();
            let amount = Chips::from_cents(driver.random_range(1..=before));
            game.place_bet(amount).unwrap();

            while game.state() == GameState::PlayerTurn {
                let result = match driver.random_range(0..3) {
                    0 => game.hit(),
                    1 => game.stand(),
                    _ => game.double_down(),
                };
                if let Err(err) = result {
                    assert!(
                        matches!(
                            err,
                            ActionError::InsufficientBalance | ActionError::CannotDouble
                        ),
                        "unexpected {err:?}"
                    );
                }
            }

            assert_eq!(game.state(), GameState::Settled);
            let wager = game.wager().cents();
            let after = game.balance().cents();
            let expected = match game.outcome().unwrap() {
                RoundOutcome::Blackjack => before + wager * 3 / 2,
                RoundOutcome::Win | RoundOutcome::DealerBust => before + wager,
                RoundOutcome::Push => before,
                RoundOutcome::Bust | RoundOutcome::Lose => before - wager,
            };
            assert_eq!(after, expected, "seed {seed}");

            game.new_round().unwrap();
        }
    }
}
