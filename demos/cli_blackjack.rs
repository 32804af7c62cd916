//! CLI blackjack example.
//!
//! Set `RUST_LOG=bjround=debug` to see the engine's trace output.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjround::{Card, Chips, Game, GameOptions, GameState};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    println!("Blackjack CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut game = Game::new(GameOptions::default(), seed);

    loop {
        if game.balance().is_zero() {
            println!("You are out of money. Game over.");
            break;
        }

        if !betting_prompt(&mut game) {
            println!("Goodbye.");
            break;
        }

        while game.state() == GameState::PlayerTurn {
            print_table(&game);
            println!("{}", format_actions(&game));

            let result = match prompt_line("Action: ").as_str() {
                "h" | "hit" => game.hit(),
                "s" | "stand" => game.stand(),
                "d" | "double" => game.double_down(),
                "p" | "split" => game.split(),
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            if let Err(err) = result {
                println!("{err}");
            }
        }

        print_table(&game);
        if let Some(message) = game.message() {
            println!("{message}");
        }

        if let Err(err) = game.new_round() {
            println!("{err}");
        }
    }
}

/// Runs the betting controls until a bet is placed. Returns `false` to quit.
fn betting_prompt(game: &mut Game) -> bool {
    loop {
        let balance = game.balance();
        let bet = game.bet();
        let input = prompt_line(&format!(
            "Balance {balance}. Bet {bet} ([enter] deal, number, [h]alf, [2]x, [m]ax, [q]uit): "
        ));

        let adjusted = match input.as_str() {
            "" => match game.place_default_bet() {
                Ok(_) => return true,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            },
            "q" | "quit" => return false,
            "h" | "half" => game.halve_bet(),
            "2" | "2x" => game.double_bet(),
            "m" | "max" => game.max_bet(),
            other => match other.parse::<Chips>() {
                Ok(amount) => game.set_bet(amount),
                Err(err) => {
                    println!("{err}: enter an amount such as 10 or 2.50.");
                    continue;
                }
            },
        };

        if let Err(err) = adjusted {
            println!("{err}");
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return "q".to_string();
    }
    input.trim().to_lowercase()
}

fn print_table(game: &Game) {
    let dealer = game
        .dealer_visible_cards()
        .map(|card| card.map_or_else(|| "??".to_string(), |card| format_card(&card)))
        .collect::<Vec<_>>()
        .join(" ");
    let dealer_value = game
        .dealer_display_value()
        .map_or_else(|| "?".to_string(), |value| value.to_string());
    println!("\nDealer: {dealer} (value {dealer_value})");

    let player = game
        .player_hand()
        .cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "You:    {player} (value {}) | wager {} | deck {}",
        game.player_value(),
        game.wager(),
        game.cards_remaining()
    );
    println!();
}

fn format_actions(game: &Game) -> String {
    let parts = [
        format_action("hit", "h", true),
        format_action("stand", "s", true),
        format_action("double", "d", game.can_double()),
        format_action("split", "p", false),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_card(card: &Card) -> String {
    let color_code = if card.suit.is_red() { "31" } else { "37" };
    colorize(&card.to_string(), color_code)
}
