//! CLI blackjack demo.
//!
//! Every command is handled by a fresh engine over the same JSON file, the
//! way separate button presses reach a chat bot. Games survive restarts.
//!
//! Commands: `start [player]`, `hit [player]`, `stand [player]`, `q`.
//! The store path comes from `BJTABLE_STORE` (default `games.json`) and log
//! filtering from `RUST_LOG`.

#![allow(clippy::missing_docs_in_private_items)]

use std::env;
use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjtable::{
    ActionError, Card, GameEngine, GameOptions, HandOutcome, HitResult, JsonFileStore, PlayerId,
    StandResult, Suit,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_PLAYER: PlayerId = 1;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let path = env::var("BJTABLE_STORE").unwrap_or_else(|_| "games.json".to_string());
    println!("Blackjack CLI demo, games stored in {path} (type 'q' to quit)");

    loop {
        let line = prompt_line("> ");
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        let player = match words.next().map(str::parse::<PlayerId>) {
            None => DEFAULT_PLAYER,
            Some(Ok(id)) => id,
            Some(Err(_)) => {
                println!("Player must be a number.");
                continue;
            }
        };

        let engine = GameEngine::new(JsonFileStore::new(&path), GameOptions::default(), seed());

        match command {
            "start" | "s" => match engine.start(player) {
                Ok(deal) => {
                    println!("Dealer's cards: {}", format_cards(deal.dealer_hand.cards()));
                    println!("Your cards: {}", format_cards(deal.player_hand.cards()));
                    print_actions();
                }
                Err(err) => println!("{err}"),
            },
            "hit" | "h" => match engine.hit(player) {
                Ok(HitResult::InProgress { card, hand, .. }) => {
                    println!("You drew: {}", format_card(&card));
                    println!("Your cards: {}", format_cards(hand.cards()));
                    print_actions();
                }
                Ok(HitResult::Bust { card, hand, score }) => {
                    println!("You drew: {}", format_card(&card));
                    println!("Your cards: {}", format_cards(hand.cards()));
                    println!("Bust! Your score: {score}. You lose.");
                }
                Ok(HitResult::Resolved(result)) => print_result(&result),
                Err(err) => print_action_error(&err),
            },
            "stand" | "t" => {
                let result = engine.stand_with(player, |card| {
                    println!("Dealer drew {}!", format_card(card));
                });
                match result {
                    Ok(result) => print_result(&result),
                    Err(err) => print_action_error(&err),
                }
            }
            "q" | "quit" => {
                println!("Goodbye.");
                break;
            }
            _ => println!("Unknown command."),
        }
    }
}

fn seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut input = String::new();
    if io::stdin().read_line(&mut input).unwrap_or(0) == 0 {
        return "q".to_string();
    }
    input.trim().to_lowercase()
}

fn print_actions() {
    println!("[hit] or [stand]?");
}

fn print_action_error(err: &ActionError) {
    match err {
        ActionError::GameNotFound => println!("Game not found. Type 'start' to play."),
        ActionError::DeckExhausted => println!("You can't draw more cards, the deck is exhausted."),
        ActionError::Storage(err) => println!("Could not load your game: {err}"),
    }
}

fn print_result(result: &StandResult) {
    println!("\nGame over!");
    println!(
        "Dealer's cards: {} (score {})",
        format_cards(result.dealer_hand.cards()),
        result.dealer_value
    );
    println!(
        "Your cards: {} (score {})",
        format_cards(result.player_hand.cards()),
        result.player_value
    );
    match result.outcome {
        HandOutcome::Win => println!("{}", colorize("You win!", "32")),
        HandOutcome::Lose => println!("{}", colorize("You lose.", "31")),
        HandOutcome::Push => println!("Push."),
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\x1b[{code}m{text}\x1b[0m")
}

fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    colorize(&card.to_string(), color_code)
}
