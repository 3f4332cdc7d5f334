//! Game integration tests.

#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use bjtable::{
    ActionError, BLACKJACK, Card, DECK_SIZE, GameEngine, GameMap, GameOptions, GameState,
    GameStore, Hand, HandOutcome, HitResult, InvalidGameError, MemoryStore, ParseCardError,
    PlayerId, StartError, StoreError, Suit, draw_probability, hand_value, shuffled_deck,
    standard_deck,
};
use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator returning the same word forever.
///
/// `0` rolls 0.0 so the dealer always draws while under 21; `u64::MAX` rolls
/// just under 1.0 so the dealer never draws.
struct ConstRng(u64);

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(self.0 as u8);
    }
}

const ALWAYS_DRAW: ConstRng = ConstRng(0);
const NEVER_DRAW: ConstRng = ConstRng(u64::MAX);

fn card(notation: &str) -> Card {
    notation.parse().unwrap()
}

fn cards(notation: &[&str]) -> Vec<Card> {
    notation.iter().map(|c| card(c)).collect()
}

/// A full deck whose first cards are `top`, followed by the rest in standard order.
fn deck_with_top(top: &[&str]) -> Vec<Card> {
    let mut deck = cards(top);
    for c in standard_deck() {
        if !deck.contains(&c) {
            deck.push(c);
        }
    }
    deck
}

/// Store whose reads or writes can be made to fail, backed by a [`MemoryStore`].
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_reads: bool,
    fail_writes: bool,
}

impl FlakyStore {
    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads {
            return Err(StoreError::Read("permission denied".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Write("disk full".to_string()));
        }
        Ok(())
    }
}

impl GameStore for FlakyStore {
    fn load_all(&self) -> Result<GameMap, StoreError> {
        self.check_read()?;
        self.inner.load_all()
    }

    fn save_all(&self, games: &GameMap) -> Result<(), StoreError> {
        self.check_write()?;
        self.inner.save_all(games)
    }

    fn get(&self, player_id: PlayerId) -> Result<Option<GameState>, StoreError> {
        self.check_read()?;
        self.inner.get(player_id)
    }

    fn put(&self, state: &GameState) -> Result<(), StoreError> {
        self.check_write()?;
        self.inner.put(state)
    }

    fn delete(&self, player_id: PlayerId) -> Result<bool, StoreError> {
        self.check_write()?;
        self.inner.delete(player_id)
    }
}

fn engine_with(rng: ConstRng, options: GameOptions) -> GameEngine<MemoryStore, ConstRng> {
    GameEngine::with_rng(MemoryStore::new(), options, rng)
}

#[test]
fn hand_values_follow_soft_ace_rules() {
    assert_eq!(hand_value(&cards(&["A♠", "A♥", "A♦", "A♣"])), 14);
    assert_eq!(hand_value(&cards(&["10♠", "A♥"])), 21);
    assert_eq!(hand_value(&cards(&["K♠", "Q♥"])), 20);
    assert_eq!(hand_value(&cards(&["5♠", "5♥", "5♦"])), 15);
    assert_eq!(hand_value(&cards(&["A♠", "9♥", "A♦"])), 21);
    assert_eq!(hand_value(&cards(&["A♠", "K♥", "Q♦"])), 21);
    assert_eq!(hand_value(&cards(&["K♠", "Q♥", "5♦"])), 25);
    assert_eq!(hand_value(&[]), 0);
}

#[test]
fn soft_flag_tracks_aces_counted_as_eleven() {
    let soft: bjtable::Hand = cards(&["A♠", "6♥"]).into();
    assert_eq!(soft.value(), 17);
    assert!(soft.is_soft());

    let hard: bjtable::Hand = cards(&["A♠", "6♥", "10♦"]).into();
    assert_eq!(hard.value(), 17);
    assert!(!hard.is_soft());
    assert!(!hard.is_bust());
}

#[test]
fn card_notation_parses_and_displays() {
    assert_eq!(card("10♠"), Card::new(Suit::Spades, 10));
    assert_eq!(card("A♥"), Card::new(Suit::Hearts, 1));
    assert_eq!(card("Q♣").to_string(), "Q♣");
    assert_eq!(Card::new(Suit::Diamonds, 13).to_string(), "K♦");

    assert_eq!("".parse::<Card>(), Err(ParseCardError::Empty));
    assert_eq!("1♠".parse::<Card>(), Err(ParseCardError::InvalidRank));
    assert_eq!("11♠".parse::<Card>(), Err(ParseCardError::InvalidRank));
    assert_eq!("10x".parse::<Card>(), Err(ParseCardError::InvalidSuit));
}

#[test]
fn shuffled_deck_has_every_card_once() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let deck = shuffled_deck(&mut rng);
    assert_eq!(deck.len(), DECK_SIZE);

    let unique: HashSet<Card> = deck.iter().copied().collect();
    assert_eq!(unique.len(), DECK_SIZE);

    for suit in Suit::ALL {
        for rank in 1..=13 {
            assert_eq!(
                deck.iter().filter(|c| **c == Card::new(suit, rank)).count(),
                1
            );
        }
    }
}

#[test]
fn deal_interleaves_player_and_dealer() {
    let deck = deck_with_top(&["2♠", "3♥", "4♦", "5♣"]);
    let state = GameState::deal(9, deck.clone());

    assert_eq!(state.player_hand.cards(), cards(&["2♠", "4♦"]).as_slice());
    assert_eq!(state.dealer_hand.cards(), cards(&["3♥", "5♣"]).as_slice());
    assert_eq!(state.cursor, 4);
    assert_eq!(state.deck, deck);
    assert_eq!(state.cards_remaining(), DECK_SIZE - 4);
}

#[test]
fn start_stores_a_new_game() {
    let engine = GameEngine::new(MemoryStore::new(), GameOptions::default(), 42);
    let deal = engine.start(5).unwrap();
    let player: PlayerId = deal.player_id;
    assert_eq!(player, 5);

    let stored = engine.store().get(5).unwrap().unwrap();
    assert_eq!(stored.cursor, 4);
    assert_eq!(stored.deck.len(), DECK_SIZE);
    assert_eq!(stored.player_hand, deal.player_hand);
    assert_eq!(stored.dealer_hand, deal.dealer_hand);
    assert_eq!(deal.player_hand.cards(), &[stored.deck[0], stored.deck[2]]);
    assert_eq!(deal.dealer_hand.cards(), &[stored.deck[1], stored.deck[3]]);
}

#[test]
fn same_seed_deals_same_game() {
    let first = GameEngine::new(MemoryStore::new(), GameOptions::default(), 11);
    let second = GameEngine::new(MemoryStore::new(), GameOptions::default(), 11);

    assert_eq!(first.start(1).unwrap(), second.start(1).unwrap());
}

#[test]
fn start_replaces_or_rejects_game_in_progress() {
    let engine = GameEngine::new(MemoryStore::new(), GameOptions::default(), 1);
    engine.start(1).unwrap();
    engine.start(1).unwrap();
    assert_eq!(engine.store().len(), 1);

    let strict = GameEngine::new(
        MemoryStore::new(),
        GameOptions::default().with_replace_in_progress(false),
        1,
    );
    strict.start(1).unwrap();
    assert_eq!(strict.start(1).unwrap_err(), StartError::GameInProgress);
    strict.start(2).unwrap();
}

#[test]
fn hit_draws_next_card_and_saves() {
    let engine = engine_with(NEVER_DRAW, GameOptions::default());
    let state = GameState::deal(1, deck_with_top(&["5♠", "9♥", "6♦", "7♣", "4♥"]));
    engine.store().put(&state).unwrap();

    let HitResult::InProgress {
        card: drawn,
        hand,
        next_actions,
    } = engine.hit(1).unwrap()
    else {
        panic!("expected game to continue");
    };

    assert_eq!(drawn, card("4♥"));
    assert_eq!(hand.value(), 15);
    assert_eq!(next_actions, bjtable::Action::AVAILABLE);

    let stored = engine.game(1).unwrap();
    assert_eq!(stored.cursor, 5);
    assert_eq!(stored.player_hand, hand);
}

#[test]
fn hit_over_21_busts_and_removes_game() {
    let engine = engine_with(NEVER_DRAW, GameOptions::default());
    let state = GameState::deal(1, deck_with_top(&["K♠", "9♥", "Q♥", "7♣", "5♦"]));
    engine.store().put(&state).unwrap();

    let result = engine.hit(1).unwrap();
    assert_eq!(
        result,
        HitResult::Bust {
            card: card("5♦"),
            hand: cards(&["K♠", "Q♥", "5♦"]).into(),
            score: 25,
        }
    );
    assert!(engine.store().is_empty());
    assert_eq!(engine.hit(1).unwrap_err(), ActionError::GameNotFound);
}

#[test]
fn hit_on_exhausted_deck_leaves_game_untouched() {
    let engine = engine_with(NEVER_DRAW, GameOptions::default());
    let mut state = GameState::deal(1, standard_deck());
    state.cursor = DECK_SIZE;
    engine.store().put(&state).unwrap();

    assert_eq!(engine.hit(1).unwrap_err(), ActionError::DeckExhausted);
    assert_eq!(engine.store().get(1).unwrap(), Some(state));
}

#[test]
fn hit_on_exhausted_deck_can_resolve_game() {
    let engine = engine_with(
        ALWAYS_DRAW,
        GameOptions::default().with_resolve_on_exhausted(true),
    );
    let mut state = GameState::deal(1, deck_with_top(&["K♠", "9♥", "Q♥", "7♣"]));
    state.cursor = DECK_SIZE;
    engine.store().put(&state).unwrap();

    let HitResult::Resolved(result) = engine.hit(1).unwrap() else {
        panic!("expected game to be resolved");
    };
    assert!(result.dealer_draws.is_empty());
    assert_eq!(result.player_value, 20);
    assert_eq!(result.dealer_value, 16);
    assert_eq!(result.outcome, HandOutcome::Win);
    assert!(engine.store().is_empty());
}

#[test]
fn actions_without_game_report_not_found() {
    let engine = engine_with(NEVER_DRAW, GameOptions::default());
    assert_eq!(engine.hit(3).unwrap_err(), ActionError::GameNotFound);
    assert_eq!(engine.stand(3).unwrap_err(), ActionError::GameNotFound);
}

#[test]
fn stand_with_busted_dealer_never_draws() {
    let engine = engine_with(ALWAYS_DRAW, GameOptions::default());
    let mut state = GameState::deal(1, deck_with_top(&["2♠", "K♥", "3♦", "Q♣", "5♥", "4♣"]));
    state.dealer_hand.add_card(card("5♥"));
    state.cursor = 5;
    engine.store().put(&state).unwrap();

    let result = engine.stand(1).unwrap();
    assert!(result.dealer_draws.is_empty());
    assert_eq!(result.dealer_value, 25);
    assert!(result.dealer_bust());
    assert_eq!(result.player_value, 5);
    assert_eq!(result.outcome, HandOutcome::Win);
    assert!(engine.store().is_empty());
}

#[test]
fn stand_with_equal_scores_is_a_push() {
    let engine = engine_with(NEVER_DRAW, GameOptions::default());
    let state = GameState::deal(1, deck_with_top(&["K♠", "J♦", "Q♥", "10♣"]));
    engine.store().put(&state).unwrap();

    let result = engine.stand(1).unwrap();
    assert_eq!(result.player_value, 20);
    assert_eq!(result.dealer_value, 20);
    assert_eq!(result.outcome, HandOutcome::Push);
    assert!(engine.store().get(1).unwrap().is_none());
}

#[test]
fn dealer_draws_until_probability_reaches_zero() {
    let engine = engine_with(ALWAYS_DRAW, GameOptions::default());
    let state = GameState::deal(
        1,
        deck_with_top(&["10♠", "2♥", "9♦", "3♣", "4♠", "5♥", "7♦", "8♣"]),
    );
    engine.store().put(&state).unwrap();

    let mut notified = Vec::new();
    let result = engine.stand_with(1, |c| notified.push(*c)).unwrap();

    assert_eq!(result.dealer_draws, cards(&["4♠", "5♥", "7♦"]));
    assert_eq!(notified, result.dealer_draws);
    assert_eq!(result.dealer_value, BLACKJACK);
    assert_eq!(result.player_value, 19);
    assert_eq!(result.outcome, HandOutcome::Lose);
    assert!(engine.store().is_empty());
}

#[test]
fn dealer_stops_when_deck_runs_out() {
    let engine = engine_with(ALWAYS_DRAW, GameOptions::default());
    let state = GameState::deal(1, cards(&["10♠", "2♥", "9♦", "3♣", "2♦"]));
    engine.store().put(&state).unwrap();

    let result = engine.stand(1).unwrap();
    assert_eq!(result.dealer_draws, cards(&["2♦"]));
    assert_eq!(result.dealer_value, 7);
    assert_eq!(result.outcome, HandOutcome::Win);
}

#[test]
fn draw_probability_falls_to_zero_at_21() {
    assert_eq!(draw_probability(0), 1.0);
    assert_eq!(draw_probability(21), 0.0);
    assert!((draw_probability(14) - 1.0 / 3.0).abs() < 1e-12);
    assert!(draw_probability(22) < 0.0);
}

#[test]
fn outcome_resolution() {
    assert_eq!(HandOutcome::resolve(18, 22), HandOutcome::Win);
    assert_eq!(HandOutcome::resolve(19, 18), HandOutcome::Win);
    assert_eq!(HandOutcome::resolve(17, 18), HandOutcome::Lose);
    assert_eq!(HandOutcome::resolve(20, 20), HandOutcome::Push);
}

#[test]
fn concurrent_players_do_not_lose_games() {
    let engine = GameEngine::new(MemoryStore::new(), GameOptions::default(), 8);

    std::thread::scope(|scope| {
        for player in 0..16_u64 {
            let engine = &engine;
            scope.spawn(move || {
                engine.start(player).unwrap();
            });
        }
    });

    assert_eq!(engine.store().load_all().unwrap().len(), 16);
}

#[test]
fn failed_writes_still_report_the_move() {
    let store = FlakyStore {
        fail_writes: true,
        ..FlakyStore::default()
    };
    store
        .inner
        .put(&GameState::deal(
            1,
            deck_with_top(&["5♠", "9♥", "6♦", "7♣", "4♥"]),
        ))
        .unwrap();
    let engine = GameEngine::with_rng(store, GameOptions::default(), NEVER_DRAW);

    let deal = engine.start(2).unwrap();
    assert_eq!(deal.player_hand.len(), 2);
    assert!(engine.store().inner.get(2).unwrap().is_none());

    let HitResult::InProgress { hand, .. } = engine.hit(1).unwrap() else {
        panic!("expected game to continue");
    };
    assert_eq!(hand.value(), 15);
    // The unsaved hit leaves the stored game one card behind.
    assert_eq!(engine.store().inner.get(1).unwrap().unwrap().cursor, 4);

    let result = engine.stand(1).unwrap();
    assert_eq!(result.player_value, 11);
    assert_eq!(result.outcome, HandOutcome::Lose);
    assert!(engine.store().inner.get(1).unwrap().is_some());
}

#[test]
fn failed_reads_surface_as_storage_errors() {
    let store = FlakyStore {
        fail_reads: true,
        ..FlakyStore::default()
    };
    let engine = GameEngine::with_rng(store, GameOptions::default(), NEVER_DRAW);

    let expected = ActionError::Storage(StoreError::Read("permission denied".to_string()));
    assert_eq!(engine.hit(1).unwrap_err(), expected);
    assert_eq!(engine.stand(1).unwrap_err(), expected);
    assert_eq!(engine.game(1).unwrap_err(), expected);
}

#[test]
fn oversized_hand_saturates_instead_of_overflowing() {
    let aces: Hand = vec![Card::new(Suit::Spades, 1); 300].into();
    assert_eq!(aces.value(), u8::MAX);
    assert!(aces.is_bust());
    assert!(!aces.is_soft());

    assert_eq!(hand_value(&[Card::new(Suit::Hearts, 13); 10_000]), u8::MAX);
}

#[test]
fn validate_checks_hands_against_deck() {
    let state = GameState::deal(1, standard_deck());
    assert_eq!(state.validate(), Ok(()));

    let mut stray = state.clone();
    stray.player_hand.add_card(card("A♠"));
    assert_eq!(stray.validate(), Err(InvalidGameError::HandMismatch));

    let mut past_end = state.clone();
    past_end.cursor = DECK_SIZE + 1;
    assert_eq!(
        past_end.validate(),
        Err(InvalidGameError::CursorOutOfRange {
            cursor: DECK_SIZE + 1,
            len: DECK_SIZE,
        })
    );

    let mut doubled = state;
    doubled.deck.push(doubled.deck[10]);
    assert_eq!(doubled.validate(), Err(InvalidGameError::DuplicateCard));
}
