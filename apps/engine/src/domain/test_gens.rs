// Proptest generators for domain types.
// These generators ensure unique cards and valid game states for property-based testing.

use proptest::prelude::*;

use crate::domain::rules::{DECK_SIZE, PLAYERS};
use crate::domain::state::Seat;
use crate::domain::{Card, Rank, Suit, Trump};

/// Generate a random Suit
pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

/// Generate a random Trump (including NoTrump)
pub fn trump() -> impl Strategy<Value = Trump> {
    prop_oneof![suit().prop_map(Trump::Suit), Just(Trump::NoTrump)]
}

/// Generate a random Rank
pub fn rank() -> impl Strategy<Value = Rank> {
    proptest::sample::select(Rank::ALL.to_vec())
}

/// Generate a Seat (0-4)
pub fn seat() -> impl Strategy<Value = Seat> {
    0u8..PLAYERS as u8
}

/// Generate a vector of N unique cards (Joker included in the pool)
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut all_cards: Vec<Card> = (0..DECK_SIZE).filter_map(Card::from_index).collect();
        for i in 0..count.min(all_cards.len()) {
            let j = rng.random_range(i..all_cards.len());
            all_cards.swap(i, j);
        }
        all_cards.truncate(count);
        all_cards
    })
}

/// Generate a vector of 1 to max_count unique cards
pub fn unique_cards_up_to(max_count: usize) -> impl Strategy<Value = Vec<Card>> {
    (1..=max_count).prop_flat_map(unique_cards)
}

/// Generate a hand containing NO ranked cards of the given suit (Joker allowed)
pub fn hand_without_suit(excluded_suit: Suit) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut cards: Vec<Card> = (0..DECK_SIZE)
            .filter_map(Card::from_index)
            .filter(|c| !c.is_suit(excluded_suit))
            .collect();

        let count = rng.random_range(1..=10);
        for i in 0..count {
            let j = rng.random_range(i..cards.len());
            cards.swap(i, j);
        }
        cards.truncate(count);
        cards
    })
}

/// Complete trick without the Joker: 5 unique ranked cards.
/// Returns (plays in order, trump); the lead suit is the first card's suit.
pub fn complete_ranked_trick() -> impl Strategy<Value = (Vec<Card>, Trump)> {
    let ranked = Just(()).prop_perturb(|_, mut rng| {
        let mut cards: Vec<Card> = (0..52).filter_map(Card::from_index).collect();
        for i in 0..PLAYERS {
            let j = rng.random_range(i..cards.len());
            cards.swap(i, j);
        }
        cards.truncate(PLAYERS);
        cards
    });
    (ranked, trump())
}

/// Base seed for a dealt game.
pub fn game_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}
