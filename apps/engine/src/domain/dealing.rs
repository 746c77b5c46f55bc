//! Deterministic card dealing logic.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::rules::{DECK_SIZE, HAND_SIZE, KITTY_SIZE, PLAYERS};
use crate::domain::{Card, Rank, Suit};

/// The 53-card Mighty deck in index order (Joker last).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(suit, rank));
        }
    }
    deck.push(Card::Joker);
    deck
}

/// A fresh deal: five hands of ten and a kitty of three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Vec<Card>; PLAYERS],
    pub kitty: Vec<Card>,
}

/// Deal hands deterministically from an RNG seed.
///
/// Hands and kitty are sorted for convenience.
pub fn deal_hands(seed: u64) -> Deal {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut deck = full_deck();
    deck.shuffle(&mut rng);

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for (seat, hand_slot) in hands.iter_mut().enumerate() {
        let start = seat * HAND_SIZE;
        let mut hand = deck[start..start + HAND_SIZE].to_vec();
        hand.sort();
        *hand_slot = hand;
    }
    let mut kitty = deck[PLAYERS * HAND_SIZE..].to_vec();
    kitty.sort();
    debug_assert_eq!(kitty.len(), KITTY_SIZE);

    Deal { hands, kitty }
}
