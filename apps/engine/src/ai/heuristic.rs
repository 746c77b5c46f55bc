//! A cheap rule-of-thumb playout policy for Mighty.
//!
//! Goals:
//! - Stay 100% legal: every choice is taken from the `legal` list.
//! - Be deterministic and fast enough to run inside every playout, while
//!   producing far more realistic games than uniform random play.
//!
//! Bidding:
//! - Bid on the longest suit (ties broken by high cards).
//! - The strength ceiling grows with suit length, point cards, the Mighty and
//!   the Joker; bid the lowest legal target in that suit under the ceiling,
//!   otherwise pass.
//!
//! Exchange:
//! - Keep the contract trump; discard the three weakest cards, never the
//!   Mighty, the Joker or a trump while a non-trump remains.
//!
//! Partner call:
//! - Call the Mighty, else the Joker, else the highest trump not in hand.
//!
//! Play:
//! - Leading: lead the Mighty when held, otherwise the cheapest card.
//! - Following: win with the cheapest winning card unless a known teammate
//!   already holds the trick; otherwise throw the cheapest card.
use rand::RngCore;

use crate::ai::trait_def::PlayoutPolicy;
use crate::domain::cards_logic::trick_winner_index;
use crate::domain::partner::PartnerCall;
use crate::domain::rules::TOTAL_POINTS;
use crate::domain::tricks::trick_context;
use crate::domain::{Action, Card, GameState, Phase, Rank, Seat, Suit, Trump};
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub const NAME: &'static str = "heuristic";
    pub const VERSION: &'static str = "1.0.0";

    pub const fn new() -> Self {
        Self
    }

    // ---------- Utilities (pure, small, deterministic) ----------

    /// Lower is cheaper to give away.
    fn weight(card: Card, trump: Trump, mighty: Card) -> u32 {
        if card == mighty {
            return 200;
        }
        match (card.suit(), card.rank()) {
            (Some(suit), Some(rank)) => {
                let base = rank as u32 + if rank.is_point() { 20 } else { 0 };
                if trump.suit() == Some(suit) {
                    100 + base
                } else {
                    base
                }
            }
            _ => 150,
        }
    }

    fn suit_cards(hand: &[Card], suit: Suit) -> impl Iterator<Item = &Card> {
        hand.iter().filter(move |c| c.is_suit(suit))
    }

    /// Longest suit, ties broken by point cards, with its length.
    fn best_suit(hand: &[Card]) -> (Suit, usize) {
        let mut best = (Suit::Clubs, 0usize, 0usize);
        for suit in Suit::ALL {
            let len = Self::suit_cards(hand, suit).count();
            let high = Self::suit_cards(hand, suit).filter(|c| c.is_point()).count();
            if (len, high) > (best.1, best.2) {
                best = (suit, len, high);
            }
        }
        (best.0, best.1)
    }

    /// Highest target this hand should commit to with `suit` as trump.
    fn bid_ceiling(state: &GameState, hand: &[Card], suit: Suit) -> u8 {
        let trump = Trump::Suit(suit);
        let len = Self::suit_cards(hand, suit).count() as u32;
        let points = hand.iter().filter(|c| c.is_point()).count() as u32;
        let mut strength = 6 + len + points / 2;
        if hand.contains(&state.config.mighty_for(trump)) {
            strength += 2;
        }
        if hand.contains(&Card::Joker) {
            strength += 2;
        }
        strength.min(TOTAL_POINTS as u32) as u8
    }

    fn choose_bid(state: &GameState, seat: Seat, legal: &[Action]) -> Option<Action> {
        let hand = &state.hands[seat as usize];
        let (suit, _) = Self::best_suit(hand);
        let ceiling = Self::bid_ceiling(state, hand, suit);
        legal
            .iter()
            .filter(|a| matches!(a, Action::Bid { trump, target } if *trump == Trump::Suit(suit) && *target <= ceiling))
            .min_by_key(|a| match a {
                Action::Bid { target, .. } => *target,
                _ => u8::MAX,
            })
            .copied()
            .or_else(|| legal.iter().find(|a| **a == Action::Pass).copied())
    }

    fn choose_exchange(state: &GameState, seat: Seat, legal: &[Action]) -> Option<Action> {
        let contract = state.contract?;
        let mighty = state.config.mighty_for(contract.trump);
        let mut hand = state.hands[seat as usize].clone();
        hand.sort_by_key(|c| (Self::weight(*c, contract.trump, mighty), *c));
        let mut discards = [*hand.first()?, *hand.get(1)?, *hand.get(2)?];
        discards.sort();
        let wanted = Action::Exchange {
            discards,
            trump: contract.trump,
        };
        legal.contains(&wanted).then_some(wanted)
    }

    fn choose_partner(state: &GameState, seat: Seat, legal: &[Action]) -> Option<Action> {
        let contract = state.contract?;
        let hand = &state.hands[seat as usize];
        let mighty = state.config.mighty_for(contract.trump);
        let mut wishlist = vec![mighty, Card::Joker];
        if let Some(suit) = contract.trump.suit() {
            wishlist.extend(Rank::ALL.iter().rev().map(|r| Card::new(suit, *r)));
        }
        wishlist
            .into_iter()
            .find(|c| !hand.contains(c))
            .map(|c| Action::CallPartner(PartnerCall::Card(c)))
            .filter(|a| legal.contains(a))
    }

    fn teammates(state: &GameState, a: Seat, b: Seat) -> bool {
        let Some(contract) = state.contract else {
            return false;
        };
        if !state.partner_revealed {
            return a == b;
        }
        let on_team = |s: Seat| s == contract.declarer || Some(s) == state.partner;
        on_team(a) == on_team(b)
    }

    fn choose_play(state: &GameState, seat: Seat, legal: &[Action]) -> Option<Action> {
        let contract = state.contract?;
        let trick = state.current_trick.as_ref()?;
        let Phase::Play { trick_no } = state.phase else {
            return None;
        };
        let mighty = state.config.mighty_for(contract.trump);
        let weight = |a: &Action| match a {
            Action::Play { card, .. } => Self::weight(*card, contract.trump, mighty),
            _ => u32::MAX,
        };

        if trick.plays.is_empty() {
            if let Some(a) = legal.iter().find(|a| matches!(a, Action::Play { card, .. } if *card == mighty)) {
                return Some(*a);
            }
            return legal.iter().min_by_key(|a| weight(a)).copied();
        }

        let cards: Vec<Card> = trick.cards().copied().collect();
        let current_winner = trick_context(&state.config, contract.trump, trick, trick_no)
            .map(|ctx| trick.plays[trick_winner_index(&cards, &ctx)].0);
        let teammate_winning = current_winner.is_some_and(|w| Self::teammates(state, seat, w));

        if !teammate_winning {
            let winner = legal
                .iter()
                .filter(|a| {
                    let Action::Play { card, .. } = a else {
                        return false;
                    };
                    let mut trial = trick.clone();
                    trial.plays.push((seat, *card));
                    let mut trial_cards = cards.clone();
                    trial_cards.push(*card);
                    trick_context(&state.config, contract.trump, &trial, trick_no)
                        .is_some_and(|ctx| trick_winner_index(&trial_cards, &ctx) == cards.len())
                })
                .min_by_key(|a| weight(a));
            if let Some(a) = winner {
                return Some(*a);
            }
        }
        legal.iter().min_by_key(|a| weight(a)).copied()
    }
}

impl PlayoutPolicy for HeuristicPolicy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose(
        &self,
        state: &GameState,
        legal: &[Action],
        _rng: &mut dyn RngCore,
    ) -> Result<Action, EngineError> {
        let first = *legal.first().ok_or(EngineError::NoLegalActions)?;
        let Some(seat) = state.turn else {
            return Ok(first);
        };
        let pick = match state.phase {
            Phase::Bidding => Self::choose_bid(state, seat, legal),
            Phase::Exchange => Self::choose_exchange(state, seat, legal),
            Phase::PartnerCall => Self::choose_partner(state, seat, legal),
            Phase::Play { .. } => Self::choose_play(state, seat, legal),
            Phase::Scoring | Phase::Finished => None,
        };
        Ok(pick.unwrap_or(first))
    }
}
