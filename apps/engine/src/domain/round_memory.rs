//! What the table has learned about each seat's hand from public play.
//!
//! Two kinds of knowledge come out of the trick history:
//!
//! - **Voids**: a seat that did not follow the lead suit holds none of it.
//!   The Joker carries no suit, and an exempt Mighty may be played at any
//!   time, so neither teaches anything.
//! - **Known-absent cards**: a seat that ignored a joker call does not hold
//!   the Joker, and neither does the seat that made the call.

use serde::{Deserialize, Serialize};

use crate::domain::config::GameConfig;
use crate::domain::rules::PLAYERS;
use crate::domain::state::Trick;
use crate::domain::{Card, Suit, Trump};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatKnowledge {
    /// `voids[seat][suit.index()]`
    pub voids: [[bool; 4]; PLAYERS],
    pub known_absent: [Vec<Card>; PLAYERS],
}

impl SeatKnowledge {
    pub fn is_void(&self, seat: usize, suit: Suit) -> bool {
        self.voids[seat][suit.index()]
    }

    /// Whether `seat` could be holding `card` given everything inferred so far.
    pub fn may_hold(&self, seat: usize, card: Card) -> bool {
        if self.known_absent[seat].contains(&card) {
            return false;
        }
        match card.suit() {
            Some(suit) => !self.is_void(seat, suit),
            None => true,
        }
    }

    fn mark_absent(&mut self, seat: usize, card: Card) {
        if !self.known_absent[seat].contains(&card) {
            self.known_absent[seat].push(card);
        }
    }
}

/// Infer voids and absent cards from every trick played so far.
pub fn infer_knowledge<'a, I>(config: &GameConfig, trump: Option<Trump>, tricks: I) -> SeatKnowledge
where
    I: IntoIterator<Item = &'a Trick>,
{
    let mut knowledge = SeatKnowledge::default();
    let exempt_mighty = trump
        .filter(|_| config.mighty_exempt_from_follow)
        .map(|t| config.mighty_for(t));

    for trick in tricks {
        let Some(lead) = trick.lead_suit else {
            continue;
        };
        if trick.joker_called {
            knowledge.mark_absent(trick.leader as usize, Card::Joker);
        }
        for &(seat, card) in trick.plays.iter().skip(1) {
            let seat = seat as usize;
            if trick.joker_called && !card.is_joker() {
                knowledge.mark_absent(seat, Card::Joker);
            }
            let excused = card.is_joker() || Some(card) == exempt_mighty;
            if !excused && !card.is_suit(lead) {
                knowledge.voids[seat][lead.index()] = true;
            }
        }
    }
    knowledge
}
