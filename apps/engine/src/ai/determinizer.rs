//! Sampling concrete deals consistent with one seat's information set.
//!
//! The cards a seat cannot see go into hidden zones: every other seat's hand
//! (sized by its known card count) and the hidden pile, which is the kitty
//! before the auction closes or the declarer's discards for everyone but the
//! declarer. Public play constrains the hands: a seat known to be void in a
//! suit gets none of it, and a seat known not to hold the Joker never gets
//! it. The pile is unconstrained.
//!
//! Sampling runs in two steps. A randomised augmenting-path matching assigns
//! every unseen card to a zone with spare capacity; it finds an assignment
//! whenever one exists. Random swaps between zones that keep every constraint
//! then mix the result.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::domain::partner::{partner_for_card, PartnerCall};
use crate::domain::rules::PLAYERS;
use crate::domain::{Card, GameState, InformationSet};
use crate::error::EngineError;

/// Zones `0..PLAYERS` are seats; the last is the hidden pile.
const PILE: usize = PLAYERS;
const ZONES: usize = PLAYERS + 1;
const MIX_SWAPS_PER_CARD: usize = 4;

/// Reusable sampler for one information set.
#[derive(Debug)]
pub struct Determinizer<'a> {
    info: &'a InformationSet,
    unseen: Vec<Card>,
    capacity: [usize; ZONES],
}

impl<'a> Determinizer<'a> {
    /// Validate `info` and size the hidden zones.
    pub fn new(info: &'a InformationSet) -> Result<Self, EngineError> {
        info.validate()?;
        let unseen = info.unseen_cards();
        let mut capacity = [0usize; ZONES];
        for (seat, cap) in capacity.iter_mut().enumerate().take(PLAYERS) {
            if seat != info.seat as usize {
                *cap = info.hand_sizes[seat] as usize;
            }
        }
        capacity[PILE] = info.hidden_pile_size();

        let slots: usize = capacity.iter().sum();
        if slots != unseen.len() {
            return Err(EngineError::determinization(format!(
                "{} unseen cards for {slots} hidden slots",
                unseen.len()
            )));
        }
        Ok(Self {
            info,
            unseen,
            capacity,
        })
    }

    pub fn unseen(&self) -> &[Card] {
        &self.unseen
    }

    fn allowed(&self, card: Card, zone: usize) -> bool {
        zone == PILE || self.info.knowledge.may_hold(zone, card)
    }

    /// Draw one full game state consistent with the information set.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GameState, EngineError> {
        let mut zone_of = self.assign(rng)?;
        self.mix(&mut zone_of, rng);
        Ok(self.build_state(&zone_of))
    }

    fn assign<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<usize>, EngineError> {
        let n = self.unseen.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);

        let mut zone_of = vec![PILE; n];
        let mut members: [Vec<usize>; ZONES] = Default::default();
        for card in order {
            let mut visited = [false; ZONES];
            if !self.augment(card, &mut zone_of, &mut members, &mut visited, rng) {
                return Err(EngineError::determinization(format!(
                    "no hidden zone can take {}",
                    self.unseen[card]
                )));
            }
        }
        Ok(zone_of)
    }

    /// Place `card`, evicting along an augmenting path when every allowed
    /// zone is full.
    fn augment<R: Rng + ?Sized>(
        &self,
        card: usize,
        zone_of: &mut [usize],
        members: &mut [Vec<usize>; ZONES],
        visited: &mut [bool; ZONES],
        rng: &mut R,
    ) -> bool {
        let mut zones: Vec<usize> = (0..ZONES)
            .filter(|&z| self.capacity[z] > 0 && self.allowed(self.unseen[card], z))
            .collect();
        zones.shuffle(rng);

        for &z in &zones {
            if !visited[z] && members[z].len() < self.capacity[z] {
                visited[z] = true;
                members[z].push(card);
                zone_of[card] = z;
                return true;
            }
        }
        for &z in &zones {
            if visited[z] {
                continue;
            }
            visited[z] = true;
            for i in 0..members[z].len() {
                let evicted = members[z][i];
                if self.augment(evicted, zone_of, members, visited, rng) {
                    members[z][i] = card;
                    zone_of[card] = z;
                    return true;
                }
            }
        }
        false
    }

    fn mix<R: Rng + ?Sized>(&self, zone_of: &mut [usize], rng: &mut R) {
        let n = zone_of.len();
        if n < 2 {
            return;
        }
        for _ in 0..n * MIX_SWAPS_PER_CARD {
            let a = rng.random_range(0..n);
            let b = rng.random_range(0..n);
            let (za, zb) = (zone_of[a], zone_of[b]);
            if za != zb && self.allowed(self.unseen[a], zb) && self.allowed(self.unseen[b], za) {
                zone_of.swap(a, b);
            }
        }
    }

    fn build_state(&self, zone_of: &[usize]) -> GameState {
        let info = self.info;
        let mut hands: [Vec<Card>; PLAYERS] = Default::default();
        let mut pile = Vec::with_capacity(self.capacity[PILE]);
        for (card, &zone) in self.unseen.iter().zip(zone_of) {
            if zone == PILE {
                pile.push(*card);
            } else {
                hands[zone].push(*card);
            }
        }
        for hand in hands.iter_mut() {
            hand.sort();
        }
        hands[info.seat as usize] = info.hand.clone();
        pile.sort();

        let (kitty, discards) = if info.kitty_size > 0 {
            (pile, Vec::new())
        } else if let Some(own) = &info.own_discards {
            (Vec::new(), own.clone())
        } else {
            (Vec::new(), pile)
        };

        let mut state = state_from_view(info, hands, kitty, discards);
        if !info.partner_revealed {
            state.partner = match (info.partner_call, info.contract) {
                (Some(PartnerCall::Card(card)), Some(c)) => {
                    partner_for_card(&state, c.declarer, card)
                }
                _ => None,
            };
        }
        state
    }
}

fn state_from_view(
    info: &InformationSet,
    hands: [Vec<Card>; PLAYERS],
    kitty: Vec<Card>,
    discards: Vec<Card>,
) -> GameState {
    GameState {
        config: info.config,
        phase: info.phase,
        dealer: info.dealer,
        turn: info.turn,
        hands,
        kitty,
        discards,
        auction: info.auction.clone(),
        contract: info.contract,
        partner_call: info.partner_call,
        partner: info.partner,
        partner_revealed: info.partner_revealed,
        current_trick: info.current_trick.clone(),
        tricks: info.tricks.clone(),
        points_won: info.points_won,
        outcome: None,
        history: info.history.clone(),
    }
}

/// A partial state holding only what `info`'s seat can see: its own hand and
/// discards, other hands empty. Enough for a playout policy to pick among the
/// seat's legal actions without sampling.
pub fn visible_state(info: &InformationSet) -> GameState {
    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    hands[info.seat as usize] = info.hand.clone();
    let discards = info.own_discards.clone().unwrap_or_default();
    state_from_view(info, hands, Vec::new(), discards)
}

/// Sample one full game state consistent with `info`.
pub fn determinize<R: Rng + ?Sized>(
    info: &InformationSet,
    rng: &mut R,
) -> Result<GameState, EngineError> {
    Determinizer::new(info)?.sample(rng)
}

/// [`determinize`] with a ChaCha8 stream seeded from `seed`.
pub fn determinize_seeded(info: &InformationSet, seed: u64) -> Result<GameState, EngineError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    determinize(info, &mut rng)
}
