//! Player view of game state - what information is visible to one seat.
//!
//! This module provides [`InformationSet`], everything a seat can see at its
//! decision point: its own hand, the public record of the game, and what the
//! table has inferred about the other hands. It is the only input the search
//! engine receives; hidden cards are filled in later by the determinizer.
//!
//! # Building one
//!
//! - [`InformationSet::from_state`] projects a full [`GameState`] onto a seat.
//!   Simulators and tests use this.
//! - [`InformationSetBuilder`] assembles one from the pieces an outer API
//!   layer receives from a game server, then validates it.
//!
//! # Known and unknown cards
//!
//! Known to this seat: its hand, every card played to a trick, and (for the
//! declarer) its own discards. Everything else is unknown and accounted for
//! only by count: each other seat's hand size plus the hidden kitty or
//! discards. [`InformationSet::validate`] checks that these reconcile to 53.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::actions::Action;
use crate::domain::bidding::{bidding_actions, Auction};
use crate::domain::config::GameConfig;
use crate::domain::exchange::exchange_actions;
use crate::domain::partner::{partner_call_actions, PartnerCall};
use crate::domain::round_memory::{infer_knowledge, SeatKnowledge};
use crate::domain::rules::{DECK_SIZE, HAND_SIZE, KITTY_SIZE, PLAYERS, TRICKS_PER_GAME};
use crate::domain::state::{
    expected_actor, joker_out, Contract, GameState, LoggedAction, Phase, Seat, Trick,
};
use crate::domain::tricks::{legal_plays_from, PlayRules};
use crate::domain::Card;
use crate::error::EngineError;

/// Information visible to one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InformationSet {
    /// The seat this view belongs to.
    pub seat: Seat,
    pub config: GameConfig,
    pub phase: Phase,
    pub dealer: Seat,
    pub turn: Option<Seat>,
    /// This seat's exact hand.
    pub hand: Vec<Card>,
    /// Card count per seat (own seat included).
    pub hand_sizes: [u8; PLAYERS],
    /// Cards still in the kitty (3 during bidding, 0 afterwards).
    pub kitty_size: u8,
    /// Own discards; only the declarer has them.
    pub own_discards: Option<Vec<Card>>,
    pub auction: Auction,
    pub contract: Option<Contract>,
    pub partner_call: Option<PartnerCall>,
    /// Partner seat, meaningful when `partner_revealed` (`None` = solo).
    pub partner: Option<Seat>,
    pub partner_revealed: bool,
    pub current_trick: Option<Trick>,
    pub tricks: Vec<Trick>,
    pub points_won: [u8; PLAYERS],
    pub history: Vec<LoggedAction>,
    /// Voids and absent cards inferred from play.
    pub knowledge: SeatKnowledge,
}

impl InformationSet {
    /// Project a full state onto `seat`.
    pub fn from_state(state: &GameState, seat: Seat) -> Self {
        let mut hand_sizes = [0u8; PLAYERS];
        for (size, hand) in hand_sizes.iter_mut().zip(&state.hands) {
            *size = hand.len() as u8;
        }
        let is_declarer = state.contract.is_some_and(|c| c.declarer == seat);
        let own_discards = (is_declarer && !state.discards.is_empty()).then(|| state.discards.clone());

        let knowledge = infer_knowledge(
            &state.config,
            state.contract.map(|c| c.trump),
            state.tricks.iter().chain(state.current_trick.as_ref()),
        );

        Self {
            seat,
            config: state.config,
            phase: state.phase,
            dealer: state.dealer,
            turn: state.turn,
            hand: state.hands[seat as usize].clone(),
            hand_sizes,
            kitty_size: state.kitty.len() as u8,
            own_discards,
            auction: state.auction.clone(),
            contract: state.contract,
            partner_call: state.partner_call,
            partner: if state.partner_revealed {
                state.partner
            } else {
                None
            },
            partner_revealed: state.partner_revealed,
            current_trick: state.current_trick.clone(),
            tricks: state.tricks.clone(),
            points_won: state.points_won,
            history: state.history.clone(),
            knowledge,
        }
    }

    /// Unknown cards sitting outside any hand: the kitty before the exchange,
    /// or the declarer's discards for everyone but the declarer.
    pub fn hidden_pile_size(&self) -> usize {
        if self.kitty_size > 0 {
            return self.kitty_size as usize;
        }
        let discarded = matches!(self.phase, Phase::PartnerCall | Phase::Play { .. })
            || (self.phase == Phase::Finished && self.contract.is_some());
        if discarded && self.own_discards.is_none() {
            KITTY_SIZE
        } else {
            0
        }
    }

    /// Every card this seat can see.
    pub fn known_cards(&self) -> Vec<Card> {
        let mut known = self.hand.clone();
        known.extend(self.played_cards());
        if let Some(d) = &self.own_discards {
            known.extend(d.iter().copied());
        }
        known
    }

    pub fn played_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.tricks
            .iter()
            .chain(self.current_trick.as_ref())
            .flat_map(|t| t.cards().copied())
    }

    /// Cards this seat cannot see, in index order.
    pub fn unseen_cards(&self) -> Vec<Card> {
        let known: HashSet<Card> = self.known_cards().into_iter().collect();
        (0..DECK_SIZE)
            .filter_map(Card::from_index)
            .filter(|c| !known.contains(c))
            .collect()
    }

    /// Whether the Joker has been played.
    pub fn joker_out(&self) -> bool {
        joker_out(&self.tricks, self.current_trick.as_ref())
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Legal actions for this seat, computed from its own view. Empty when it
    /// is not this seat's turn.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.turn != Some(self.seat) {
            return Vec::new();
        }
        match self.phase {
            Phase::Bidding => bidding_actions(&self.config, &self.auction, self.seat, &self.hand),
            Phase::Exchange => match self.contract {
                Some(c) => exchange_actions(&self.config, &c, &self.hand),
                None => Vec::new(),
            },
            Phase::PartnerCall => partner_call_actions(),
            Phase::Play { .. } => match (&self.current_trick, self.contract) {
                (Some(trick), Some(contract)) => legal_plays_from(
                    &self.hand,
                    trick,
                    PlayRules {
                        config: &self.config,
                        trump: contract.trump,
                        joker_out: self.joker_out(),
                    },
                ),
                _ => Vec::new(),
            },
            Phase::Scoring | Phase::Finished => Vec::new(),
        }
    }

    /// Internal consistency: unique cards, counts reconcile to 53, hand sizes
    /// fit the phase.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.seat as usize >= PLAYERS || self.dealer as usize >= PLAYERS {
            return Err(EngineError::invalid_info_set("seat out of range"));
        }
        if self.turn.is_some_and(|t| t as usize >= PLAYERS) {
            return Err(EngineError::invalid_info_set("turn out of range"));
        }
        self.validate_tricks()?;

        let known = self.known_cards();
        let mut seen = HashSet::with_capacity(known.len());
        for card in &known {
            if !seen.insert(*card) {
                return Err(EngineError::invalid_info_set(format!(
                    "card {card} appears more than once"
                )));
            }
        }

        if self.hand.len() != self.hand_sizes[self.seat as usize] as usize {
            return Err(EngineError::invalid_info_set(format!(
                "hand holds {} cards but hand size says {}",
                self.hand.len(),
                self.hand_sizes[self.seat as usize]
            )));
        }

        let unknown_slots: usize = self
            .hand_sizes
            .iter()
            .enumerate()
            .filter(|(s, _)| *s != self.seat as usize)
            .map(|(_, n)| *n as usize)
            .sum::<usize>()
            + self.hidden_pile_size();
        if known.len() + unknown_slots != DECK_SIZE {
            return Err(EngineError::invalid_info_set(format!(
                "{} known + {} unknown cards do not make {DECK_SIZE}",
                known.len(),
                unknown_slots
            )));
        }

        self.validate_hand_sizes()
    }

    fn validate_hand_sizes(&self) -> Result<(), EngineError> {
        let declarer = self.contract.map(|c| c.declarer as usize);
        for seat in 0..PLAYERS {
            let expected = match self.phase {
                Phase::Bidding | Phase::PartnerCall => Some(HAND_SIZE),
                Phase::Exchange if Some(seat) == declarer => Some(HAND_SIZE + KITTY_SIZE),
                Phase::Exchange => Some(HAND_SIZE),
                Phase::Play { .. } => {
                    let in_current = self
                        .current_trick
                        .as_ref()
                        .is_some_and(|t| t.plays.iter().any(|(s, _)| *s as usize == seat));
                    let played = self.tricks.len() + in_current as usize;
                    let left = HAND_SIZE.checked_sub(played).ok_or_else(|| {
                        EngineError::invalid_info_set("more cards played than dealt")
                    })?;
                    Some(left)
                }
                Phase::Scoring | Phase::Finished => None,
            };
            if let Some(expected) = expected {
                if self.hand_sizes[seat] as usize != expected {
                    return Err(EngineError::invalid_info_set(format!(
                        "seat {seat} holds {} cards, expected {expected} in {:?}",
                        self.hand_sizes[seat], self.phase
                    )));
                }
            }
        }
        Ok(())
    }

    /// Trick count against the phase, and every trick's seats in play order.
    fn validate_tricks(&self) -> Result<(), EngineError> {
        if self.tricks.len() > TRICKS_PER_GAME as usize {
            return Err(EngineError::invalid_info_set(format!(
                "{} completed tricks, at most {TRICKS_PER_GAME}",
                self.tricks.len()
            )));
        }
        if let Phase::Play { trick_no } = self.phase {
            if trick_no as usize != self.tricks.len() + 1 {
                return Err(EngineError::invalid_info_set(format!(
                    "phase is trick {trick_no} after {} completed tricks",
                    self.tricks.len()
                )));
            }
        }
        for trick in &self.tricks {
            validate_trick(trick, true)?;
        }
        if let Some(trick) = &self.current_trick {
            validate_trick(trick, false)?;
        }
        Ok(())
    }
}

fn validate_trick(trick: &Trick, complete: bool) -> Result<(), EngineError> {
    if trick.leader as usize >= PLAYERS {
        return Err(EngineError::invalid_info_set(format!(
            "trick leader {} out of range",
            trick.leader
        )));
    }
    let full = trick.plays.len() == PLAYERS;
    if complete != full || trick.plays.len() > PLAYERS {
        return Err(EngineError::invalid_info_set(format!(
            "trick led by seat {} holds {} cards",
            trick.leader,
            trick.plays.len()
        )));
    }
    for (i, &(seat, card)) in trick.plays.iter().enumerate() {
        let expected = expected_actor(trick.leader, i as u8);
        if seat != expected {
            return Err(EngineError::invalid_info_set(format!(
                "{card} played by seat {seat}, expected seat {expected}"
            )));
        }
    }
    if complete && !trick.winner.is_some_and(|w| (w as usize) < PLAYERS) {
        return Err(EngineError::invalid_info_set(
            "completed trick without a valid winner",
        ));
    }
    Ok(())
}

/// Assembles an [`InformationSet`] from the pieces a game server provides.
///
/// Derived fields (points won, voids, known-absent cards) are computed from
/// the trick history in [`build`](Self::build), which also validates the result.
///
/// ```rust,ignore
/// let info = InformationSetBuilder::new(2, GameConfig::default())
///     .dealer(0)
///     .hand(my_cards)
///     .phase(Phase::Bidding)
///     .turn(Some(2))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct InformationSetBuilder {
    info: InformationSet,
}

impl InformationSetBuilder {
    pub fn new(seat: Seat, config: GameConfig) -> Self {
        Self {
            info: InformationSet {
                seat,
                config,
                phase: Phase::Bidding,
                dealer: 0,
                turn: None,
                hand: Vec::new(),
                hand_sizes: [HAND_SIZE as u8; PLAYERS],
                kitty_size: KITTY_SIZE as u8,
                own_discards: None,
                auction: Auction::default(),
                contract: None,
                partner_call: None,
                partner: None,
                partner_revealed: false,
                current_trick: None,
                tricks: Vec::new(),
                points_won: [0; PLAYERS],
                history: Vec::new(),
                knowledge: SeatKnowledge::default(),
            },
        }
    }

    pub fn dealer(mut self, dealer: Seat) -> Self {
        self.info.dealer = dealer;
        self
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.info.phase = phase;
        self
    }

    pub fn turn(mut self, turn: Option<Seat>) -> Self {
        self.info.turn = turn;
        self
    }

    pub fn hand(mut self, hand: Vec<Card>) -> Self {
        self.info.hand = hand;
        self
    }

    pub fn hand_sizes(mut self, sizes: [u8; PLAYERS]) -> Self {
        self.info.hand_sizes = sizes;
        self
    }

    pub fn kitty_size(mut self, size: u8) -> Self {
        self.info.kitty_size = size;
        self
    }

    pub fn own_discards(mut self, discards: Vec<Card>) -> Self {
        self.info.own_discards = Some(discards);
        self
    }

    pub fn auction(mut self, auction: Auction) -> Self {
        self.info.auction = auction;
        self
    }

    pub fn contract(mut self, contract: Contract) -> Self {
        self.info.contract = Some(contract);
        self
    }

    pub fn partner_call(mut self, call: PartnerCall) -> Self {
        self.info.partner_call = Some(call);
        self
    }

    /// Record a revealed partnership (`None` = solo).
    pub fn revealed_partner(mut self, partner: Option<Seat>) -> Self {
        self.info.partner = partner;
        self.info.partner_revealed = true;
        self
    }

    pub fn tricks(mut self, tricks: Vec<Trick>) -> Self {
        self.info.tricks = tricks;
        self
    }

    pub fn current_trick(mut self, trick: Trick) -> Self {
        self.info.current_trick = Some(trick);
        self
    }

    pub fn history(mut self, history: Vec<LoggedAction>) -> Self {
        self.info.history = history;
        self
    }

    pub fn build(self) -> Result<InformationSet, EngineError> {
        let mut info = self.info;
        info.hand.sort();

        // Seats index the derived arrays below
        info.validate_tricks()?;

        let mut points_won = [0u8; PLAYERS];
        for trick in &info.tricks {
            if let Some(winner) = trick.winner {
                points_won[winner as usize] +=
                    crate::domain::cards_logic::count_points(trick.cards());
            }
        }
        info.points_won = points_won;
        info.knowledge = infer_knowledge(
            &info.config,
            info.contract.map(|c| c.trump),
            info.tricks.iter().chain(info.current_trick.as_ref()),
        );

        info.validate()?;
        Ok(info)
    }
}
