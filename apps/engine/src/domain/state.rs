use serde::{Deserialize, Serialize};

use crate::domain::actions::ActionKey;
use crate::domain::bidding::Auction;
use crate::domain::config::GameConfig;
use crate::domain::dealing::{deal_hands, Deal};
use crate::domain::partner::PartnerCall;
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::Outcome;
use crate::domain::{Card, Suit, Trump};
use crate::errors::domain::RulesError;

pub type Seat = u8; // 0..=4

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Seats bid or pass, starting left of the dealer.
    Bidding,
    /// Declarer holds the kitty and discards three.
    Exchange,
    /// Declarer names the partner card (or first-trick / no partner).
    PartnerCall,
    /// Playing tricks; `trick_no` is 1-based.
    Play { trick_no: u8 },
    /// Tally points. Transient: settling moves straight to `Finished`.
    Scoring,
    /// Game over; `GameState::outcome` is set.
    Finished,
}

/// The winning bid once the auction closes. Target may rise on a trump change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    pub declarer: Seat,
    pub trump: Trump,
    pub target: u8,
}

/// One trick, in progress or completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    pub leader: Seat,
    /// Ordered plays (who, card).
    pub plays: Vec<(Seat, Card)>,
    /// Suit to follow; for a Joker lead this is the suit the leader named.
    pub lead_suit: Option<Suit>,
    /// The leader played the joker-call card and called the Joker.
    pub joker_called: bool,
    /// Set once all five cards are down.
    pub winner: Option<Seat>,
}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(PLAYERS),
            lead_suit: None,
            joker_called: false,
            winner: None,
        }
    }

    pub fn led_card(&self) -> Option<Card> {
        self.plays.first().map(|(_, c)| *c)
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == PLAYERS
    }

    /// Seat expected to play next into this trick.
    pub fn next_seat(&self) -> Seat {
        expected_actor(self.leader, self.plays.len() as u8)
    }

    pub fn contains(&self, card: Card) -> bool {
        self.plays.iter().any(|(_, c)| *c == card)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.plays.iter().map(|(_, c)| c)
    }
}

/// One entry of the public action log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedAction {
    pub seat: Seat,
    /// Public form of the action: another seat's discards never appear.
    pub action: ActionKey,
}

/// Entire game container, sufficient for pure domain operations.
///
/// Card zones: `hands`, `kitty`, `discards`, `current_trick` and `tricks`.
/// Every one of the 53 cards lives in exactly one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: Phase,
    pub dealer: Seat,
    /// Seat expected to act; `None` once the game is finished.
    pub turn: Option<Seat>,
    pub hands: [Vec<Card>; PLAYERS],
    /// Three cards until the declarer picks them up.
    pub kitty: Vec<Card>,
    /// The declarer's three face-down discards after the exchange.
    pub discards: Vec<Card>,
    pub auction: Auction,
    pub contract: Option<Contract>,
    pub partner_call: Option<PartnerCall>,
    /// Partner seat; `None` means solo (or not yet determined for a first-trick call).
    pub partner: Option<Seat>,
    /// Whether `partner` is public knowledge.
    pub partner_revealed: bool,
    pub current_trick: Option<Trick>,
    pub tricks: Vec<Trick>,
    /// Point cards captured per seat.
    pub points_won: [u8; PLAYERS],
    pub outcome: Option<Outcome>,
    pub history: Vec<LoggedAction>,
}

impl GameState {
    /// Start a game from a concrete deal. Bidding opens left of the dealer.
    pub fn new(config: GameConfig, dealer: Seat, deal: Deal) -> Self {
        Self {
            config,
            phase: Phase::Bidding,
            dealer,
            turn: Some(round_start_seat(dealer)),
            hands: deal.hands,
            kitty: deal.kitty,
            discards: Vec::new(),
            auction: Auction::default(),
            contract: None,
            partner_call: None,
            partner: None,
            partner_revealed: false,
            current_trick: None,
            tricks: Vec::new(),
            points_won: [0; PLAYERS],
            outcome: None,
            history: Vec::new(),
        }
    }

    /// Start a game with a seeded shuffle.
    pub fn deal(config: GameConfig, dealer: Seat, seed: u64) -> Self {
        Self::new(config, dealer, deal_hands(seed))
    }

    /// Cards across every zone. Always 53.
    pub fn card_count(&self) -> usize {
        self.hands.iter().map(Vec::len).sum::<usize>()
            + self.kitty.len()
            + self.discards.len()
            + self.current_trick.as_ref().map_or(0, |t| t.plays.len())
            + self.tricks.iter().map(|t| t.plays.len()).sum::<usize>()
    }

    /// Whether the Joker has been played to any trick.
    pub fn joker_out(&self) -> bool {
        joker_out(&self.tricks, self.current_trick.as_ref())
    }

    /// Seat currently holding `card`, if it is in a hand.
    pub fn holder_of(&self, card: Card) -> Option<Seat> {
        self.hands
            .iter()
            .position(|h| h.contains(&card))
            .map(|s| s as Seat)
    }

    /// Declarer plus partner (when there is one).
    pub fn declarer_team(&self) -> Vec<Seat> {
        match self.contract {
            Some(c) => std::iter::once(c.declarer).chain(self.partner).collect(),
            None => Vec::new(),
        }
    }
}

/// Whether the Joker appears in any completed or current trick.
pub fn joker_out(tricks: &[Trick], current: Option<&Trick>) -> bool {
    tricks
        .iter()
        .chain(current)
        .any(|t| t.contains(Card::Joker))
}

/// Seat / turn math helpers (5 fixed seats: 0..=4).
///
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    ((seat_i + delta_i).rem_euclid(PLAYERS as i16)) as Seat
}

/// Returns the next seat clockwise (0 → 1 → … → 4 → 0).
#[inline]
pub fn next_seat(s: Seat) -> Seat {
    seat_offset(s, 1)
}

/// Seat to the left of the dealer: opens the bidding and, by default, leads trick 1.
#[inline]
pub fn round_start_seat(dealer: Seat) -> Seat {
    next_seat(dealer)
}

/// Expected actor seat during a trick.
///
/// `leader` leads the trick; `play_count` is how many cards are already down.
#[inline]
pub fn expected_actor(leader: Seat, play_count: u8) -> Seat {
    seat_offset(leader, play_count as i8)
}

pub fn require_turn(state: &GameState, ctx: &'static str) -> Result<Seat, RulesError> {
    state
        .turn
        .ok_or_else(|| RulesError::invariant(format!("turn must be set ({ctx})")))
}

pub fn require_contract(state: &GameState, ctx: &'static str) -> Result<Contract, RulesError> {
    state
        .contract
        .ok_or_else(|| RulesError::invariant(format!("contract must be set ({ctx})")))
}

pub fn require_trick<'a>(
    state: &'a GameState,
    ctx: &'static str,
) -> Result<&'a Trick, RulesError> {
    state
        .current_trick
        .as_ref()
        .ok_or_else(|| RulesError::invariant(format!("current trick must be set ({ctx})")))
}
