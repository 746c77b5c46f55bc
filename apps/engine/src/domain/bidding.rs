//! The auction: bids, passes, miss-deal calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::actions::Action;
use crate::domain::cards_logic::count_points;
use crate::domain::config::GameConfig;
use crate::domain::rules::{MAX_TARGET, PLAYERS};
use crate::domain::scoring::{Outcome, RedealReason};
use crate::domain::state::{next_seat, Contract, GameState, Phase, Seat};
use crate::domain::{Card, Trump};
use crate::errors::domain::{IllegalKind, RulesError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bid {
    pub seat: Seat,
    pub trump: Trump,
    pub target: u8,
}

impl Bid {
    /// Strictly higher: more points, or the same points in a higher-priority trump.
    /// An equal bid never overrides.
    pub fn beats(&self, other: &Bid) -> bool {
        (self.target, self.trump.priority()) > (other.target, other.trump.priority())
    }
}

/// Auction bookkeeping. A seat that passes is out for the rest of the auction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    /// Bids in the order they were placed.
    pub bids: Vec<Bid>,
    pub passed: [bool; PLAYERS],
    pub highest: Option<Bid>,
}

impl Auction {
    pub fn pass_count(&self) -> usize {
        self.passed.iter().filter(|p| **p).count()
    }

    /// Whether `trump`/`target` is a valid bid right now.
    pub fn accepts(&self, config: &GameConfig, seat: Seat, trump: Trump, target: u8) -> bool {
        if target < config.min_target(trump) || target > MAX_TARGET {
            return false;
        }
        let candidate = Bid {
            seat,
            trump,
            target,
        };
        self.highest.is_none_or(|h| candidate.beats(&h))
    }

    /// The next seat after `after` still in the auction.
    pub fn next_bidder(&self, after: Seat) -> Option<Seat> {
        let mut seat = after;
        for _ in 0..PLAYERS {
            seat = next_seat(seat);
            if !self.passed[seat as usize] {
                return Some(seat);
            }
        }
        None
    }

    /// Closed with a winner: every other seat has passed.
    pub fn winner(&self) -> Option<Bid> {
        let highest = self.highest?;
        (self.pass_count() == PLAYERS - 1).then_some(highest)
    }

    pub fn all_passed(&self) -> bool {
        self.pass_count() == PLAYERS
    }
}

/// Whether `hand` is weak enough to call a miss-deal under `config`.
pub fn miss_deal_eligible(config: &GameConfig, hand: &[Card]) -> bool {
    config
        .miss_deal_max_points
        .is_some_and(|max| count_points(hand) <= max)
}

/// Legal auction actions for `seat` holding `hand`.
///
/// Pass is always available; bids are every (trump, target) that beats the
/// current highest bid; a miss-deal call when the hand is weak enough.
pub fn bidding_actions(
    config: &GameConfig,
    auction: &Auction,
    seat: Seat,
    hand: &[Card],
) -> Vec<Action> {
    let mut out = vec![Action::Pass];
    if miss_deal_eligible(config, hand) {
        out.push(Action::CallMissDeal);
    }
    for trump in Trump::ALL {
        for target in config.min_target(trump)..=MAX_TARGET {
            if auction.accepts(config, seat, trump, target) {
                out.push(Action::Bid { trump, target });
            }
        }
    }
    out
}

fn check_bidding_turn(state: &GameState, who: Seat) -> Result<(), RulesError> {
    if state.phase != Phase::Bidding {
        return Err(RulesError::illegal(
            IllegalKind::PhaseMismatch,
            "Not in bidding phase",
        ));
    }
    if state.turn != Some(who) {
        return Err(RulesError::illegal(IllegalKind::OutOfTurn, "Out of turn"));
    }
    Ok(())
}

/// Place a bid. Returns the phase entered if the bid closed the auction.
pub fn place_bid(
    state: &mut GameState,
    who: Seat,
    trump: Trump,
    target: u8,
) -> Result<Option<Phase>, RulesError> {
    check_bidding_turn(state, who)?;
    if !state.auction.accepts(&state.config, who, trump, target) {
        return Err(RulesError::illegal(
            IllegalKind::InvalidBid,
            format!("Bid {target} {trump} does not beat the current bid"),
        ));
    }

    let bid = Bid {
        seat: who,
        trump,
        target,
    };
    state.auction.bids.push(bid);
    state.auction.highest = Some(bid);
    debug!(seat = who, %trump, target, "Bid placed");
    advance_auction(state, who)
}

/// Pass. Returns the phase entered if the pass closed the auction.
pub fn pass(state: &mut GameState, who: Seat) -> Result<Option<Phase>, RulesError> {
    check_bidding_turn(state, who)?;
    state.auction.passed[who as usize] = true;
    advance_auction(state, who)
}

/// Call a miss-deal: the game ends for a redeal.
pub fn call_miss_deal(state: &mut GameState, who: Seat) -> Result<Option<Phase>, RulesError> {
    check_bidding_turn(state, who)?;
    if !miss_deal_eligible(&state.config, &state.hands[who as usize]) {
        return Err(RulesError::illegal(
            IllegalKind::MissDealNotAllowed,
            "Hand holds too many point cards for a miss-deal",
        ));
    }
    debug!(seat = who, "Miss-deal called");
    finish_with_redeal(state, RedealReason::MissDeal { seat: who });
    Ok(Some(Phase::Finished))
}

fn finish_with_redeal(state: &mut GameState, reason: RedealReason) {
    state.outcome = Some(Outcome::Redeal(reason));
    state.phase = Phase::Finished;
    state.turn = None;
}

fn advance_auction(state: &mut GameState, who: Seat) -> Result<Option<Phase>, RulesError> {
    if state.auction.all_passed() {
        debug!("All seats passed; redeal");
        finish_with_redeal(state, RedealReason::AllPass);
        return Ok(Some(Phase::Finished));
    }

    if let Some(winner) = state.auction.winner() {
        let declarer = winner.seat;
        // Declarer picks up the kitty.
        let kitty = std::mem::take(&mut state.kitty);
        let hand = &mut state.hands[declarer as usize];
        hand.extend(kitty);
        hand.sort();

        state.contract = Some(Contract {
            declarer,
            trump: winner.trump,
            target: winner.target,
        });
        state.phase = Phase::Exchange;
        state.turn = Some(declarer);
        debug!(declarer, trump = %winner.trump, target = winner.target, "Auction closed");
        return Ok(Some(Phase::Exchange));
    }

    let next = state
        .auction
        .next_bidder(who)
        .ok_or_else(|| RulesError::invariant("auction open but no seat left to bid"))?;
    state.turn = Some(next);
    Ok(None)
}
