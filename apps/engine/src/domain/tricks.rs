use tracing::debug;

use crate::domain::actions::{Action, ActionResult};
use crate::domain::cards_logic::{count_points, hand_has_suit, trick_winner_index, TrickContext};
use crate::domain::config::GameConfig;
use crate::domain::partner::PartnerCall;
use crate::domain::rules::TRICKS_PER_GAME;
use crate::domain::scoring;
use crate::domain::state::{
    require_contract, require_trick, require_turn, GameState, Phase, Seat, Trick,
};
use crate::domain::{Card, Suit, Trump};
use crate::errors::domain::{IllegalKind, RulesError};

/// Public facts that shape which plays are legal.
#[derive(Debug, Clone, Copy)]
pub struct PlayRules<'a> {
    pub config: &'a GameConfig,
    pub trump: Trump,
    /// The Joker has already been played this game.
    pub joker_out: bool,
}

impl PlayRules<'_> {
    fn mighty(&self) -> Card {
        self.config.mighty_for(self.trump)
    }

    fn joker_call_card(&self) -> Card {
        self.config.joker_call_for(self.trump)
    }
}

/// Compute the legal plays for `hand` into `trick`, independent of turn enforcement.
///
/// Leading: any card. A Joker lead names the suit to follow (one action per
/// suit). The joker-call card may be led with or without calling the Joker
/// while the Joker is still out and not in the leader's hand.
///
/// Following: a called Joker must be played. Otherwise follow the lead suit
/// if possible; the Joker is always playable and so is the Mighty when
/// `mighty_exempt_from_follow` is set.
pub fn legal_plays_from(hand: &[Card], trick: &Trick, rules: PlayRules<'_>) -> Vec<Action> {
    let mut cards = hand.to_vec();
    cards.sort();

    if trick.plays.is_empty() {
        let joker_call_card = rules.joker_call_card();
        let can_call = !rules.joker_out && !cards.contains(&Card::Joker);
        let mut out = Vec::with_capacity(cards.len() + 4);
        for card in cards {
            if card.is_joker() {
                out.extend(Suit::ALL.into_iter().map(|s| Action::Play {
                    card,
                    lead_suit: Some(s),
                    joker_call: false,
                }));
                continue;
            }
            out.push(Action::play(card));
            if card == joker_call_card && can_call {
                out.push(Action::Play {
                    card,
                    lead_suit: None,
                    joker_call: true,
                });
            }
        }
        return out;
    }

    if trick.joker_called && cards.contains(&Card::Joker) {
        return vec![Action::play(Card::Joker)];
    }

    if let Some(lead) = trick.lead_suit {
        if hand_has_suit(&cards, lead) {
            let mighty = rules.mighty();
            let exempt = rules.config.mighty_exempt_from_follow;
            return cards
                .into_iter()
                .filter(|c| c.is_suit(lead) || c.is_joker() || (exempt && *c == mighty))
                .map(Action::play)
                .collect();
        }
    }

    cards.into_iter().map(Action::play).collect()
}

/// Legal plays for `who` in the real game state.
pub fn legal_plays(state: &GameState, who: Seat) -> Vec<Action> {
    let Phase::Play { .. } = state.phase else {
        return Vec::new();
    };
    let (Some(trick), Some(contract)) = (state.current_trick.as_ref(), state.contract) else {
        return Vec::new();
    };
    let rules = PlayRules {
        config: &state.config,
        trump: contract.trump,
        joker_out: state.joker_out(),
    };
    legal_plays_from(&state.hands[who as usize], trick, rules)
}

/// Play a card into the current trick, enforcing turn, suit-following, and phase.
pub fn play_card(
    state: &mut GameState,
    who: Seat,
    card: Card,
    lead_suit: Option<Suit>,
    joker_call: bool,
) -> Result<ActionResult, RulesError> {
    let Phase::Play { trick_no } = state.phase else {
        return Err(RulesError::illegal(
            IllegalKind::PhaseMismatch,
            "Not in play phase",
        ));
    };

    let turn = require_turn(state, "play_card")?;
    if turn != who {
        return Err(RulesError::illegal(IllegalKind::OutOfTurn, "Out of turn"));
    }
    let contract = require_contract(state, "play_card")?;
    let trick = require_trick(state, "play_card")?;

    let hand = &state.hands[who as usize];
    if !hand.contains(&card) {
        return Err(RulesError::illegal(
            IllegalKind::CardNotInHand,
            format!("{card} not in hand"),
        ));
    }

    let leading = trick.plays.is_empty();
    if leading && card.is_joker() != lead_suit.is_some() {
        return Err(RulesError::illegal(
            IllegalKind::InvalidJokerLead,
            "A led Joker must name a suit; other cards must not",
        ));
    }
    if !leading && lead_suit.is_some() {
        return Err(RulesError::illegal(
            IllegalKind::InvalidJokerLead,
            "Only the leader names a suit",
        ));
    }

    let joker_out = state.joker_out();
    if joker_call {
        let call_card = state.config.joker_call_for(contract.trump);
        if !leading || card != call_card || joker_out || hand.contains(&Card::Joker) {
            return Err(RulesError::illegal(
                IllegalKind::InvalidJokerCall,
                format!("Joker call needs a lead of {call_card} with the Joker still out"),
            ));
        }
    }
    if trick.joker_called && hand.contains(&Card::Joker) && !card.is_joker() {
        return Err(RulesError::illegal(
            IllegalKind::MustPlayJoker,
            "The Joker was called",
        ));
    }

    let rules = PlayRules {
        config: &state.config,
        trump: contract.trump,
        joker_out,
    };
    let action = Action::Play {
        card,
        lead_suit,
        joker_call,
    };
    if !legal_plays_from(hand, trick, rules).contains(&action) {
        return Err(RulesError::illegal(
            IllegalKind::MustFollowSuit,
            format!("Must follow {:?}", trick.lead_suit),
        ));
    }

    // Move card from hand to trick
    state.hands[who as usize].retain(|c| *c != card);
    let trick = state
        .current_trick
        .as_mut()
        .ok_or_else(|| RulesError::invariant("current trick vanished"))?;
    if leading {
        trick.lead_suit = lead_suit.or(card.suit());
        trick.joker_called = joker_call;
    }
    trick.plays.push((who, card));
    let trick_complete = trick.is_complete();
    let next = trick.next_seat();

    let mut result = ActionResult::default();

    if state.partner_call == Some(PartnerCall::Card(card)) && !state.partner_revealed {
        state.partner_revealed = true;
        result.partner_revealed = true;
        debug!(partner = ?state.partner, "Partner revealed");
    }

    if !trick_complete {
        state.turn = Some(next);
        return Ok(result);
    }

    let winner = resolve_current_trick(state, trick_no)?;
    result.trick_completed = true;
    result.trick_winner = Some(winner);

    if trick_no == 1
        && state.partner_call == Some(PartnerCall::FirstTrick)
        && !state.partner_revealed
    {
        state.partner = (winner != contract.declarer).then_some(winner);
        state.partner_revealed = true;
        result.partner_revealed = true;
    }

    if trick_no >= TRICKS_PER_GAME {
        state.phase = Phase::Scoring;
        state.turn = None;
        scoring::settle(state)?;
        result.phase_transitioned = Some(state.phase);
        return Ok(result);
    }

    state.current_trick = Some(Trick::new(winner));
    state.turn = Some(winner);
    state.phase = Phase::Play {
        trick_no: trick_no + 1,
    };
    Ok(result)
}

/// Trick context for resolving `trick` as trick number `trick_no`.
pub fn trick_context(
    config: &GameConfig,
    trump: Trump,
    trick: &Trick,
    trick_no: u8,
) -> Option<TrickContext> {
    let lead_suit = trick.lead_suit?;
    let powerless = config.joker_powerless_first_last
        && (trick_no == 1 || trick_no == TRICKS_PER_GAME);
    Some(TrickContext {
        trump,
        mighty: config.mighty_for(trump),
        lead_suit,
        joker_led: trick.led_card() == Some(Card::Joker),
        joker_live: !trick.joker_called && !powerless,
        joker_led_beats_mighty: config.joker_led_beats_mighty,
    })
}

/// Resolve the completed current trick: credit points, archive it, return the winner.
fn resolve_current_trick(state: &mut GameState, trick_no: u8) -> Result<Seat, RulesError> {
    let contract = require_contract(state, "resolve_current_trick")?;
    let mut trick = state
        .current_trick
        .take()
        .ok_or_else(|| RulesError::invariant("no trick to resolve"))?;
    let ctx = trick_context(&state.config, contract.trump, &trick, trick_no)
        .ok_or_else(|| RulesError::invariant("completed trick without lead suit"))?;

    let cards: Vec<Card> = trick.cards().copied().collect();
    let winner = trick.plays[trick_winner_index(&cards, &ctx)].0;
    state.points_won[winner as usize] += count_points(&cards);
    trick.winner = Some(winner);
    debug!(trick_no, winner, "Trick resolved");
    state.tricks.push(trick);
    Ok(winner)
}
