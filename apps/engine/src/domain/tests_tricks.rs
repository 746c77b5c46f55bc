use crate::domain::fixtures::CardFixtures;
use crate::domain::partner::PartnerCall;
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{
    drive, hands_from_tokens, make_play_state, MakeGameStateArgs,
};
use crate::domain::{Action, GameConfig, GameState, InformationSet, Suit, Trump};
use crate::errors::domain::IllegalKind;

// Diamonds are trump, so the Mighty is the ace of spades (discarded here) and
// the joker-call card is the three of clubs. Seat 2 is void in hearts.
const SEAT0: &[&str] = &["KH", "QH", "4H", "5H", "3C", "4C", "5C", "6C", "7C", "8C"];
const SEAT1: &[&str] = &["AH", "JH", "6H", "7H", "9C", "TC", "JC", "QC", "KC", "AC"];
const SEAT2: &[&str] = &["2D", "5D", "3S", "4S", "5S", "6S", "7S", "8S", "9S", "TS"];
const SEAT3: &[&str] = &["8H", "9H", "TH", "3H", "2S", "JS", "QS", "KS", "2C", "JK"];
const SEAT4: &[&str] = &["2H", "3D", "4D", "6D", "7D", "8D", "9D", "TD", "JD", "QD"];
const DISCARDS: &[&str] = &["KD", "AD", "AS"];

const DIAMONDS: Trump = Trump::Suit(Suit::Diamonds);

fn play_state(dealer: u8, config: GameConfig) -> GameState {
    make_play_state(
        hands_from_tokens([SEAT0, SEAT1, SEAT2, SEAT3, SEAT4], DISCARDS),
        MakeGameStateArgs { config, dealer },
        4,
        DIAMONDS,
        13,
        PartnerCall::None,
    )
}

fn play(token: &str) -> Action {
    Action::play(CardFixtures::card(token))
}

#[test]
fn fixture_deal_is_complete() {
    let state = play_state(4, GameConfig::default());
    assert_eq!(state.card_count(), 53);
    let mut all: Vec<_> = state.hands.iter().flatten().copied().collect();
    all.extend(state.discards.iter().copied());
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 53);
}

#[test]
fn trump_beats_led_hearts_when_void() {
    let mut state = play_state(4, GameConfig::default());
    drive(
        &mut state,
        &[play("KH"), play("AH"), play("5D"), play("8H"), play("2H")],
    );

    let trick = state.tricks.last().unwrap();
    assert_eq!(trick.winner, Some(2), "highest trump wins, not the ace of hearts");
    assert_eq!(state.points_won[2], 2);
    assert_eq!(state.turn, Some(2));
    assert_eq!(state.phase, Phase::Play { trick_no: 2 });
    assert_eq!(state.current_trick.as_ref().unwrap().leader, 2);
}

#[test]
fn must_follow_suit_when_able() {
    let mut state = play_state(4, GameConfig::default());
    drive(&mut state, &[play("KH")]);
    let err = state.apply(&play("9C")).unwrap_err();
    assert_eq!(err.illegal_kind(), Some(IllegalKind::MustFollowSuit));

    let legal = state.legal_actions();
    assert_eq!(
        legal,
        vec![play("6H"), play("7H"), play("JH"), play("AH")],
        "only hearts are legal for seat 1"
    );
}

#[test]
fn void_seat_may_play_anything() {
    let mut state = play_state(4, GameConfig::default());
    drive(&mut state, &[play("KH"), play("AH")]);
    assert_eq!(state.legal_actions().len(), 10);
}

#[test]
fn card_not_in_hand_is_rejected() {
    let mut state = play_state(4, GameConfig::default());
    let err = state.apply(&play("AH")).unwrap_err();
    assert_eq!(err.illegal_kind(), Some(IllegalKind::CardNotInHand));
}

#[test]
fn joker_call_forces_the_joker_out() {
    let mut state = play_state(4, GameConfig::default());
    let call = Action::Play {
        card: CardFixtures::card("3C"),
        lead_suit: None,
        joker_call: true,
    };
    assert!(state.legal_actions().contains(&call));
    drive(&mut state, &[call, play("9C"), play("3S")]);

    assert_eq!(state.legal_actions(), vec![play("JK")]);
    let err = state.apply(&play("2C")).unwrap_err();
    assert_eq!(err.illegal_kind(), Some(IllegalKind::MustPlayJoker));

    drive(&mut state, &[play("JK"), play("2H")]);
    // The called Joker is dead: the highest club wins
    assert_eq!(state.tricks[0].winner, Some(1));

    let info = InformationSet::from_state(&state, 1);
    assert!(!info.knowledge.may_hold(2, crate::domain::Card::Joker));
    assert!(info.knowledge.is_void(2, Suit::Clubs));
    assert!(info.knowledge.is_void(4, Suit::Clubs));
}

#[test]
fn joker_call_needs_the_joker_call_card() {
    let mut state = play_state(4, GameConfig::default());
    let err = state
        .apply(&Action::Play {
            card: CardFixtures::card("4C"),
            lead_suit: None,
            joker_call: true,
        })
        .unwrap_err();
    assert_eq!(err.illegal_kind(), Some(IllegalKind::InvalidJokerCall));
}

#[test]
fn led_joker_must_name_a_suit() {
    // Dealer 2: seat 3 leads and holds the Joker
    let mut state = play_state(2, GameConfig::default());
    let err = state.apply(&play("JK")).unwrap_err();
    assert_eq!(err.illegal_kind(), Some(IllegalKind::InvalidJokerLead));

    let lead = Action::Play {
        card: CardFixtures::card("JK"),
        lead_suit: Some(Suit::Spades),
        joker_call: false,
    };
    assert!(state.legal_actions().contains(&lead));
    drive(&mut state, &[lead]);
    assert_eq!(
        state.current_trick.as_ref().unwrap().lead_suit,
        Some(Suit::Spades)
    );
}

#[test]
fn led_joker_is_powerless_on_the_first_trick() {
    let config = GameConfig {
        joker_powerless_first_last: true,
        ..GameConfig::default()
    };
    let mut state = play_state(2, config);
    let lead = Action::Play {
        card: CardFixtures::card("JK"),
        lead_suit: Some(Suit::Spades),
        joker_call: false,
    };
    // 3 JK, 4 3D (trump), 0 4C, 1 9C, 2 3S (must follow spades)
    drive(&mut state, &[lead, play("3D"), play("4C"), play("9C"), play("3S")]);
    assert_eq!(state.tricks[0].winner, Some(4));
}

#[test]
fn led_joker_wins_the_first_trick_by_default() {
    let mut state = play_state(2, GameConfig::default());
    let lead = Action::Play {
        card: CardFixtures::card("JK"),
        lead_suit: Some(Suit::Spades),
        joker_call: false,
    };
    drive(&mut state, &[lead, play("3D"), play("4C"), play("9C"), play("3S")]);
    assert_eq!(state.tricks[0].winner, Some(3));
}

#[test]
fn follower_may_not_name_a_suit() {
    let mut state = play_state(4, GameConfig::default());
    drive(&mut state, &[play("KH")]);
    let err = state
        .apply(&Action::Play {
            card: CardFixtures::card("AH"),
            lead_suit: Some(Suit::Hearts),
            joker_call: false,
        })
        .unwrap_err();
    assert_eq!(err.illegal_kind(), Some(IllegalKind::InvalidJokerLead));
}
