//! Card logic: suit checks, point counting, and trick resolution

use super::cards_types::{Card, Suit, Trump};

/// Check if a hand contains any ranked card of the given suit.
pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.is_suit(suit))
}

/// Number of point cards among `cards`.
pub fn count_points<'a, I>(cards: I) -> u8
where
    I: IntoIterator<Item = &'a Card>,
{
    cards.into_iter().filter(|c| c.is_point()).count() as u8
}

/// Everything needed to rank the cards of one trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickContext {
    pub trump: Trump,
    /// Mighty under the current trump.
    pub mighty: Card,
    /// Suit to follow: the led card's suit, or the suit named with a Joker lead.
    pub lead_suit: Suit,
    pub joker_led: bool,
    /// False when the Joker was called out or the trick is a powerless one.
    pub joker_live: bool,
    pub joker_led_beats_mighty: bool,
}

/// Index into `cards` (in play order) of the winning card.
///
/// Precedence: Mighty, then a live Joker, then the highest trump, then the
/// highest card of the lead suit. A live led Joker outranks the Mighty only
/// when `joker_led_beats_mighty` is set. When nothing qualifies (a dead Joker
/// led and nobody followed) the leader keeps the trick.
pub fn trick_winner_index(cards: &[Card], ctx: &TrickContext) -> usize {
    let joker_overrides_mighty = ctx.joker_led && ctx.joker_live && ctx.joker_led_beats_mighty;

    if !joker_overrides_mighty {
        if let Some(idx) = cards.iter().position(|&c| c == ctx.mighty) {
            return idx;
        }
    }

    if ctx.joker_live {
        if let Some(idx) = cards.iter().position(|c| c.is_joker()) {
            return idx;
        }
    }

    if let Some(trump_suit) = ctx.trump.suit() {
        if let Some(idx) = highest_of_suit(cards, trump_suit) {
            return idx;
        }
    }

    highest_of_suit(cards, ctx.lead_suit).unwrap_or(0)
}

fn highest_of_suit(cards: &[Card], suit: Suit) -> Option<usize> {
    cards
        .iter()
        .enumerate()
        .filter_map(|(i, c)| match c {
            Card::Ranked { suit: s, rank } if *s == suit => Some((i, *rank)),
            _ => None,
        })
        .max_by_key(|(_, rank)| *rank)
        .map(|(i, _)| i)
}
