//! House-rule configuration for one game.
//!
//! Mighty is played with many regional variants. Everything that changes
//! between tables (bid floor, Mighty/Joker precedence, scoring multipliers)
//! lives here and is passed into the rules engine explicitly; nothing reads
//! module-level settings.
//!
//! # Example JSON Config
//!
//! ```json
//! {
//!   "min_bid": 12,
//!   "joker_led_beats_mighty": true,
//!   "scoring": { "no_trump": 3 }
//! }
//! ```
//!
//! Missing fields take their defaults; see [`GameConfig::default`].

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::domain::cards_types::{Card, Rank, Suit, Trump};
use crate::domain::rules::MAX_TARGET;

/// Who leads the first trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FirstLead {
    /// The seat to the left of the dealer.
    AfterDealer,
    /// The declarer.
    Declarer,
}

/// Scoring multipliers and formula constants.
///
/// A contract is worth a base value, which is then multiplied by every
/// special-condition multiplier that applies:
///
/// - made: `win_base + win_per_target_step * (target - min_bid) + win_per_overtrick * (points - target)`
/// - failed: `loss_base + loss_per_undertrick * (target - points)`
///
/// Payouts are zero-sum: the declarer receives twice the value, the partner
/// once, and each opponent pays once. A solo declarer receives four times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub win_base: i32,
    pub win_per_target_step: i32,
    pub win_per_overtrick: i32,
    pub loss_base: i32,
    pub loss_per_undertrick: i32,
    pub no_trump: i32,
    pub solo: i32,
    /// Declarer team captured every point card.
    pub run: i32,
    /// Declarer team captured at most `back_run_threshold` points.
    pub back_run: i32,
    pub back_run_threshold: u8,
    /// Trump is the suit of the standard Mighty card.
    pub mighty_suit_trump: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            win_base: 1,
            win_per_target_step: 2,
            win_per_overtrick: 1,
            loss_base: 0,
            loss_per_undertrick: 1,
            no_trump: 2,
            solo: 2,
            run: 2,
            back_run: 2,
            back_run_threshold: 10,
            mighty_suit_trump: 1,
        }
    }
}

/// Immutable rules record for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Lowest target a suit bid may name.
    pub min_bid: u8,
    /// A no-trump bid may name this many points fewer than `min_bid`.
    pub no_trump_discount: u8,
    /// Target increase when the declarer changes trump during the exchange.
    pub trump_change_penalty: u8,
    /// A seat holding at most this many point cards may call a miss-deal.
    /// `None` disables miss-deals.
    pub miss_deal_max_points: Option<u8>,
    pub first_lead: FirstLead,
    pub mighty: Card,
    /// Mighty when trump is the suit of `mighty`.
    pub alternate_mighty: Card,
    pub joker_call_card: Card,
    /// Joker-call card when trump is the suit of `joker_call_card`.
    pub alternate_joker_call_card: Card,
    /// Mighty may be played at any time, even when holding the led suit.
    pub mighty_exempt_from_follow: bool,
    /// A led Joker beats the Mighty.
    pub joker_led_beats_mighty: bool,
    /// The Joker has no power on the first and the last trick.
    pub joker_powerless_first_last: bool,
    /// Point cards in the discards count for the declarer team.
    pub discards_count_for_declarer: bool,
    pub scoring: ScoringConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_bid: 13,
            no_trump_discount: 1,
            trump_change_penalty: 2,
            miss_deal_max_points: Some(1),
            first_lead: FirstLead::AfterDealer,
            mighty: Card::new(Suit::Spades, Rank::Ace),
            alternate_mighty: Card::new(Suit::Diamonds, Rank::Ace),
            joker_call_card: Card::new(Suit::Clubs, Rank::Three),
            alternate_joker_call_card: Card::new(Suit::Spades, Rank::Three),
            mighty_exempt_from_follow: false,
            joker_led_beats_mighty: false,
            joker_powerless_first_last: false,
            discards_count_for_declarer: false,
            scoring: ScoringConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a GameConfig from optional JSON value.
    ///
    /// Invalid JSON falls back to the defaults with a warning, mirroring how
    /// AI configs are read.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        match config {
            Some(json) => serde_json::from_value(json.clone()).unwrap_or_else(|err| {
                warn!(error = %err, "Invalid game config, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Lowest target allowed for a bid with this trump.
    pub fn min_target(&self, trump: Trump) -> u8 {
        match trump {
            Trump::NoTrump => self.min_bid.saturating_sub(self.no_trump_discount),
            Trump::Suit(_) => self.min_bid,
        }
        .min(MAX_TARGET)
    }

    /// The Mighty card under the given trump.
    pub fn mighty_for(&self, trump: Trump) -> Card {
        match (trump, self.mighty.suit()) {
            (Trump::Suit(t), Some(m)) if t == m => self.alternate_mighty,
            _ => self.mighty,
        }
    }

    /// The joker-call card under the given trump.
    pub fn joker_call_for(&self, trump: Trump) -> Card {
        match (trump, self.joker_call_card.suit()) {
            (Trump::Suit(t), Some(j)) if t == j => self.alternate_joker_call_card,
            _ => self.joker_call_card,
        }
    }
}
