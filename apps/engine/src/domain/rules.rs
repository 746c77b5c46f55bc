//! Fixed table geometry for Mighty. House rules live in [`crate::domain::config`].

/// Number of seats at the table.
pub const PLAYERS: usize = 5;

/// Cards dealt to each seat.
pub const HAND_SIZE: usize = 10;

/// Cards set aside for the declarer.
pub const KITTY_SIZE: usize = 3;

/// 52 ranked cards plus the Joker.
pub const DECK_SIZE: usize = 53;

pub const TRICKS_PER_GAME: u8 = 10;

/// Point cards in the deck (A, K, Q, J, 10 of each suit).
pub const TOTAL_POINTS: u8 = 20;

/// Highest target a contract can name.
pub const MAX_TARGET: u8 = TOTAL_POINTS;

const _: () = assert!(PLAYERS * HAND_SIZE + KITTY_SIZE == DECK_SIZE);
