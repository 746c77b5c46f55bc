//! Card parsing from string representations (e.g., "AS", "2C", "JK")

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit, Trump};
use crate::errors::domain::RulesError;

fn rank_char(rank: Rank) -> char {
    match rank {
        Rank::Two => '2',
        Rank::Three => '3',
        Rank::Four => '4',
        Rank::Five => '5',
        Rank::Six => '6',
        Rank::Seven => '7',
        Rank::Eight => '8',
        Rank::Nine => '9',
        Rank::Ten => 'T',
        Rank::Jack => 'J',
        Rank::Queen => 'Q',
        Rank::King => 'K',
        Rank::Ace => 'A',
    }
}

fn suit_char(suit: Suit) -> char {
    match suit {
        Suit::Clubs => 'C',
        Suit::Diamonds => 'D',
        Suit::Hearts => 'H',
        Suit::Spades => 'S',
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Ranked { suit, rank } => write!(f, "{}{}", rank_char(*rank), suit_char(*suit)),
            Card::Joker => write!(f, "JK"),
        }
    }
}

impl fmt::Display for Trump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trump::Suit(s) => write!(f, "{}", suit_char(*s)),
            Trump::NoTrump => write!(f, "NT"),
        }
    }
}

impl FromStr for Suit {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(Suit::Clubs),
            "D" => Ok(Suit::Diamonds),
            "H" => Ok(Suit::Hearts),
            "S" => Ok(Suit::Spades),
            _ => Err(RulesError::ParseCard(format!("Invalid suit: {s}"))),
        }
    }
}

impl FromStr for Trump {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "NT" {
            return Ok(Trump::NoTrump);
        }
        s.parse::<Suit>().map(Trump::Suit)
    }
}

impl FromStr for Card {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "JK" {
            return Ok(Card::Joker);
        }
        if s.len() != 2 {
            return Err(RulesError::ParseCard(format!("Parse card: {s}")));
        }
        let mut chars = s.chars();
        let (Some(rank_ch), Some(suit_ch)) = (chars.next(), chars.next()) else {
            return Err(RulesError::ParseCard(format!("Parse card: {s}")));
        };
        let rank = match rank_ch {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(RulesError::ParseCard(format!("Parse card: {s}"))),
        };
        let suit = match suit_ch {
            'C' => Suit::Clubs,
            'D' => Suit::Diamonds,
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            _ => return Err(RulesError::ParseCard(format!("Parse card: {s}"))),
        };
        Ok(Card::new(suit, rank))
    }
}

/// Non-panicking helper to parse card tokens (e.g., "AS", "2C", "JK").
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, RulesError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
