//! Core card-related types: Card, Rank, Suit, Trump

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Declared trump ("giruda") for the hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Trump {
    Suit(Suit),
    NoTrump,
}

impl Trump {
    pub const ALL: [Trump; 5] = [
        Trump::Suit(Suit::Clubs),
        Trump::Suit(Suit::Diamonds),
        Trump::Suit(Suit::Hearts),
        Trump::Suit(Suit::Spades),
        Trump::NoTrump,
    ];

    pub fn suit(self) -> Option<Suit> {
        match self {
            Trump::Suit(s) => Some(s),
            Trump::NoTrump => None,
        }
    }

    /// Bid tie-break priority: NoTrump > Spades > Diamonds > Hearts > Clubs.
    pub fn priority(self) -> u8 {
        match self {
            Trump::Suit(Suit::Clubs) => 0,
            Trump::Suit(Suit::Hearts) => 1,
            Trump::Suit(Suit::Diamonds) => 2,
            Trump::Suit(Suit::Spades) => 3,
            Trump::NoTrump => 4,
        }
    }
}

impl From<Suit> for Trump {
    fn from(suit: Suit) -> Self {
        Trump::Suit(suit)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Point cards are 10, J, Q, K, A.
    #[inline]
    pub const fn is_point(self) -> bool {
        matches!(
            self,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace
        )
    }
}

/// One of the 53 cards. Equality is by rank and suit; the Joker is a singleton.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Card {
    Ranked { suit: Suit, rank: Rank },
    Joker,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Card::Ranked { suit, rank }
    }

    pub fn suit(self) -> Option<Suit> {
        match self {
            Card::Ranked { suit, .. } => Some(suit),
            Card::Joker => None,
        }
    }

    pub fn rank(self) -> Option<Rank> {
        match self {
            Card::Ranked { rank, .. } => Some(rank),
            Card::Joker => None,
        }
    }

    #[inline]
    pub fn is_joker(self) -> bool {
        matches!(self, Card::Joker)
    }

    #[inline]
    pub fn is_suit(self, suit: Suit) -> bool {
        self.suit() == Some(suit)
    }

    pub fn is_point(self) -> bool {
        self.rank().is_some_and(Rank::is_point)
    }

    /// Dense index in `0..53`; the Joker is 52.
    pub fn index(self) -> usize {
        match self {
            Card::Ranked { suit, rank } => suit.index() * 13 + rank as usize,
            Card::Joker => 52,
        }
    }

    pub fn from_index(idx: usize) -> Option<Card> {
        match idx {
            0..=51 => Some(Card::new(Suit::ALL[idx / 13], Rank::ALL[idx % 13])),
            52 => Some(Card::Joker),
            _ => None,
        }
    }
}

// Note: Ord on Card is only for stable sorting: suit order C<D<H<S then rank
// order, Joker last. Do not use for trick resolution.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
