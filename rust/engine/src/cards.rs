use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{LayoutError, RanksError};

/// Number of suits in every deck.
pub const SUITS: usize = 4;

/// Number of playing stacks on the board.
pub const STACKS: usize = 2 * SUITS;

/// Smallest supported number of ranks per suit.
pub const MIN_RANKS: u8 = 5;

/// Largest supported number of ranks per suit (ace through king).
pub const MAX_RANKS: u8 = 13;

/// Size of the largest supported deck.
pub const MAX_CARDS: usize = MAX_RANKS as usize * SUITS;

/// Represents one of the four suits. The discriminant is the suit number
/// used by the card encoding and the save file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs (suit 0)
    Clubs = 0,
    /// Diamonds (suit 1)
    Diamonds = 1,
    /// Hearts (suit 2)
    Hearts = 2,
    /// Spades (suit 3)
    Spades = 3,
}

impl Suit {
    pub fn from_index(i: usize) -> Suit {
        match i % SUITS {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Single letter used when a card is shown.
    pub fn letter(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

/// A card encoded as `rank * 4 + suit`.
///
/// Ranks run from 1 (ace) to 13 (king). Rank 0 is reserved: the values 0..=3
/// are per-suit sentinels meaning "nothing of this suit placed yet" and only
/// ever appear on a foundation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(u8);

impl Card {
    /// Largest encodable value (king of spades).
    pub const MAX_ENCODED: u8 = MAX_RANKS * SUITS as u8 + (SUITS as u8 - 1);

    /// Builds a card from a rank (1..=13) and suit. Returns `None` outside that range.
    pub fn new(rank: u8, suit: Suit) -> Option<Card> {
        if (1..=MAX_RANKS).contains(&rank) {
            Some(Card(rank * SUITS as u8 + suit as u8))
        } else {
            None
        }
    }

    /// The foundation base for `suit`.
    pub fn sentinel(suit: Suit) -> Card {
        Card(suit as u8)
    }

    /// Decodes a raw value as stored in a save file.
    pub fn from_encoded(value: i32) -> Option<Card> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX_ENCODED)
            .map(Card)
    }

    pub fn encoded(self) -> i32 {
        i32::from(self.0)
    }

    pub fn rank(self) -> u8 {
        self.0 / SUITS as u8
    }

    pub fn suit(self) -> Suit {
        Suit::from_index(usize::from(self.0))
    }

    pub fn is_sentinel(self) -> bool {
        self.rank() == 0
    }

    /// The next card of the same suit, or `None` past the king.
    pub fn successor(self) -> Option<Card> {
        Card::new(self.rank() + 1, self.suit())
    }

    /// Character used to show the rank: `-` for a sentinel, then `A 2 .. 9 T J Q K`.
    pub fn rank_char(self) -> char {
        match self.rank() {
            0 => '-',
            1 => 'A',
            r @ 2..=9 => char::from(b'0' + r),
            10 => 'T',
            11 => 'J',
            12 => 'Q',
            13 => 'K',
            _ => '?',
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit().letter(), self.rank_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}={})", self.0, self)
    }
}

/// Number of ranks in play, always within `MIN_RANKS..=MAX_RANKS`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Ranks(u8);

impl Ranks {
    /// The full 52-card game.
    pub const FULL: Ranks = Ranks(MAX_RANKS);

    pub fn new(count: u8) -> Result<Ranks, RanksError> {
        if (MIN_RANKS..=MAX_RANKS).contains(&count) {
            Ok(Ranks(count))
        } else {
            Err(RanksError {
                got: i64::from(count),
            })
        }
    }

    /// Recovers the rank count from a total card count (as stored in a save file).
    pub fn from_card_count(cards: i32) -> Result<Ranks, LayoutError> {
        if cards < 0 || cards % SUITS as i32 != 0 {
            return Err(LayoutError::CardCount(cards));
        }
        let got = i64::from(cards) / SUITS as i64;
        let count = u8::try_from(got).map_err(|_| RanksError { got })?;
        Ok(Ranks::new(count)?)
    }

    pub fn count(self) -> u8 {
        self.0
    }

    pub fn card_count(self) -> usize {
        usize::from(self.0) * SUITS
    }

    /// Whether `card` is a real card of a deck with this many ranks.
    pub fn contains(self, card: Card) -> bool {
        (1..=self.0).contains(&card.rank())
    }
}

impl Default for Ranks {
    fn default() -> Self {
        Ranks::FULL
    }
}

impl TryFrom<u8> for Ranks {
    type Error = RanksError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ranks::new(value)
    }
}

impl From<Ranks> for u8 {
    fn from(r: Ranks) -> u8 {
        r.0
    }
}

impl fmt::Display for Ranks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ordered deck for `ranks`: encoded values `4 ..= 4R+3`.
pub fn full_deck(ranks: Ranks) -> Vec<Card> {
    let first = SUITS as u8;
    let last = first + ranks.card_count() as u8;
    (first..last).map(Card).collect()
}
