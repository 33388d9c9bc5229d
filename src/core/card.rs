//! Card model: suits, ranks, and deck construction

use crate::game::rules::Rules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four suits of a standard deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn symbol(&self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card rank. Ordinary cards run 2..=14 (Jack 11, Queen 12, King 13, Ace 14);
/// how an Ace compares is decided by the rule set, not stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank(pub u8);

impl Rank {
    pub const TWO: Rank = Rank(2);
    pub const TEN: Rank = Rank(10);
    pub const JACK: Rank = Rank(11);
    pub const QUEEN: Rank = Rank(12);
    pub const KING: Rank = Rank(13);
    pub const ACE: Rank = Rank(14);

    pub fn as_u8(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            11 => write!(f, "J"),
            12 => write!(f, "Q"),
            13 => write!(f, "K"),
            14 => write!(f, "A"),
            n => write!(f, "{}", n),
        }
    }
}

/// A single card
///
/// Cards are immutable values; the only flag the engine ever toggles is
/// `face_down`, and only while the card sits in the war pile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,

    /// Set while the card is at stake, face down, in the war pile
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub face_down: bool,

    /// One-per-side special card with a fixed rank
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nuke: bool,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card {
            rank,
            suit,
            face_down: false,
            nuke: false,
        }
    }

    /// The special card carries its fixed rank so comparisons need no lookup
    pub fn new_nuke(rank: Rank, suit: Suit) -> Self {
        Card {
            rank,
            suit,
            face_down: false,
            nuke: true,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nuke {
            write!(f, "☢")
        } else {
            write!(f, "{}{}", self.rank, self.suit)
        }
    }
}

/// Build an unshuffled full deck: 4 suits × 13 ranks, plus one nuke card per
/// side (two total) when the rule set enables them.
pub fn standard_deck(rules: &Rules) -> Vec<Card> {
    let mut cards = Vec::with_capacity(54);
    for suit in Suit::ALL {
        for rank in 2..=14 {
            cards.push(Card::new(Rank(rank), suit));
        }
    }
    if rules.include_nukes {
        cards.push(Card::new_nuke(Rank(rules.nuke_rank), Suit::Spades));
        cards.push(Card::new_nuke(Rank(rules.nuke_rank), Suit::Hearts));
    }
    cards
}
