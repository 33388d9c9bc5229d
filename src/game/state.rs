//! Main game state structure

use crate::core::{standard_deck, Card, Pile};
use crate::game::rules::Rules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two sides of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    Player,
    Opponent,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Player => write!(f, "player"),
            Seat::Opponent => write!(f, "opponent"),
        }
    }
}

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Dealt, no move made yet
    #[default]
    Initial,
    /// Ordinary rounds
    Playing,
    /// A war is pending resolution
    War,
    /// Terminal; the state is read-only from here on
    Ended,
}

/// Display data supplied by an external identity collaborator
///
/// The engine stores this verbatim and never reads it; it rides along in the
/// token so the presentation layer can render a name and avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Complete game state
///
/// This is everything a move needs and everything a move produces: the
/// caller encodes it into a token after each move and sends it back with the
/// next one. Mutated exactly once per accepted move, and only by the engine;
/// once `status` is `Ended` it never changes again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player_deck: Pile,
    pub opponent_deck: Pile,

    /// Cards at stake during a war, face down, awarded in full on resolution
    pub war_pile: Pile,

    /// Most recent draws. These rest here between moves so the presentation
    /// layer can show the flip; they are banked into `round_winner`'s deck at
    /// the start of the next move.
    pub player_card: Option<Card>,
    pub opponent_card: Option<Card>,

    /// Which side the resting in-play cards belong to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_winner: Option<Seat>,

    /// Human-readable description of the last transition
    #[serde(default)]
    pub message: String,

    pub war_in_progress: bool,
    pub status: GameStatus,

    /// Monotonic count of accepted moves
    pub move_count: u32,

    /// Unix-epoch milliseconds of the last accepted move (0 before the first)
    pub last_move_ms: u64,

    /// One-shot special-move availability per side
    pub player_nuke: bool,
    pub opponent_nuke: bool,

    /// Fixed at deal time; the conservation invariant sums to this
    pub total_cards: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<PlayerProfile>,
}

impl GameState {
    /// Deal a fresh game: build the full deck, shuffle, split into two
    /// halves. With an odd card count the player's half is the larger one.
    pub fn deal(rules: &Rules, rng: &mut impl rand::Rng) -> Self {
        let mut deck = Pile::from_cards(standard_deck(rules));
        deck.shuffle(rng);

        let total = deck.len();
        let mut cards = deck.take_all();
        let opponent_half = cards.split_off(total - total / 2);

        GameState {
            player_deck: Pile::from_cards(cards),
            opponent_deck: Pile::from_cards(opponent_half),
            war_pile: Pile::new(),
            player_card: None,
            opponent_card: None,
            round_winner: None,
            message: "Welcome to War. Draw a card to begin.".to_string(),
            war_in_progress: false,
            status: GameStatus::Initial,
            move_count: 0,
            last_move_ms: 0,
            player_nuke: rules.include_nukes,
            opponent_nuke: rules.include_nukes,
            total_cards: total,
            profile: None,
        }
    }

    pub fn deck(&self, seat: Seat) -> &Pile {
        match seat {
            Seat::Player => &self.player_deck,
            Seat::Opponent => &self.opponent_deck,
        }
    }

    pub fn deck_mut(&mut self, seat: Seat) -> &mut Pile {
        match seat {
            Seat::Player => &mut self.player_deck,
            Seat::Opponent => &mut self.opponent_deck,
        }
    }

    pub fn nuke_available(&self, seat: Seat) -> bool {
        match seat {
            Seat::Player => self.player_nuke,
            Seat::Opponent => self.opponent_nuke,
        }
    }

    pub fn consume_nuke(&mut self, seat: Seat) {
        match seat {
            Seat::Player => self.player_nuke = false,
            Seat::Opponent => self.opponent_nuke = false,
        }
    }

    /// Cards resting in the in-play slots
    pub fn in_play_count(&self) -> usize {
        self.player_card.is_some() as usize + self.opponent_card.is_some() as usize
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Ended
    }

    /// Winner of a finished game: the side holding more cards (every terminal
    /// transition leaves the loser's deck empty). `None` while still playing.
    pub fn winner(&self) -> Option<Seat> {
        if !self.is_over() {
            return None;
        }
        if self.player_deck.len() >= self.opponent_deck.len() {
            Some(Seat::Player)
        } else {
            Some(Seat::Opponent)
        }
    }
}
