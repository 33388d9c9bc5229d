//! Card-conservation checker
//!
//! Every zone of a healthy game sums to the card count fixed at deal time.
//! A mismatch is a logic defect in the engine (or a corrupted token) and is
//! never repaired, only reported.

use crate::game::state::GameState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-zone breakdown of a failed count, serializable as a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMismatch {
    pub player_deck: usize,
    pub opponent_deck: usize,
    pub war_pile: usize,
    pub in_play: usize,
    pub counted: usize,
    pub expected: usize,
}

impl fmt::Display for CountMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "counted {} of {} (player {}, opponent {}, war pile {}, in play {})",
            self.counted,
            self.expected,
            self.player_deck,
            self.opponent_deck,
            self.war_pile,
            self.in_play
        )
    }
}

/// Check that every card dealt is still in exactly one zone
pub fn verify_card_count(state: &GameState) -> Result<(), CountMismatch> {
    let player_deck = state.player_deck.len();
    let opponent_deck = state.opponent_deck.len();
    let war_pile = state.war_pile.len();
    let in_play = state.in_play_count();
    let counted = player_deck + opponent_deck + war_pile + in_play;

    if counted == state.total_cards {
        Ok(())
    } else {
        Err(CountMismatch {
            player_deck,
            opponent_deck,
            war_pile,
            in_play,
            counted,
            expected: state.total_cards,
        })
    }
}
