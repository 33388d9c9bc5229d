//! Configurable rule set
//!
//! The source material disagrees on several rules (ace ranking, what a
//! re-tie during a war does, nuke thresholds), so those are configuration
//! rather than constants. `Rules::default()` is the canonical variant.

use crate::core::Card;
use serde::{Deserialize, Serialize};

/// What a second tie during an active war does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WarPolicy {
    /// The resolution draw always settles the war. A re-tied rank falls back
    /// to whichever side has more cards left, ties to the player.
    #[default]
    Immediate,
    /// A re-tied resolution draw stakes another round of face-down cards and
    /// keeps the war going.
    Chain,
}

/// How a card-conservation failure is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuditMode {
    /// Fail the move; the game state is corrupt
    #[default]
    Strict,
    /// Log the mismatch and continue best-effort
    Lenient,
}

/// Rule set for a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Ace compares as 14 when true, 1 when false
    pub ace_high: bool,

    /// Re-tie behavior during a war
    pub war_policy: WarPolicy,

    /// Conservation-failure behavior
    pub audit_mode: AuditMode,

    /// Deal the two special cards (54-card variant)
    pub include_nukes: bool,

    /// Opponent deck size at or below which a nuke wins outright
    pub nuke_threshold: usize,

    /// Cards captured from the bottom of the opponent's deck otherwise
    pub nuke_capture: usize,

    /// Fixed comparison rank of the special card
    pub nuke_rank: u8,

    /// Face-down cards each side stakes when a war starts
    pub war_stake: usize,

    /// Force a war every Nth move; `None` disables
    pub forced_war_interval: Option<u32>,

    /// Minimum milliseconds between accepted moves
    pub cooldown_ms: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            ace_high: true,
            war_policy: WarPolicy::default(),
            audit_mode: AuditMode::default(),
            include_nukes: true,
            nuke_threshold: 10,
            nuke_capture: 10,
            nuke_rank: 15,
            war_stake: 3,
            forced_war_interval: Some(12),
            cooldown_ms: 1000,
        }
    }
}

impl Rules {
    pub fn new() -> Self {
        Rules::default()
    }

    pub fn with_ace_high(mut self, ace_high: bool) -> Self {
        self.ace_high = ace_high;
        self
    }

    pub fn with_war_policy(mut self, policy: WarPolicy) -> Self {
        self.war_policy = policy;
        self
    }

    pub fn with_audit_mode(mut self, mode: AuditMode) -> Self {
        self.audit_mode = mode;
        self
    }

    pub fn with_nukes(mut self, include: bool) -> Self {
        self.include_nukes = include;
        self
    }

    pub fn with_nuke_threshold(mut self, threshold: usize) -> Self {
        self.nuke_threshold = threshold;
        self
    }

    pub fn with_nuke_capture(mut self, capture: usize) -> Self {
        self.nuke_capture = capture;
        self
    }

    pub fn with_forced_war_interval(mut self, interval: Option<u32>) -> Self {
        self.forced_war_interval = interval;
        self
    }

    pub fn with_cooldown_ms(mut self, cooldown_ms: u64) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    /// Total cards a game under these rules deals out
    pub fn total_cards(&self) -> usize {
        if self.include_nukes {
            54
        } else {
            52
        }
    }

    /// Effective comparison value of a card under these rules
    ///
    /// The special card keeps its fixed rank. An Ace maps to 1 when aces
    /// rank low; every other card compares as its face rank.
    pub fn rank_value(&self, card: &Card) -> u8 {
        if !card.nuke && card.rank.as_u8() == 14 && !self.ace_high {
            1
        } else {
            card.rank.as_u8()
        }
    }
}
