//! Game state and turn resolution

pub mod audit;
pub mod cooldown;
pub mod engine;
pub mod logger;
pub mod rules;
pub mod state;

pub use audit::{verify_card_count, CountMismatch};
pub use engine::{Engine, MoveIntent, MoveOutcome};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use rules::{AuditMode, Rules, WarPolicy};
pub use state::{GameState, GameStatus, PlayerProfile, Seat};
