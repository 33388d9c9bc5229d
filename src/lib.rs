//! War engine - deterministic turn resolution for a two-player card game
//!
//! The engine is stateless between calls: every move takes the entire prior
//! game state (decoded from a transportable token), resolves one turn, and
//! returns the next state for the caller to re-encode and persist. Rendering,
//! identity lookups, and durable win/loss counters live outside this crate.

pub mod codec;
pub mod core;
pub mod error;
pub mod game;
pub mod sim;

pub use error::{Result, WarError};
