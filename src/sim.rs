//! Self-play simulation for running many games in parallel and collecting
//! statistics
//!
//! Each game runs independently on the rayon pool with its own derived seed,
//! so a report is reproducible from a base seed. Doubles as a soak test: the
//! engine audits card conservation on every one of the simulated moves.

use crate::game::{Engine, GameLogger, GameState, MoveIntent, Rules, Seat, VerbosityLevel};
use rayon::prelude::*;
use std::sync::{Arc, Mutex};

/// Aggregated results of a simulation run
#[derive(Debug, Default, Clone)]
pub struct SimReport {
    pub games: usize,
    pub player_wins: usize,
    pub opponent_wins: usize,
    /// Games stopped at the safety move cap without a winner
    pub stalled: usize,
    /// Games aborted by an engine error (should stay zero)
    pub failed: usize,
    pub total_moves: u64,
    pub wars_fought: u64,
    pub nukes_launched: u64,
}

impl SimReport {
    pub fn moves_per_game(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.games as f64
        }
    }
}

impl std::fmt::Display for SimReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Games:          {}", self.games)?;
        writeln!(f, "Player wins:    {}", self.player_wins)?;
        writeln!(f, "Opponent wins:  {}", self.opponent_wins)?;
        writeln!(f, "Stalled:        {}", self.stalled)?;
        writeln!(f, "Failed:         {}", self.failed)?;
        writeln!(f, "Wars fought:    {}", self.wars_fought)?;
        writeln!(f, "Nukes launched: {}", self.nukes_launched)?;
        write!(f, "Moves per game: {:.1}", self.moves_per_game())
    }
}

/// Outcome of one simulated game
struct GameTally {
    winner: Option<Seat>,
    moves: u64,
    wars: u64,
    nukes: u64,
    failed: bool,
}

/// Play `games` full games in parallel and aggregate the results
///
/// `base_seed` pins every shuffle for a reproducible report; a random base
/// is drawn when omitted. `max_moves` bounds each game, since two decks can
/// cycle indefinitely.
pub fn run_simulation(
    rules: &Rules,
    games: usize,
    base_seed: Option<u64>,
    max_moves: u32,
) -> SimReport {
    let base = base_seed.unwrap_or_else(rand::random);
    let report = Arc::new(Mutex::new(SimReport {
        games,
        ..SimReport::default()
    }));

    (0..games).into_par_iter().for_each(|idx| {
        let logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        let engine = Engine::with_logger(rules.clone(), logger);
        let tally = play_one(&engine, base.wrapping_add(idx as u64), max_moves);

        let mut report = report.lock().unwrap();
        report.total_moves += tally.moves;
        report.wars_fought += tally.wars;
        report.nukes_launched += tally.nukes;
        if tally.failed {
            report.failed += 1;
        } else {
            match tally.winner {
                Some(Seat::Player) => report.player_wins += 1,
                Some(Seat::Opponent) => report.opponent_wins += 1,
                None => report.stalled += 1,
            }
        }
    });

    let report = report.lock().unwrap();
    report.clone()
}

fn play_one(engine: &Engine, seed: u64, max_moves: u32) -> GameTally {
    let mut state = engine.new_game_seeded(seed);
    let mut tally = GameTally {
        winner: None,
        moves: 0,
        wars: 0,
        nukes: 0,
        failed: false,
    };

    // Virtual clock: step exactly one cooldown period per move so the gate
    // never fires during simulation.
    let mut now = engine.rules().cooldown_ms;

    while !state.is_over() && tally.moves < max_moves as u64 {
        let intent = pick_intent(engine.rules(), &state);
        let was_at_war = state.war_in_progress;

        match engine.apply_move(&state, intent, now) {
            Ok(outcome) => {
                if outcome.state.war_in_progress && !was_at_war {
                    tally.wars += 1;
                }
                if intent == MoveIntent::Nuke {
                    tally.nukes += 1;
                }
                state = outcome.state;
            }
            Err(_) => {
                tally.failed = true;
                return tally;
            }
        }

        tally.moves += 1;
        now += engine.rules().cooldown_ms;
    }

    tally.winner = state.winner();
    tally
}

/// Nuke as soon as it wins outright, otherwise draw
fn pick_intent(rules: &Rules, state: &GameState) -> MoveIntent {
    if state.nuke_available(Seat::Player)
        && state.opponent_deck.len() <= rules.nuke_threshold
        && !state.opponent_deck.is_empty()
    {
        MoveIntent::Nuke
    } else {
        MoveIntent::Draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_accounts_for_every_game() {
        let rules = Rules::default();
        let report = run_simulation(&rules, 16, Some(99), 2000);

        assert_eq!(report.games, 16);
        assert_eq!(
            report.player_wins + report.opponent_wins + report.stalled + report.failed,
            16
        );
        assert_eq!(report.failed, 0);
        assert!(report.total_moves > 0);
    }

    #[test]
    fn test_simulation_is_reproducible_from_a_seed() {
        let rules = Rules::default().with_nukes(false);
        let a = run_simulation(&rules, 8, Some(7), 2000);
        let b = run_simulation(&rules, 8, Some(7), 2000);

        assert_eq!(a.player_wins, b.player_wins);
        assert_eq!(a.opponent_wins, b.opponent_wins);
        assert_eq!(a.total_moves, b.total_moves);
        assert_eq!(a.wars_fought, b.wars_fought);
    }

    #[test]
    fn test_52_card_variant_never_nukes() {
        let rules = Rules::default().with_nukes(false);
        let report = run_simulation(&rules, 8, Some(21), 2000);
        assert_eq!(report.nukes_launched, 0);
    }
}
