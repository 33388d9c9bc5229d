//! War - stateless card game engine CLI
//!
//! Drives one move per invocation: the game state travels in the printed
//! token, exactly as it would over a request/response channel.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::time::{SystemTime, UNIX_EPOCH};
use war_engine::game::{
    Engine, GameLogger, GameState, MoveIntent, PlayerProfile, Rules, VerbosityLevel,
};
use war_engine::{codec, sim, WarError};

#[derive(Parser)]
#[command(name = "war")]
#[command(about = "War - two-player card game engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a fresh game and print its token
    New {
        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Deal the classic 52-card deck without the special cards
        #[arg(long)]
        no_nukes: bool,

        /// Display name carried in the state for the renderer
        #[arg(long)]
        name: Option<String>,
    },

    /// Decode a token and display the game
    Show {
        /// Game token from a previous move
        token: String,
    },

    /// Apply one move to a token and print the next token
    Move {
        /// Game token from the previous move
        token: String,

        /// Spend the one-shot nuke instead of a plain draw
        #[arg(long)]
        nuke: bool,
    },

    /// Play many games against itself and report statistics
    Simulate {
        /// Number of games to play
        #[arg(long, default_value_t = 1000)]
        games: usize,

        /// Base seed for a reproducible report
        #[arg(long)]
        seed: Option<u64>,

        /// Use the classic 52-card deck
        #[arg(long)]
        no_nukes: bool,

        /// Safety cap on moves per game
        #[arg(long, default_value_t = 5000)]
        max_moves: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::New {
            seed,
            no_nukes,
            name,
        } => {
            let engine = quiet_engine(Rules::default().with_nukes(!no_nukes));
            let mut state = match seed {
                Some(seed) => engine.new_game_seeded(seed),
                None => engine.new_game(),
            };
            if let Some(display_name) = name {
                state.profile = Some(PlayerProfile {
                    display_name,
                    avatar_url: None,
                });
            }
            print_view(&state);
            print_token(&state)?;
        }

        Commands::Show { token } => {
            let state = codec::decode(&token).context("could not decode the game token")?;
            print_view(&state);
        }

        Commands::Move { token, nuke } => {
            let engine = quiet_engine(Rules::default());
            let intent = if nuke { MoveIntent::Nuke } else { MoveIntent::Draw };

            let state = match codec::decode(&token) {
                Ok(state) => state,
                Err(e) => {
                    println!("Bad token ({}); dealing a fresh game instead.", e);
                    let state = engine.new_game();
                    print_view(&state);
                    print_token(&state)?;
                    return Ok(());
                }
            };

            match engine.apply_move(&state, intent, now_ms()?) {
                Ok(outcome) => {
                    print_view(&outcome.state);
                    if outcome.just_ended {
                        println!("(final result: report it to your stats keeper)");
                    }
                    print_token(&outcome.state)?;
                }
                Err(WarError::CooldownActive { remaining_ms }) => {
                    println!("Too fast! Try again in {} ms.", remaining_ms);
                    print_token(&state)?;
                }
                Err(WarError::InvalidMove(reason)) => {
                    println!("Move rejected: {}.", reason);
                    print_token(&state)?;
                }
                Err(e) => return Err(e).context("move failed"),
            }
        }

        Commands::Simulate {
            games,
            seed,
            no_nukes,
            max_moves,
        } => {
            let rules = Rules::default().with_nukes(!no_nukes);
            let report = sim::run_simulation(&rules, games, seed, max_moves);
            println!("{}", report);
        }
    }

    Ok(())
}

/// Round events would duplicate the printed message; keep only terminal
/// outcomes and audit diagnostics on stdout.
fn quiet_engine(rules: Rules) -> Engine {
    Engine::with_logger(rules, GameLogger::with_verbosity(VerbosityLevel::Silent))
}

fn now_ms() -> anyhow::Result<u64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?;
    Ok(now.as_millis() as u64)
}

fn print_view(state: &GameState) {
    if let Some(profile) = &state.profile {
        println!("Game for {}", profile.display_name);
    }
    println!("{}", state.message);

    let flip = |card: &Option<war_engine::core::Card>| {
        card.as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "--".to_string())
    };
    println!(
        "You: {} cards (showing {})   Opponent: {} cards (showing {})",
        state.player_deck.len(),
        flip(&state.player_card),
        state.opponent_deck.len(),
        flip(&state.opponent_card),
    );
    if state.war_in_progress {
        println!("War pile: {} cards at stake", state.war_pile.len());
    }
    if state.player_nuke {
        println!("Your nuke is armed (--nuke to spend it).");
    }
}

fn print_token(state: &GameState) -> anyhow::Result<()> {
    let token = codec::encode(state).context("could not encode the game token")?;
    println!("token: {}", token);
    Ok(())
}
