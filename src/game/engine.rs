//! Turn-resolution engine
//!
//! One public operation: take the prior state and the mover's intent,
//! return the next state. The engine never mutates the caller's state;
//! every accepted move produces a fresh value, so a stateless
//! request/response caller can hold the old token until the new one is
//! persisted.
//!
//! Callers own a single-writer discipline per token: submitting two
//! concurrent moves from the same token is undefined from the game's point
//! of view (the last state persisted wins).

use crate::core::Card;
use crate::game::audit;
use crate::game::cooldown;
use crate::game::logger::{GameLogger, VerbosityLevel};
use crate::game::rules::{AuditMode, Rules, WarPolicy};
use crate::game::state::{GameState, GameStatus, PlayerProfile, Seat};
use crate::{Result, WarError};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use smallvec::SmallVec;

/// What the mover wants to do this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveIntent {
    /// Flip the top card of each deck
    Draw,
    /// Spend the player's one-shot nuke, then draw as usual
    Nuke,
}

/// Result of an accepted move
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// The next state; encode it and hand the token back to the caller
    pub state: GameState,

    /// True only on the move that finished the game. A stats collaborator
    /// keying off this fires exactly once per game, not once per render.
    pub just_ended: bool,
}

/// Why a war is being set up this move
enum WarReason {
    Tie,
    Forced,
    Chained,
}

/// The turn-resolution engine
///
/// Owns the rule set and a logger; holds no game data. All game data flows
/// in and out of `apply_move`.
pub struct Engine {
    rules: Rules,
    logger: GameLogger,
}

impl Engine {
    pub fn new(rules: Rules) -> Self {
        Engine {
            rules,
            logger: GameLogger::new(),
        }
    }

    pub fn with_logger(rules: Rules, logger: GameLogger) -> Self {
        Engine { rules, logger }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    /// Deal a fresh game from an entropy-seeded shuffle
    pub fn new_game(&self) -> GameState {
        let mut rng = ChaCha12Rng::from_entropy();
        GameState::deal(&self.rules, &mut rng)
    }

    /// Deal a reproducible game from a fixed seed
    pub fn new_game_seeded(&self, seed: u64) -> GameState {
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        GameState::deal(&self.rules, &mut rng)
    }

    /// Deal a fresh game carrying pass-through display data
    pub fn new_game_with_profile(&self, profile: PlayerProfile) -> GameState {
        let mut state = self.new_game();
        state.profile = Some(profile);
        state
    }

    /// Resolve one move
    ///
    /// `now_ms` is the caller's clock (Unix-epoch milliseconds); the engine
    /// compares it against the state's last-move stamp for the cooldown gate
    /// and stamps it into the next state. Recoverable rejections
    /// (`InvalidMove`, `CooldownActive`) leave the caller's state untouched.
    pub fn apply_move(
        &self,
        state: &GameState,
        intent: MoveIntent,
        now_ms: u64,
    ) -> Result<MoveOutcome> {
        if state.is_over() {
            return Err(WarError::InvalidMove(
                "the game is already over".to_string(),
            ));
        }

        self.audit(state)?;

        if cooldown::is_on_cooldown(state.last_move_ms, now_ms, self.rules.cooldown_ms) {
            return Err(WarError::CooldownActive {
                remaining_ms: cooldown::remaining_ms(
                    state.last_move_ms,
                    now_ms,
                    self.rules.cooldown_ms,
                ),
            });
        }

        if intent == MoveIntent::Nuke && !state.nuke_available(Seat::Player) {
            return Err(WarError::InvalidMove("nuke is not available".to_string()));
        }

        let mut next = state.clone();

        // Bank the previous round's in-play cards before anything else; the
        // emptiness checks below must see them in their owner's deck.
        self.settle_pending_round(&mut next);

        if next.player_deck.is_empty() || next.opponent_deck.is_empty() {
            let winner = Self::ahead_side(&next);
            let message = match winner {
                Seat::Player => "Game over. You win — the opponent is out of cards.",
                Seat::Opponent => "Game over. The opponent wins — you are out of cards.",
            };
            self.end_game(&mut next, winner, message.to_string());
        } else {
            let mut nuke_note = None;
            if intent == MoveIntent::Nuke {
                nuke_note = self.resolve_nuke(&mut next, Seat::Player);
            }

            if !next.is_over() {
                self.resolve_draw(&mut next);
                self.post_move_check(&mut next);
            }

            if let Some(note) = nuke_note {
                next.message = format!("{} {}", note, next.message);
            }
        }

        next.move_count += 1;
        next.last_move_ms = now_ms;

        self.audit(&next)?;

        let just_ended = next.is_over();
        Ok(MoveOutcome {
            state: next,
            just_ended,
        })
    }

    /// Run the conservation check under the configured audit mode
    fn audit(&self, state: &GameState) -> Result<()> {
        if let Err(mismatch) = audit::verify_card_count(state) {
            let payload = serde_json::to_string(&mismatch)
                .unwrap_or_else(|_| mismatch.to_string());
            self.logger
                .event("audit", VerbosityLevel::Minimal, &payload);
            if self.rules.audit_mode == AuditMode::Strict {
                return Err(WarError::InvariantViolation(mismatch));
            }
        }
        Ok(())
    }

    /// Move a resolved round's in-play cards to the bottom of the winner's
    /// deck, so captured cards are not immediately re-drawable.
    fn settle_pending_round(&self, state: &mut GameState) {
        let Some(winner) = state.round_winner.take() else {
            return;
        };
        let cards: SmallVec<[Card; 2]> = state
            .player_card
            .take()
            .into_iter()
            .chain(state.opponent_card.take())
            .collect();
        for card in cards {
            state.deck_mut(winner).add_to_bottom(card);
        }
    }

    /// The side currently holding more cards; ties go to the player
    fn ahead_side(state: &GameState) -> Seat {
        if state.player_deck.len() >= state.opponent_deck.len() {
            Seat::Player
        } else {
            Seat::Opponent
        }
    }

    /// Spend the nuke. Returns a message fragment when play continues.
    fn resolve_nuke(&self, state: &mut GameState, seat: Seat) -> Option<String> {
        state.consume_nuke(seat);
        let target = seat.other();

        if state.deck(target).len() <= self.rules.nuke_threshold {
            let captured = state.deck_mut(target).take_all();
            let n = captured.len();
            state.deck_mut(seat).extend(captured);
            let message = match seat {
                Seat::Player => format!(
                    "Nuke launched! The opponent's last {} cards are wiped out. You win!",
                    n
                ),
                Seat::Opponent => format!(
                    "The opponent launches a nuke! Your last {} cards are wiped out.",
                    n
                ),
            };
            self.logger
                .event("nuke", VerbosityLevel::Normal, &message);
            self.end_game(state, seat, message);
            None
        } else {
            let captured = state
                .deck_mut(target)
                .take_from_bottom(self.rules.nuke_capture);
            let n = captured.len();
            for card in captured {
                state.deck_mut(seat).add_to_bottom(card);
            }
            let note = match seat {
                Seat::Player => format!(
                    "Nuke launched: {} cards torn from the bottom of the opponent's deck.",
                    n
                ),
                Seat::Opponent => {
                    format!("The opponent's nuke tears {} cards from your deck.", n)
                }
            };
            self.logger.event("nuke", VerbosityLevel::Normal, &note);
            Some(note)
        }
    }

    /// Flip one card per side and resolve the comparison
    fn resolve_draw(&self, state: &mut GameState) {
        let resolving_war = state.war_in_progress;

        let (player_card, opponent_card) = match (
            state.player_deck.draw_top(),
            state.opponent_deck.draw_top(),
        ) {
            (Some(p), Some(o)) => (p, o),
            // Both decks were verified non-empty; anything else is corruption
            // and the exit audit will flag it.
            _ => return,
        };

        let player_value = self.rules.rank_value(&player_card);
        let opponent_value = self.rules.rank_value(&opponent_card);

        state.player_card = Some(player_card);
        state.opponent_card = Some(opponent_card);

        if resolving_war {
            self.resolve_war(state, player_value, opponent_value);
        } else if self.forced_war_due(state) {
            self.start_war(state, WarReason::Forced);
        } else if player_value == opponent_value {
            self.start_war(state, WarReason::Tie);
        } else {
            let winner = if player_value > opponent_value {
                Seat::Player
            } else {
                Seat::Opponent
            };
            self.finish_round(state, winner);
        }
    }

    /// A forced war fires on fixed move ordinals, never on a resolution draw
    fn forced_war_due(&self, state: &GameState) -> bool {
        self.rules
            .forced_war_interval
            .map_or(false, |n| n > 0 && (state.move_count + 1) % n == 0)
    }

    fn finish_round(&self, state: &mut GameState, winner: Seat) {
        let player = Self::display(&state.player_card);
        let opponent = Self::display(&state.opponent_card);

        state.round_winner = Some(winner);
        state.status = GameStatus::Playing;
        state.message = match winner {
            Seat::Player => format!("You win the round: {} beats {}.", player, opponent),
            Seat::Opponent => {
                format!("The opponent wins the round: {} beats {}.", opponent, player)
            }
        };
        self.logger
            .event("round", VerbosityLevel::Normal, &state.message);
    }

    /// Stake face-down cards and leave the war pending, or end the game when
    /// one side cannot fight
    fn start_war(&self, state: &mut GameState, reason: WarReason) {
        let stake = self.rules.war_stake;

        if state.player_deck.len() < stake || state.opponent_deck.len() < stake {
            let winner = Self::ahead_side(state);
            self.award_everything(state, winner);
            let message = match winner {
                Seat::Player => {
                    "The opponent cannot fight the war. You take every remaining card. You win!"
                }
                Seat::Opponent => {
                    "You cannot fight the war. The opponent takes every remaining card."
                }
            };
            self.end_game(state, winner, message.to_string());
            return;
        }

        for _ in 0..stake {
            if let Some(mut card) = state.player_deck.draw_top() {
                card.face_down = true;
                state.war_pile.add(card);
            }
            if let Some(mut card) = state.opponent_deck.draw_top() {
                card.face_down = true;
                state.war_pile.add(card);
            }
        }

        let player = Self::display(&state.player_card);
        let opponent = Self::display(&state.opponent_card);
        if let Some(card) = state.player_card.take() {
            state.war_pile.add(card);
        }
        if let Some(card) = state.opponent_card.take() {
            state.war_pile.add(card);
        }

        state.round_winner = None;
        state.war_in_progress = true;
        state.status = GameStatus::War;
        state.message = match reason {
            WarReason::Tie => format!(
                "War! {} matches {}. Each side lays {} cards face down.",
                player, opponent, stake
            ),
            WarReason::Forced => format!(
                "The decks demand war! Each side lays {} cards face down.",
                stake
            ),
            WarReason::Chained => {
                format!("The war deepens! {} matches {} again.", player, opponent)
            }
        };
        self.logger
            .event("war", VerbosityLevel::Normal, &state.message);
    }

    /// Settle a pending war: the higher draw sweeps the pile
    fn resolve_war(&self, state: &mut GameState, player_value: u8, opponent_value: u8) {
        let winner = if player_value > opponent_value {
            Seat::Player
        } else if opponent_value > player_value {
            Seat::Opponent
        } else {
            match self.rules.war_policy {
                WarPolicy::Chain => {
                    self.start_war(state, WarReason::Chained);
                    return;
                }
                // An exact re-tie cannot be settled by rank; the bigger deck
                // prevails, ties to the player.
                WarPolicy::Immediate => Self::ahead_side(state),
            }
        };

        let mut pot = state.war_pile.take_all();
        for card in &mut pot {
            card.face_down = false;
        }
        let swept = pot.len() + 2;
        for card in pot {
            state.deck_mut(winner).add_to_bottom(card);
        }

        state.round_winner = Some(winner);
        state.war_in_progress = false;
        state.status = GameStatus::Playing;
        state.message = match winner {
            Seat::Player => format!("You win the war and sweep {} cards!", swept),
            Seat::Opponent => format!("The opponent wins the war and sweeps {} cards.", swept),
        };
        self.logger
            .event("war", VerbosityLevel::Normal, &state.message);
    }

    /// Move every card on the table into the winner's deck
    fn award_everything(&self, state: &mut GameState, winner: Seat) {
        let loser = winner.other();
        let cards = state.deck_mut(loser).take_all();
        state.deck_mut(winner).extend(cards);

        let in_play: SmallVec<[Card; 2]> = state
            .player_card
            .take()
            .into_iter()
            .chain(state.opponent_card.take())
            .collect();
        state.deck_mut(winner).extend(in_play);
        state.round_winner = None;
    }

    /// Terminal transition: sweep any staked cards to the winner and freeze
    fn end_game(&self, state: &mut GameState, winner: Seat, message: String) {
        let pot = state.war_pile.take_all();
        for mut card in pot {
            card.face_down = false;
            state.deck_mut(winner).add(card);
        }
        state.war_in_progress = false;
        state.round_winner = None;
        state.status = GameStatus::Ended;
        state.message = message;
        self.logger
            .event("end", VerbosityLevel::Minimal, &state.message);
    }

    /// End the game when a deck ran dry this move
    fn post_move_check(&self, state: &mut GameState) {
        if state.is_over() {
            return;
        }
        if !state.player_deck.is_empty() && !state.opponent_deck.is_empty() {
            return;
        }

        // A side that just won the round may only be out of cards on paper;
        // bank the in-play cards before judging.
        self.settle_pending_round(state);
        if !state.player_deck.is_empty() && !state.opponent_deck.is_empty() {
            return;
        }

        let winner = Self::ahead_side(state);
        let message = match winner {
            Seat::Player => "Game over. You win — the opponent is out of cards.",
            Seat::Opponent => "Game over. The opponent wins — you are out of cards.",
        };
        self.end_game(state, winner, message.to_string());
    }

    fn display(card: &Option<Card>) -> String {
        card.as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}
