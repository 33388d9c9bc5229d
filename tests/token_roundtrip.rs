//! Token codec fidelity along real games
//!
//! The codec is the only persistence this system has, so the round-trip law
//! is checked against states an actual game reaches, not just a fresh deal.

use similar_asserts::assert_eq;
use war_engine::codec;
use war_engine::game::{
    Engine, GameLogger, GameStatus, MoveIntent, PlayerProfile, Rules, VerbosityLevel,
};
use war_engine::WarError;

const START_MS: u64 = 1_700_000_000_000;

fn engine() -> Engine {
    Engine::with_logger(
        Rules::default(),
        GameLogger::with_verbosity(VerbosityLevel::Silent),
    )
}

#[test]
fn test_round_trip_along_a_playout() {
    let engine = engine();
    let mut state = engine.new_game_seeded(42);
    state.profile = Some(PlayerProfile {
        display_name: "Ada".to_string(),
        avatar_url: None,
    });
    let mut now = START_MS;
    let mut saw_war_state = false;

    for _ in 0..200 {
        let token = codec::encode(&state).unwrap();
        assert_eq!(codec::decode(&token).unwrap(), state);

        if state.status == GameStatus::War {
            saw_war_state = true;
        }
        if state.is_over() {
            break;
        }
        now += engine.rules().cooldown_ms;
        state = engine
            .apply_move(&state, MoveIntent::Draw, now)
            .unwrap()
            .state;
    }

    // The forced-war interval makes a pending-war state all but certain
    // inside 200 moves; make sure the law covered it.
    assert!(saw_war_state, "playout never passed through a war state");
}

#[test]
fn test_moves_flow_through_tokens() {
    // Encode after every move and resume from the decoded state, exactly as
    // the request/response caller does.
    let engine = engine();
    let mut token = codec::encode(&engine.new_game_seeded(7)).unwrap();
    let mut now = START_MS;

    for _ in 0..50 {
        let state = codec::decode(&token).unwrap();
        if state.is_over() {
            break;
        }
        now += engine.rules().cooldown_ms;
        let outcome = engine.apply_move(&state, MoveIntent::Draw, now).unwrap();
        token = codec::encode(&outcome.state).unwrap();
    }

    let replay = codec::decode(&token).unwrap();
    assert!(replay.move_count > 0);
}

#[test]
fn test_compact_token_resumes_identically() {
    let engine = engine();
    let mut state = engine.new_game_seeded(13);
    state.profile = Some(PlayerProfile {
        display_name: "Grace".to_string(),
        avatar_url: Some("https://example.com/g.png".to_string()),
    });

    let mut now = START_MS;
    for _ in 0..10 {
        now += engine.rules().cooldown_ms;
        state = engine
            .apply_move(&state, MoveIntent::Draw, now)
            .unwrap()
            .state;
    }

    let compact = codec::decode(&codec::encode_compact(&state).unwrap()).unwrap();
    assert!(compact.message.is_empty());
    assert!(compact.profile.is_none());

    // Play one more move from each; the game-relevant outcome must match
    now += engine.rules().cooldown_ms;
    let from_full = engine.apply_move(&state, MoveIntent::Draw, now).unwrap().state;
    let from_compact = engine
        .apply_move(&compact, MoveIntent::Draw, now)
        .unwrap()
        .state;

    assert_eq!(from_compact.player_deck, from_full.player_deck);
    assert_eq!(from_compact.opponent_deck, from_full.opponent_deck);
    assert_eq!(from_compact.war_pile, from_full.war_pile);
    assert_eq!(from_compact.status, from_full.status);
    assert_eq!(from_compact.move_count, from_full.move_count);
    assert_eq!(from_compact.message, from_full.message);
}

#[test]
fn test_bad_token_falls_back_to_a_fresh_game() {
    let engine = engine();

    let err = codec::decode("definitely*not*a*token").unwrap_err();
    assert!(matches!(err, WarError::StateDecode(_)));
    assert!(err.is_recoverable());

    // The documented fallback
    let fresh = engine.new_game();
    assert_eq!(fresh.move_count, 0);
    assert!(!fresh.is_over());
}

#[test]
fn test_tampered_payload_is_rejected() {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

    // Valid base64, invalid state document
    let token = URL_SAFE_NO_PAD.encode(br#"{"player_deck": "oops"}"#);
    assert!(matches!(
        codec::decode(&token),
        Err(WarError::StateDecode(_))
    ));
}
