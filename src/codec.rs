//! State codec: game state <-> transportable token
//!
//! The caller persists nothing but this token between moves, so the encoding
//! must be lossless for everything play depends on. Wire format is JSON
//! wrapped in URL-safe unpadded base64, safe to embed in a query string or a
//! form field.

use crate::game::state::GameState;
use crate::{Result, WarError};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// Encode the full state. `decode(encode(s)) == s` for every reachable state.
pub fn encode(state: &GameState) -> Result<String> {
    let json = serde_json::to_vec(state).map_err(|e| WarError::Serialization(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Encode a reduced projection for size-constrained channels
///
/// Drops the purely cosmetic fields (status message, pass-through profile);
/// everything required to resume play survives. Decoding a compact token
/// yields a state with an empty message.
pub fn encode_compact(state: &GameState) -> Result<String> {
    let mut projected = state.clone();
    projected.message = String::new();
    projected.profile = None;
    encode(&projected)
}

/// Decode a token back into a game state
///
/// Fails with [`WarError::StateDecode`] on anything malformed; the caller's
/// fallback is a fresh game, never a repair.
pub fn decode(token: &str) -> Result<GameState> {
    let json = URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|e| WarError::StateDecode(e.to_string()))?;
    serde_json::from_slice(&json).map_err(|e| WarError::StateDecode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::Rules;
    use crate::game::state::PlayerProfile;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn sample_state() -> GameState {
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        let mut state = GameState::deal(&Rules::default(), &mut rng);
        state.profile = Some(PlayerProfile {
            display_name: "Ada".to_string(),
            avatar_url: Some("https://example.com/a.png".to_string()),
        });
        state
    }

    #[test]
    fn test_round_trip() {
        let state = sample_state();
        let token = encode(&state).unwrap();
        assert_eq!(decode(&token).unwrap(), state);
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = encode(&sample_state()).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_compact_drops_only_cosmetics() {
        let state = sample_state();
        let compact = decode(&encode_compact(&state).unwrap()).unwrap();

        assert!(compact.message.is_empty());
        assert!(compact.profile.is_none());
        assert_eq!(compact.player_deck, state.player_deck);
        assert_eq!(compact.opponent_deck, state.opponent_deck);
        assert_eq!(compact.war_pile, state.war_pile);
        assert_eq!(compact.move_count, state.move_count);
        assert_eq!(compact.last_move_ms, state.last_move_ms);
        assert_eq!(compact.player_nuke, state.player_nuke);

        let full = encode(&state).unwrap();
        let small = encode_compact(&state).unwrap();
        assert!(small.len() < full.len());
    }

    #[test]
    fn test_malformed_tokens_fail_cleanly() {
        for bad in ["", "not/base64!", "AAAA", "e30"] {
            match decode(bad) {
                Err(WarError::StateDecode(_)) => {}
                other => panic!("expected StateDecode for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        let state = sample_state();
        let token = format!("  {}\n", encode(&state).unwrap());
        assert_eq!(decode(&token).unwrap(), state);
    }
}
