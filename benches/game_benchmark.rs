//! Performance benchmarks for the War engine
//!
//! Measures full-game playout throughput and the per-move cost of the
//! state-clone-plus-resolve transition, including the token codec path a
//! stateless caller pays on every move.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use war_engine::codec;
use war_engine::game::{Engine, GameLogger, GameState, MoveIntent, Rules, VerbosityLevel};

const START_MS: u64 = 1_700_000_000_000;
const MOVE_CAP: u32 = 5000;

fn silent_engine(rules: Rules) -> Engine {
    Engine::with_logger(rules, GameLogger::with_verbosity(VerbosityLevel::Silent))
}

fn play_out(engine: &Engine, seed: u64) -> (GameState, u32) {
    let mut state = engine.new_game_seeded(seed);
    let mut now = START_MS;
    let mut moves = 0;
    while !state.is_over() && moves < MOVE_CAP {
        now += engine.rules().cooldown_ms;
        state = engine
            .apply_move(&state, MoveIntent::Draw, now)
            .expect("benchmark move failed")
            .state;
        moves += 1;
    }
    (state, moves)
}

fn bench_full_game(c: &mut Criterion) {
    let engine = silent_engine(Rules::default());

    c.bench_function("full_game_playout", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let (state, moves) = play_out(&engine, black_box(seed));
            black_box((state.move_count, moves));
        });
    });
}

fn bench_single_move(c: &mut Criterion) {
    let engine = silent_engine(Rules::default());
    let state = engine.new_game_seeded(42);

    c.bench_function("single_move", |b| {
        b.iter(|| {
            let outcome = engine
                .apply_move(black_box(&state), MoveIntent::Draw, START_MS)
                .expect("move failed");
            black_box(outcome.state.move_count);
        });
    });
}

fn bench_token_round_trip(c: &mut Criterion) {
    let engine = silent_engine(Rules::default());
    let state = engine.new_game_seeded(42);

    c.bench_function("token_round_trip", |b| {
        b.iter(|| {
            let token = codec::encode(black_box(&state)).expect("encode failed");
            let decoded = codec::decode(&token).expect("decode failed");
            black_box(decoded.move_count);
        });
    });
}

criterion_group!(
    benches,
    bench_full_game,
    bench_single_move,
    bench_token_round_trip
);
criterion_main!(benches);
