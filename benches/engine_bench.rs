use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use trinity::board::{all_positions, Board, Phase, PlayerId, Pos, TileType};
use trinity::config::GameConfig;
use trinity::detect::detect;
use trinity::game::GameState;
use trinity::protocol::ascii::{encode_ascii, parse_ascii};

/// Mid-game board: both players' tiles interleaved, a few agent stacks.
const MIDGAME: &str = "\
H c I h . C i .
C . h I c . H .
i H . c I h . C
. I c . H . c h
h . C i . I . H
. c H . C h I .
I . i H . c C@1x2 .
. h . C i . H@2x3 I";

fn bench_detect_centre(c: &mut Criterion) {
    let mut board = Board::empty();
    board.set_tile(Pos::new(2, 3), TileType::Commerce, PlayerId(0)).unwrap();
    board.set_tile(Pos::new(4, 3), TileType::Industry, PlayerId(0)).unwrap();
    board.set_tile(Pos::new(3, 2), TileType::Commerce, PlayerId(0)).unwrap();
    board.set_tile(Pos::new(3, 4), TileType::Industry, PlayerId(0)).unwrap();
    c.bench_function("detect_centre_four_partners", |b| {
        b.iter(|| {
            detect(
                black_box(&board),
                black_box(Pos::new(3, 3)),
                TileType::Housing,
                PlayerId(0),
            )
        })
    });
}

fn bench_detect_sweep(c: &mut Criterion) {
    let board = parse_ascii(MIDGAME).unwrap();
    c.bench_function("detect_every_standing_tile", |b| {
        b.iter(|| {
            let mut found = 0;
            for (pos, tile) in board.tiles() {
                found += detect(black_box(&board), pos, tile.tile_type, tile.owner).len();
            }
            found
        })
    });
}

fn bench_parse_ascii(c: &mut Criterion) {
    c.bench_function("parse_ascii_midgame", |b| {
        b.iter(|| parse_ascii(black_box(MIDGAME)))
    });
}

fn bench_encode_ascii(c: &mut Criterion) {
    let board = parse_ascii(MIDGAME).unwrap();
    c.bench_function("encode_ascii_midgame", |b| {
        b.iter(|| encode_ascii(black_box(&board)))
    });
}

fn bench_full_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("playout");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));
    group.bench_function("four_players_hand_play", |b| {
        b.iter(|| {
            let mut rng = SmallRng::seed_from_u64(11);
            let mut state = GameState::new(GameConfig::with_players(4)).unwrap();
            state.set_phase(Phase::Playing);
            state.deal_hands(&mut rng);
            for pos in all_positions() {
                let _ = state.play_from_hand(0, pos, &mut rng);
                state.advance_turn();
            }
            state.landmarks().len()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_detect_centre,
    bench_detect_sweep,
    bench_parse_ascii,
    bench_encode_ascii,
    bench_full_playout,
);
criterion_main!(benches);
