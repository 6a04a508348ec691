use criterion::{black_box, criterion_group, criterion_main, Criterion};
use calculo_crush::core::{find_hint, find_matches, resolve_cascade, Board, WeightedTiles};
use calculo_crush::engine::Game;
use calculo_crush::core::GameConfig;

fn settled_board(seed: u32) -> Board {
    let mut tiles = WeightedTiles::classic(seed);
    let mut board = Board::generate(8, 8, &mut tiles);
    let _ = resolve_cascade(&mut board, &mut tiles, 1000);
    board
}

fn bench_find_matches(c: &mut Criterion) {
    let board = settled_board(12345);

    c.bench_function("find_matches_8x8", |b| {
        b.iter(|| find_matches(black_box(&board)))
    });
}

fn bench_find_hint(c: &mut Criterion) {
    let mut board = settled_board(12345);

    c.bench_function("find_hint_8x8", |b| {
        b.iter(|| find_hint(black_box(&mut board)))
    });
}

fn bench_resolve_fresh_board(c: &mut Criterion) {
    let mut seed = 0u32;

    c.bench_function("resolve_fresh_board", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let mut tiles = WeightedTiles::classic(seed);
            let mut board = Board::generate(8, 8, &mut tiles);
            resolve_cascade(&mut board, &mut tiles, 1000)
        })
    });
}

fn bench_hinted_turn(c: &mut Criterion) {
    let config = GameConfig {
        seed: Some(12345),
        starting_moves: u32::MAX,
        ..GameConfig::default()
    };
    let Ok(mut game) = Game::new(config) else {
        return;
    };

    c.bench_function("hinted_turn", |b| {
        b.iter(|| {
            if let Some((a, b)) = game.hint() {
                let _ = game.request_swap(a, b);
            } else {
                let _ = game.restart();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_find_matches,
    bench_find_hint,
    bench_resolve_fresh_board,
    bench_hinted_turn
);
criterion_main!(benches);
