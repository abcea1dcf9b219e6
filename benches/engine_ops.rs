use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use game_2048::engine::{self, Direction, Game, Grid};
use std::hint::black_box;

fn corpus() -> Vec<Grid> {
    let mut game = Game::seeded(42);
    let mut grids = vec![Grid::EMPTY, *game.grid()];
    // Derive a variety of densities deterministically
    let seq = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];
    for i in 0..40 {
        if game.is_over() {
            game.reset();
        }
        game.make_move(seq[i % seq.len()]);
        grids.push(*game.grid());
    }
    grids
}

fn bench_shift(c: &mut Criterion) {
    let grids = corpus();
    for dir in Direction::ALL {
        c.bench_function(&format!("shift/{dir}"), |bch| {
            bch.iter(|| {
                let mut acc = 0u64;
                for g in &grids {
                    acc = acc.wrapping_add(engine::shift(g, dir).gained);
                }
                black_box(acc)
            })
        });
    }
}

fn bench_game(c: &mut Criterion) {
    c.bench_function("game/new_seeded", |bch| {
        let mut seed = 0u64;
        bch.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(Game::seeded(seed))
        })
    });
    c.bench_function("game/make_move_cycle", |bch| {
        bch.iter_batched(
            || Game::seeded(9),
            |mut game| {
                for dir in Direction::ALL.iter().cycle().take(64) {
                    game.make_move(*dir);
                }
                black_box(game.score())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_queries(c: &mut Criterion) {
    let grids = corpus();
    c.bench_function("query/is_terminal", |bch| {
        bch.iter(|| black_box(grids.iter().filter(|g| engine::is_terminal(g)).count()))
    });
    c.bench_function("query/empty_cells", |bch| {
        bch.iter(|| black_box(grids.iter().map(|g| g.empty_cells().len()).sum::<usize>()))
    });
}

criterion_group!(engine_ops, bench_shift, bench_game, bench_queries);
criterion_main!(engine_ops);
