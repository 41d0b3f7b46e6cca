use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use snakes_ladders::board::BoardGenerator;
use snakes_ladders::core::{BoardConfig, GameConfig, GameMode, GameRng};
use snakes_ladders::engine::{HeadlessPresenter, Session};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for size in [30u32, 60, 100] {
        let generator = BoardGenerator::new(BoardConfig::for_size(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &generator, |b, generator| {
            let mut rng = GameRng::new(42);
            b.iter(|| black_box(generator.generate(&mut rng)));
        });
    }
    group.finish();
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("full_game_vs_computer", |b| {
        let mut session = Session::new(GameConfig::new().with_seed(7), HeadlessPresenter)
            .expect("default config is valid");
        b.iter(|| {
            session.start_game(GameMode::VsComputer);
            while session.state().winner().is_none() {
                session.roll_dice();
                session.run_until_idle(60_000);
            }
            black_box(session.state().history().len())
        });
    });
}

criterion_group!(benches, bench_generate, bench_full_game);
criterion_main!(benches);
