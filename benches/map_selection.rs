use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use placement_engine::{
    config::EngineConfig,
    model::{
        constants::{MATCHMAKING_BAND, NEAR_BAND_STEP, NEAR_MAX_BAND, NEAR_START_BAND},
        map_selection::{select_by_band, select_near},
        PlacementEngine
    },
    utils::test_utils::{generate_spread_pool, rated_player, seeded_rng}
};
use std::hint::black_box;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_selection");

    for step in [0.1, 0.01, 0.001] {
        let pool = generate_spread_pool(5.0, 11.0, step);
        let mut rng = seeded_rng(42);

        group.bench_with_input(BenchmarkId::new("select_by_band", pool.len()), &pool, |b, pool| {
            b.iter(|| select_by_band(black_box(pool), black_box(7.25), MATCHMAKING_BAND, &mut rng))
        });

        group.bench_with_input(BenchmarkId::new("select_near", pool.len()), &pool, |b, pool| {
            b.iter(|| {
                select_near(
                    black_box(pool),
                    black_box(7.25),
                    NEAR_START_BAND,
                    NEAR_MAX_BAND,
                    NEAR_BAND_STEP,
                    &mut rng
                )
            })
        });
    }

    group.finish();

    let pool = generate_spread_pool(5.0, 11.0, 0.01);
    c.bench_function("ranked_round", |b| {
        let mut engine = PlacementEngine::seeded(EngineConfig::default(), 42);
        b.iter(|| {
            let state = rated_player(7.0);
            let map = engine.next_map(None, &pool, &state).unwrap();
            engine.resolve(None, map, true, state).unwrap()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
