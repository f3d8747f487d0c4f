use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use dock_slot_core::clock::minutes;
use dock_slot_engine::prelude::*;
use dock_slot_model::prelude::*;

// ---------- Scenario knobs (busy distribution centre) ----------
const SEED: u64 = 0xD0C_51; // deterministic routes
const DOCKS: u32 = 12;
const ROUTE_COUNTS: &[usize] = &[60, 600, 6_000];
// ----------------------------------------------------------------

fn routes(count: usize) -> Vec<Route> {
    let config = RouteGenConfigBuilder::new()
        .route_count(count)
        .dock_count(DOCKS)
        .seed(SEED)
        .build()
        .expect("valid generator config");
    RouteGenerator::new(config).generate()
}

fn bench_build_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("busy_index");
    for &n in ROUTE_COUNTS {
        let routes = routes(n);
        let universe = DockUniverse::fixed(DOCKS);
        group.bench_with_input(BenchmarkId::new("build", n), &routes, |b, routes| {
            b.iter(|| black_box(BusyIndex::build(routes, &universe)))
        });
    }
    group.finish();
}

fn bench_probe(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe");
    for &n in ROUTE_COUNTS {
        let routes = routes(n);
        let index = BusyIndex::build(&routes, &DockUniverse::fixed(DOCKS));
        let original = routes[n / 2].planned_arrival();
        let config = ProbeConfig::default();
        group.bench_with_input(BenchmarkId::new("all_docks", n), &index, |b, index| {
            b.iter(|| black_box(probe(index, black_box(original), minutes(5), &config)))
        });
        group.bench_with_input(BenchmarkId::new("rank_offers", n), &index, |b, index| {
            b.iter(|| {
                let slots = probe(index, original, minutes(5), &config);
                black_box(rank_offers(&slots, original))
            })
        });
    }
    group.finish();
}

fn bench_session_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    let routes = routes(600);
    let id = routes[0].id().clone();
    let target = routes[0].planned_arrival() + minutes(90);

    group.bench_function("commit_analyze_remove", |b| {
        b.iter_batched(
            || {
                let mut session = SchedulingSession::default();
                session.load_routes(routes.clone());
                session
            },
            |mut session| {
                session
                    .commit_move(&id, target, "Dock 3")
                    .expect("route exists");
                let analysis = session.analyze(&id).expect("route exists");
                session.remove_move(&id);
                black_box(analysis)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_build_index, bench_probe, bench_session_round_trip);
criterion_main!(benches);
