use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use starroute_lib::{
    Galaxy, GalaxyDocument, RoutePlan, RouteSearch, SearchLimits, System, SystemId,
    SystemPosition, TravelProfile, WormholeStrategy,
};
use std::hint::black_box;

const GRID: i64 = 40;

/// Square grid of systems with hyperlanes to the right and below, plus a
/// sprinkling of wormholes.
static GALAXY: Lazy<Galaxy> = Lazy::new(|| {
    let id = |x: i64, y: i64| -> SystemId { y * GRID + x };
    let mut document = GalaxyDocument::default();
    for y in 0..GRID {
        for x in 0..GRID {
            document.systems.push(System {
                id: id(x, y),
                name: format!("G{x}-{y}"),
                position: Some(SystemPosition {
                    x: x as f64,
                    y: y as f64,
                    z: 0.0,
                }),
                danger: ((x * 7 + y * 13) % 5) as f64 * 0.1,
                jump_range: None,
            });
            if x + 1 < GRID {
                document.hyperlanes.push((id(x, y), id(x + 1, y)));
            }
            if y + 1 < GRID {
                document.hyperlanes.push((id(x, y), id(x, y + 1)));
            }
        }
    }
    for step in (0..GRID).step_by(8) {
        document.wormholes.push(starroute_lib::galaxy::WormholeDefinition {
            from: id(step, 0),
            to: id(GRID - 1 - step, GRID - 1),
            fuel: 0,
            days: 0,
        });
    }
    Galaxy::from_document(document).expect("benchmark galaxy is valid")
});

fn benchmark_pathfinding(c: &mut Criterion) {
    let galaxy = &*GALAXY;
    let corner = GRID * GRID - 1;

    c.bench_function("reachability_hyperlane", |b| {
        b.iter(|| {
            let search =
                RouteSearch::from_origin(galaxy, 0, SearchLimits::default()).expect("origin exists");
            black_box(search.len())
        });
    });

    c.bench_function("reachability_jump_and_wormholes", |b| {
        let profile = TravelProfile::hyperlane_only(100)
            .with_jump_drive(150, 2.5)
            .with_wormholes(WormholeStrategy::All);
        b.iter(|| {
            let search = RouteSearch::with_profile(galaxy, 0, profile, SearchLimits::default())
                .expect("origin exists");
            black_box(search.len())
        });
    });

    c.bench_function("plan_to_far_corner", |b| {
        b.iter(|| {
            let plan = RoutePlan::new(galaxy, 0, corner).expect("origin exists");
            black_box(plan.required_fuel())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
