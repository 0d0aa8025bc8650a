use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use floorplan_rs::config::{Algorithm, PlacementConfig};
use floorplan_rs::ir::{AdjacencyPattern, Region, Room, Scenario};
use floorplan_rs::layout::{generate_layout, h_shape_regions, layout_scenario};
use floorplan_rs::parser::parse_scenario;
use std::hint::black_box;

fn house_source(rooms: usize, pattern: &str) -> String {
    let mut out = String::from("hshape 24 20 3\n");
    for i in 0..rooms {
        let w = 2 + (i % 3);
        let h = 2 + (i % 2);
        out.push_str(&format!("room {} \"Room {}\" {}x{}\n", i, i, w, h));
    }
    out.push_str(&format!("pattern {}\n", pattern));
    out
}

fn reference_rooms() -> Vec<Room> {
    vec![
        Room::new(0, 3.0, 4.0).named("Living Room"),
        Room::new(1, 2.0, 3.0).named("Kitchen"),
        Room::new(2, 2.0, 2.0).named("Dining Room"),
        Room::new(3, 3.0, 3.0).named("Bedroom"),
        Room::new(4, 2.0, 2.0).named("Bathroom"),
    ]
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for rooms in [5usize, 20, 60] {
        let input = house_source(rooms, "grid");
        group.bench_with_input(BenchmarkId::from_parameter(rooms), &input, |b, data| {
            b.iter(|| {
                let parsed = parse_scenario(black_box(data)).expect("parse failed");
                black_box(parsed.scenario.rooms.len());
            });
        });
    }
    group.finish();
}

fn bench_reference_house(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_house");
    let regions = h_shape_regions(15.0, 15.0, 3.0).expect("h-shape");
    let rooms = reference_rooms();
    let pairs = [(0, 1), (0, 2), (3, 4)];
    for algorithm in [Algorithm::GreedyOnly, Algorithm::BacktrackingThenGreedy] {
        let config = PlacementConfig {
            algorithm,
            timeout_seconds: 5.0,
            ..PlacementConfig::default()
        };
        group.bench_function(algorithm.as_str(), |b| {
            b.iter(|| {
                let result = generate_layout(black_box(&rooms), &regions, &pairs, &config)
                    .expect("layout failed");
                black_box(result.placed_count());
            });
        });
    }
    group.finish();
}

fn bench_greedy_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_scaling");
    let config = PlacementConfig {
        algorithm: Algorithm::GreedyOnly,
        ..PlacementConfig::default()
    };
    for (rooms, pattern) in [(10usize, "linear"), (20, "hub"), (40, "grid")] {
        let parsed = parse_scenario(&house_source(rooms, pattern)).expect("parse failed");
        group.bench_with_input(
            BenchmarkId::new(pattern, rooms),
            &parsed.scenario,
            |b, scenario| {
                b.iter(|| {
                    let result = layout_scenario(black_box(scenario), &config).expect("layout failed");
                    black_box(result.adjacency_stats().satisfied);
                });
            },
        );
    }
    group.finish();
}

fn bench_step_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_step");
    let mut scenario = Scenario {
        regions: vec![Region::new(0.0, 0.0, 30.0, 20.0)],
        rooms: (0..16).map(|id| Room::new(id, 3.0, 2.0)).collect(),
        ..Scenario::default()
    };
    scenario.apply_pattern(AdjacencyPattern::Grid);
    for step in [0.5f32, 1.0, 2.0] {
        let config = PlacementConfig {
            algorithm: Algorithm::GreedyOnly,
            step,
            ..PlacementConfig::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(step),
            &scenario,
            |b, scenario| {
                b.iter(|| {
                    let result = layout_scenario(black_box(scenario), &config).expect("layout failed");
                    black_box(result.placed_count());
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_reference_house, bench_greedy_scaling, bench_step_sizes
);
criterion_main!(benches);
