use agenda_router::{default_venue_config, VenueRouter};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_route(c: &mut Criterion) {
    let router = VenueRouter::new(default_venue_config()).unwrap();
    let rooms = ["AU", "AU101", "RB-101", "RB-105", "TR211", "TR409", "TR313", "Hallway"];

    c.bench_function("route_all_pairs", |b| {
        b.iter(|| {
            for from in &rooms {
                for to in &rooms {
                    black_box(router.route(Some(*from), to));
                }
            }
        })
    });

    c.bench_function("building_of_1000", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(router.building_of(rooms[i % rooms.len()]));
            }
        })
    });
}

criterion_group!(benches, bench_route);
criterion_main!(benches);
