use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use moodgarden::{
    core::store::DayStore,
    day::FixedClock,
    garden::{surface::HeadlessSurface, view::GardenView},
    persist::{sqlite::SqliteKv, MemoryKv},
    types::{MoodId, PlantedToken},
};

fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).expect("date"))
}

fn token(i: u64) -> PlantedToken {
    let mood = MoodId::ALL[(i % 4) as usize];
    PlantedToken::new((i % 640) as f64, (i % 480) as f64, mood)
}

fn bench_append(c: &mut Criterion) {
    c.bench_function("append_plant_memory_500", |b| {
        b.iter(|| {
            let mut store = DayStore::new(MemoryKv::new(), clock());
            let key = store.key_for(0).expect("key");
            for i in 0..500u64 {
                store.append_plant(&key, token(i)).expect("append");
            }
        });
    });

    c.bench_function("append_plant_sqlite_500", |b| {
        b.iter(|| {
            let kv = SqliteKv::open_in_memory().expect("sqlite");
            let mut store = DayStore::new(kv, clock());
            let key = store.key_for(0).expect("key");
            for i in 0..500u64 {
                store.append_plant(&key, token(i)).expect("append");
            }
        });
    });
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_day");

    for n in [10u64, 100, 1000] {
        let mut store = DayStore::new(MemoryKv::new(), clock());
        let key = store.key_for(0).expect("key");
        for i in 0..n {
            store.append_plant(&key, token(i)).expect("append");
        }
        let mut view = GardenView::new(store, HeadlessSurface::new());

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| view.render_day(0).expect("render"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_append, bench_replay);
criterion_main!(benches);
