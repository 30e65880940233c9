//! Benchmarks for record copying and map conversion
//!
//! Run with: cargo bench --bench copy_bench

use beankit::convert::{from_map, to_map};
use beankit::copier::{CopierCache, copy_many};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

beankit::record! {
    #[derive(Debug, Default, Clone)]
    pub struct User {
        pub id: String,
        pub email: String,
        pub name: Option<String>,
        pub age: Option<i32>,
        pub balance: f64,
        pub is_active: bool,
        pub tags: Vec<String>,
    }
}

beankit::record! {
    #[derive(Debug, Default, Clone)]
    pub struct UserSummary {
        pub id: String,
        pub name: Option<String>,
        pub is_active: bool,
        pub age: Option<i64>,
    }
}

fn generate_users(count: usize) -> Vec<User> {
    (0..count)
        .map(|i| User {
            id: format!("user-{i}"),
            email: format!("user{i}@example.com"),
            name: Some(format!("User {i}")),
            age: Some(20 + (i % 60) as i32),
            balance: 1000.0 + (i as f64 * 10.5),
            is_active: i % 2 == 0,
            tags: vec!["bench".to_string()],
        })
        .collect()
}

/// Cached plan versus a plan built on every call
fn bench_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy");
    let user = generate_users(1).remove(0);

    group.bench_function("cached", |b| {
        let cache = CopierCache::new();
        b.iter(|| black_box(cache.copy::<User, UserSummary>(Some(&user))));
    });

    group.bench_function("uncached", |b| {
        b.iter(|| {
            let cache = CopierCache::new();
            black_box(cache.copy::<User, UserSummary>(Some(&user)))
        });
    });

    group.finish();
}

fn bench_copy_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_many");

    for count in [10, 100, 1000].iter() {
        let users = generate_users(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("records", count), &users, |b, users| {
            b.iter(|| black_box(copy_many::<User, UserSummary>(users)));
        });
    }

    group.finish();
}

fn bench_map_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_conversion");
    let user = generate_users(1).remove(0);
    let map = to_map(Some(&user), false);

    group.bench_function("to_map", |b| {
        b.iter(|| black_box(to_map(Some(&user), true)));
    });

    group.bench_function("from_map", |b| {
        b.iter(|| black_box(from_map::<User>(Some(&map))));
    });

    group.finish();
}

criterion_group!(benches, bench_copy, bench_copy_many, bench_map_conversion);
criterion_main!(benches);
