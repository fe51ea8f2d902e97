//! Performance benchmarks for tagdb
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tagdb::TagStore;

#[derive(Debug, Clone)]
struct User {
    id: u64,
    #[allow(dead_code)]
    name: String,
}

const MALE: u32 = 1;
const FEMALE: u32 = 2;
const ADULT: u32 = 3;
const PREMIUM: u32 = 4;

/// Build a store of `n` users spread across the four tags
fn create_store(n: u64) -> TagStore<User> {
    let store = TagStore::new();
    for id in 0..n {
        let mut tags = vec![if id % 2 == 0 { MALE } else { FEMALE }];
        if id % 3 != 0 {
            tags.push(ADULT);
        }
        if id % 17 == 0 {
            tags.push(PREMIUM);
        }
        store.add(
            User {
                id,
                name: format!("user-{}", id),
            },
            &tags,
        );
    }
    store
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    for size in [1_000u64, 10_000] {
        group.bench_with_input(BenchmarkId::new("single", size), &size, |b, &size| {
            b.iter(|| {
                let store = TagStore::new();
                for id in 0..size {
                    store.add(id, &[MALE, ADULT]);
                }
                black_box(store.len())
            })
        });

        group.bench_with_input(BenchmarkId::new("batch", size), &size, |b, &size| {
            b.iter(|| {
                let store = TagStore::new();
                store.add_batch(0..size, &[MALE, ADULT]);
                black_box(store.len())
            })
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for size in [1_000u64, 100_000] {
        let store = create_store(size);

        group.bench_with_input(BenchmarkId::new("single_tag", size), &store, |b, store| {
            b.iter(|| {
                let q = store.query_by_tag(PREMIUM);
                let n = q.get().map(|v| v.len());
                store.release_result(q);
                black_box(n)
            })
        });

        group.bench_with_input(BenchmarkId::new("and_and_not", size), &store, |b, store| {
            b.iter(|| {
                let q = store.query_by_tag(MALE).and(ADULT).and_not(PREMIUM);
                let n = q.get().map(|v| v.len());
                store.release_result(q);
                black_box(n)
            })
        });

        group.bench_with_input(BenchmarkId::new("or_count", size), &store, |b, store| {
            b.iter(|| {
                let q = store.query_by_tag(PREMIUM).or(FEMALE);
                let n = q.count();
                store.release_result(q);
                black_box(n)
            })
        });

        group.bench_with_input(BenchmarkId::new("reused_buffer", size), &store, |b, store| {
            let mut buf: Vec<User> = Vec::with_capacity(size as usize);
            b.iter(|| {
                buf.clear();
                let q = store.query_by_tag(FEMALE).and(ADULT);
                let _ = q.append_to(&mut buf);
                store.release_result(q);
                black_box(buf.first().map(|u| u.id))
            })
        });
    }

    group.finish();
}

fn bench_fill_from(c: &mut Criterion) {
    let source = create_store(10_000);
    let dest = TagStore::new();

    c.bench_function("fill_from_10k", |b| {
        b.iter(|| {
            dest.fill_from(&source);
            black_box(dest.len())
        })
    });
}

criterion_group!(benches, bench_add, bench_queries, bench_fill_from);
criterion_main!(benches);
