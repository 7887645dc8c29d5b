//! Benchmarks for value search: inline scan vs forked workers.
//!
//! Run with `cargo bench --features concurrent-search`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strand_list::{RefList, ValueRef};

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");
    group.sample_size(20);

    for &len in &[1_000usize, 10_000, 100_000] {
        let pool: Vec<u64> = (0..len as u64).collect();

        let mut inline = RefList::with_capacity(len);
        let mut forked = RefList::with_capacity(len);
        for v in &pool {
            inline.try_push_back(ValueRef::new(v)).unwrap();
            forked.try_push_back(ValueRef::new(v)).unwrap();
        }

        // Thresholds pinned so each list exercises exactly one strategy.
        inline.set_inline_search_max(usize::MAX);
        forked.set_inline_search_max(0);

        let mut rng = StdRng::seed_from_u64(7);
        group.bench_with_input(BenchmarkId::new("inline", len), &len, |b, &len| {
            b.iter(|| {
                let target = &pool[rng.gen_range(0..len)];
                black_box(inline.find(ValueRef::new(black_box(target))))
            });
        });

        let mut rng = StdRng::seed_from_u64(7);
        group.bench_with_input(BenchmarkId::new("forked", len), &len, |b, &len| {
            b.iter(|| {
                let target = &pool[rng.gen_range(0..len)];
                black_box(forked.find(ValueRef::new(black_box(target))))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find);
criterion_main!(benches);
