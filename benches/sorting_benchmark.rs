use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use idxsort::prelude::*;
use rand::Rng;
use std::hint::black_box;

fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("String Sort");
    group.sample_size(10);

    // Dataset generation
    let mut rng = rand::rng();
    let count = 10_000;

    let random_strings: Vec<String> = (0..count)
        .map(|_| {
            let len = rng.random_range(5..20);
            (0..len).map(|_| rng.random::<char>()).collect()
        })
        .collect();

    group.bench_function("quicksort", |b| {
        b.iter_batched(
            || random_strings.clone(),
            |mut data| quicksort(0, count, black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("mergesort (rotating)", |b| {
        b.iter_batched(
            || random_strings.clone(),
            |mut data| mergesort(0, count, black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    let mut buffers = PermutationBuffers::with_capacity(count);
    group.bench_function("mergesort (buffered)", |b| {
        b.iter_batched(
            || random_strings.clone(),
            |mut data| mergesort_buffered(0, count, black_box(&mut data), &mut buffers),
            BatchSize::SmallInput,
        )
    });

    // Std Sort (Stable)
    group.bench_function("slice::sort (stable)", |b| {
        b.iter_batched(
            || random_strings.clone(),
            |mut data| data.sort(),
            BatchSize::SmallInput,
        )
    });

    // Std Sort Unstable
    group.bench_function("slice::sort_unstable", |b| {
        b.iter_batched(
            || random_strings.clone(),
            |mut data| data.sort_unstable(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_few_distinct(c: &mut Criterion) {
    let mut group = c.benchmark_group("Few Distinct Keys");
    group.sample_size(10);

    // Dataset with heavy duplication
    let mut rng = rand::rng();
    let count = 100_000;
    let input: Vec<u32> = (0..count).map(|_| rng.random_range(0..16)).collect();

    group.bench_function("quicksort", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| quicksort(0, count, black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("slice::sort_unstable", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| data.sort_unstable(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_permute(c: &mut Criterion) {
    let mut group = c.benchmark_group("Permute");
    group.sample_size(10);

    let count = 100_000;
    let input: Vec<u64> = (0..count as u64).collect();
    let mut rng = rand::rng();
    let mut order: Vec<usize> = (0..count).collect();
    for i in (1..count).rev() {
        order.swap(i, rng.random_range(0..=i));
    }

    let mut buffers = PermutationBuffers::with_capacity(count);
    group.bench_function("permute_in_place", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| {
                permute_in_place(
                    black_box(&order),
                    &mut |a: usize, b: usize| data.swap(a, b),
                    &mut buffers,
                );
                data
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("permute (copy)", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| {
                idxsort::permute(&mut data, black_box(&order)).unwrap();
                data
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_strings, bench_few_distinct, bench_permute);
criterion_main!(benches);
