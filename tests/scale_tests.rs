use idxsort::prelude::*;
use idxsort::bucket_ranges;
use rand::Rng;
use std::time::Instant;

#[test]
fn test_sort_1m() {
    let count = 1_000_000;
    println!("Generating {} random elements...", count);

    let mut rng = rand::rng();
    let mut input: Vec<u64> = (0..count).map(|_| rng.random()).collect();

    println!("Sorting {} elements...", count);
    let start = Instant::now();
    quicksort(0, count, &mut input);
    let duration = start.elapsed();
    println!("Sorted 1M elements in {:?}", duration);

    for i in 0..count - 1 {
        assert!(input[i] <= input[i + 1], "Sort failed at index {}", i);
    }
}

#[test]
fn test_partition_1m_into_1k_buckets() {
    let count = 1_000_000;
    let mut rng = rand::rng();
    let mut input: Vec<u32> = (0..count).map(|_| rng.random_range(0..1_000_000)).collect();
    let splitters: Vec<u32> = (1..1000).map(|s| s * 1000).collect();

    let start = Instant::now();
    let boundaries = Splitters::new(&splitters)
        .unwrap()
        .partition(&mut input, 0, count)
        .unwrap();
    println!("Partitioned 1M elements into 1000 buckets in {:?}", start.elapsed());

    for (bucket, range) in bucket_ranges(0, count, &boundaries).enumerate() {
        let low = bucket as u32 * 1000;
        assert!(input[range].iter().all(|&v| v >= low && v < low + 1000));
    }
}

#[test]
#[ignore]
fn test_sort_100m_rows() {
    // WARNING: This test requires significant RAM (4GB+).
    // 100M rows of (u64 key, u64 payload) kept as two parallel columns and sorted
    // in place; the engine itself allocates nothing.
    let count = 100_000_000;
    println!("Generating {} rows... (Expect high RAM usage)", count);

    struct Columns {
        keys: Vec<u64>,
        payload: Vec<u64>,
    }

    impl SortAccessor for Columns {
        fn compare(&self, a: usize, b: usize) -> std::cmp::Ordering {
            self.keys[a].cmp(&self.keys[b])
        }

        fn swap(&mut self, a: usize, b: usize) {
            self.keys.swap(a, b);
            self.payload.swap(a, b);
        }
    }

    let mut rng = rand::rng();
    let keys: Vec<u64> = (0..count).map(|_| rng.random_range(0..1 << 20)).collect();
    let payload = keys.iter().map(|k| k.wrapping_mul(31)).collect();
    let mut columns = Columns { keys, payload };

    println!("Sorting 100M rows...");
    let start = Instant::now();
    quicksort(0, count, &mut columns);
    println!("Sorted 100M rows in {:?}", start.elapsed());

    // Verify sample
    for i in (0..count - 1).step_by(10_000) {
        assert!(columns.keys[i] <= columns.keys[i + 1], "Sort failed at index {}", i);
        assert_eq!(columns.payload[i], columns.keys[i].wrapping_mul(31));
    }
}
