use idxsort::prelude::*;
use idxsort::{bucket_ranges, dual_partition, factorial, invert, is_permutation, permute};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn ascending(set: BTreeSet<i16>) -> Vec<i16> {
    set.into_iter().collect()
}

proptest! {
    #[test]
    fn sorts_agree_with_std(values in prop::collection::vec(any::<i16>(), 0..600)) {
        let mut expected = values.clone();
        expected.sort();

        let mut quick = values.clone();
        quicksort(0, quick.len(), &mut quick);
        prop_assert_eq!(&quick, &expected);

        let mut merge = values.clone();
        mergesort(0, merge.len(), &mut merge);
        prop_assert_eq!(&merge, &expected);

        let mut buffered = values;
        mergesort_buffered(0, buffered.len(), &mut buffered, &mut PermutationBuffers::new());
        prop_assert_eq!(&buffered, &expected);
    }

    #[test]
    fn mergesort_keeps_equal_keys_in_order(keys in prop::collection::vec(0u8..8, 0..400)) {
        // Compared by key only, a stable sort leaves equal keys in their original
        // order, which is what sorting the (key, position) pairs gives.
        let mut pairs: Vec<(u8, usize)> = keys.iter().copied().zip(0..).collect();
        let mut expected = pairs.clone();
        expected.sort();

        {
            let data = std::cell::RefCell::new(&mut pairs);
            let mut caps = Capabilities::new(
                |a: usize, b: usize| {
                    let data = data.borrow();
                    data[a].0.cmp(&data[b].0)
                },
                |a: usize, b: usize| data.borrow_mut().swap(a, b),
            );
            mergesort(0, keys.len(), &mut caps);
        }

        prop_assert_eq!(pairs, expected);
    }

    #[test]
    fn buckets_hold_their_values(
        values in prop::collection::vec(-200i16..200, 0..500),
        splitters in prop::collection::btree_set(-250i16..250, 0..40),
    ) {
        let splitters = ascending(splitters);
        let mut list = values.clone();
        let len = list.len();
        let mut split_indexes = vec![usize::MAX; splitters.len()];
        partition_splitters(&mut list, 0, len, &splitters, 0, splitters.len(), &mut split_indexes);

        prop_assert!(split_indexes.windows(2).all(|w| w[0] <= w[1]));

        let checked = Splitters::new(&splitters).unwrap();
        for (bucket, range) in bucket_ranges(0, len, &split_indexes).enumerate() {
            for value in &list[range] {
                prop_assert_eq!(checked.bucket_of(value), bucket);
            }
        }

        let mut before = values;
        before.sort();
        list.sort();
        prop_assert_eq!(list, before);
    }

    #[test]
    fn partition_stays_inside_its_range(
        values in prop::collection::vec(any::<i32>(), 2..300),
        cut in any::<prop::sample::Index>(),
        splitter in any::<i32>(),
    ) {
        let mut list = values.clone();
        let mut ids: Vec<usize> = (0..list.len()).collect();
        let from = cut.index(list.len() / 2);
        let to = list.len() - from;

        let boundary = dual_partition(&mut list, &mut ids, from, to, &splitter);

        prop_assert!(from <= boundary && boundary <= to);
        prop_assert_eq!(&list[..from], &values[..from]);
        prop_assert_eq!(&list[to..], &values[to..]);
        prop_assert!(list[from..boundary].iter().all(|v| *v < splitter));
        prop_assert!(list[boundary..to].iter().all(|v| *v >= splitter));
        for (i, &id) in ids.iter().enumerate() {
            prop_assert_eq!(list[i], values[id]);
        }
    }

    #[test]
    fn ranks_are_ordered_permutations(n in 0usize..=12, seed in any::<u64>()) {
        let count = factorial(n).unwrap();
        let rank = seed % count + 1;
        let current = permutation(rank, n).unwrap();

        prop_assert!(is_permutation(&current));
        if rank < count {
            let next = permutation(rank + 1, n).unwrap();
            prop_assert!(current < next);
        }
    }

    #[test]
    fn in_place_matches_copy(n in 0usize..=20, seed in any::<u64>()) {
        let order = permutation(seed % factorial(n).unwrap() + 1, n).unwrap();
        let original: Vec<String> = (0..n).map(|i| format!("row{i}")).collect();

        let mut copied = original.clone();
        permute(&mut copied, &order).unwrap();

        let mut moved = original.clone();
        let mut buffers = PermutationBuffers::new();
        permute_in_place(&order, &mut |a: usize, b: usize| moved.swap(a, b), &mut buffers);
        prop_assert_eq!(&moved, &copied);

        permute_in_place(&invert(&order), &mut |a: usize, b: usize| moved.swap(a, b), &mut buffers);
        prop_assert_eq!(moved, original);
    }
}
