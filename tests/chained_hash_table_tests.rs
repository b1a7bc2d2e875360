use chainkv::common::logger::initialize_logger;
use chainkv::container::chained_hash_table::ChainedHashTable;

fn new_table(capacity: usize) -> ChainedHashTable {
    initialize_logger();
    ChainedHashTable::new(capacity).unwrap()
}

/// Flattens the bucket dump into a sorted multiset of pairs.
fn sorted_pairs(ht: &ChainedHashTable) -> Vec<(i64, i64)> {
    let mut pairs: Vec<(i64, i64)> = ht.dump_buckets().into_iter().flatten().collect();
    pairs.sort_unstable();
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut ht = new_table(64);

        let num_keys = 16;

        // insert some values
        for i in 0..num_keys {
            ht.insert(i, i * 100);
            assert_eq!(ht.get(i), Some(i * 100));
        }

        ht.verify_integrity();

        // check that they were actually inserted
        for i in 0..num_keys {
            assert_eq!(ht.get(i), Some(i * 100));
        }
        assert_eq!(ht.len(), num_keys as usize);

        // try to get some keys that don't exist/were not inserted
        for i in num_keys..2 * num_keys {
            assert_eq!(ht.get(i), None);
        }

        ht.verify_integrity();
    }

    #[test]
    fn test_remove() {
        let mut ht = new_table(64);

        let num_keys = 16;

        for i in 0..num_keys {
            ht.insert(i, i);
        }

        ht.verify_integrity();

        // remove the keys we inserted
        for i in 0..num_keys {
            assert!(ht.remove(i));
            assert_eq!(ht.get(i), None);
        }
        assert!(ht.is_empty());

        ht.verify_integrity();

        // try to remove some keys that don't exist/were not inserted
        for i in num_keys..2 * num_keys {
            assert!(!ht.remove(i));
            assert_eq!(ht.get(i), None);
        }

        ht.verify_integrity();
    }

    #[test]
    fn test_remove_absent_key_changes_nothing() {
        let mut ht = new_table(8);
        ht.insert(3, 30);
        ht.insert(4, 40);

        let before = sorted_pairs(&ht);
        assert!(!ht.remove(99));
        assert_eq!(ht.len(), 2);
        assert_eq!(sorted_pairs(&ht), before);
        ht.verify_integrity();
    }

    #[test]
    fn test_collision_chain_scenario() {
        // Keys 1 and 11 collide into bucket 1 at capacity 10.
        let mut ht = new_table(10);
        ht.insert(1, 100);
        ht.insert(11, 200);

        let buckets = ht.dump_buckets();
        assert_eq!(buckets[1], vec![(1, 100), (11, 200)]);

        assert_eq!(ht.get(1), Some(100));
        assert_eq!(ht.get(11), Some(200));

        assert!(ht.remove(1));
        assert_eq!(ht.get(1), None);
        assert_eq!(ht.get(11), Some(200));
        assert_eq!(ht.len(), 1);

        ht.verify_integrity();
    }

    #[test]
    fn test_growth_trigger_doubles_once() {
        let mut ht = new_table(4);

        ht.insert(0, 0);
        ht.insert(1, 10);
        assert_eq!(ht.capacity(), 4);

        // Third insert reaches load 0.75 and doubles the bucket array exactly once.
        ht.insert(2, 20);
        assert_eq!(ht.capacity(), 8);
        assert_eq!(ht.len(), 3);

        // all keys retrievable after relocation
        for i in 0..3 {
            assert_eq!(ht.get(i), Some(i * 10));
        }

        ht.verify_integrity();
    }

    #[test]
    fn test_shrink_trigger_halves() {
        let mut ht = new_table(8);
        for i in 0..5 {
            ht.insert(i, i);
        }
        assert_eq!(ht.capacity(), 8);

        ht.remove(0);
        ht.remove(1);
        assert_eq!(ht.capacity(), 8);

        // Third removal brings the load factor down to 0.25 and halves capacity.
        ht.remove(2);
        assert_eq!(ht.capacity(), 4);
        assert_eq!(ht.len(), 2);

        assert_eq!(ht.get(3), Some(3));
        assert_eq!(ht.get(4), Some(4));

        ht.verify_integrity();
    }

    #[test]
    fn test_duplicate_keys_are_distinct_entries() {
        let mut ht = new_table(16);

        ht.insert(5, 1);
        ht.insert(5, 2);
        assert_eq!(ht.len(), 2);

        // Lookup and removal act on the first entry in chain order.
        assert_eq!(ht.get(5), Some(1));
        assert!(ht.remove(5));
        assert_eq!(ht.get(5), Some(2));
        assert_eq!(ht.len(), 1);

        assert!(ht.remove(5));
        assert_eq!(ht.get(5), None);
        assert!(ht.is_empty());

        ht.verify_integrity();
    }

    #[test]
    fn test_size_counts_duplicates_separately() {
        let mut ht = new_table(64);
        for _ in 0..10 {
            ht.insert(7, 7);
        }
        assert_eq!(ht.len(), 10);
        ht.verify_integrity();
    }

    #[test]
    fn test_manual_rehash_preserves_contents() {
        let mut ht = new_table(16);
        for i in 0..8 {
            ht.insert(i, i * 2);
        }
        ht.insert(3, 999); // duplicate key survives relocation too

        let before = sorted_pairs(&ht);
        let capacity_before = ht.capacity();

        ht.rehash();

        assert_eq!(ht.capacity(), capacity_before * 2);
        assert_eq!(ht.len(), 9);
        assert_eq!(sorted_pairs(&ht), before);

        ht.verify_integrity();
    }

    #[test]
    fn test_negative_keys() {
        let mut ht = new_table(16);
        ht.insert(-3, 33);
        ht.insert(-19, 44);

        assert_eq!(ht.get(-3), Some(33));
        assert_eq!(ht.get(-19), Some(44));
        assert!(ht.remove(-3));
        assert_eq!(ht.get(-3), None);

        ht.verify_integrity();
    }

    #[test]
    fn test_growth_and_shrink_round_trip() {
        let mut ht = new_table(4);

        // Grow through several threshold crossings.
        for i in 0..32 {
            ht.insert(i, i);
        }
        ht.verify_integrity();
        let grown = ht.capacity();
        assert!(grown > 4);

        // Shrink back down; every surviving key must stay reachable.
        for i in 0..28 {
            assert!(ht.remove(i));
        }
        ht.verify_integrity();
        assert!(ht.capacity() < grown);
        for i in 28..32 {
            assert_eq!(ht.get(i), Some(i));
        }
        assert_eq!(ht.len(), 4);
    }

    #[test]
    fn test_display_order_is_chain_order() {
        let mut ht = new_table(10);
        ht.insert(2, 1);
        ht.insert(12, 2);
        ht.insert(22, 3);

        let buckets = ht.dump_buckets();
        assert_eq!(buckets.len(), 10);
        assert_eq!(buckets[2], vec![(2, 1), (12, 2), (22, 3)]);
        for (index, chain) in buckets.iter().enumerate() {
            if index != 2 {
                assert!(chain.is_empty());
            }
        }
    }
}
