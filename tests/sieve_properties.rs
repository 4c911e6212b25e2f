// ==============================================
// SIEVE BEHAVIOR TESTS (integration)
// ==============================================
//
// Observable SIEVE properties, checked against both cache layouts through
// the public traits. Each property is generated once per layout by
// `sieve_suite!`.

use sievekit::policy::sieve::SieveCache;
use sievekit::policy::sieve_arena::ArenaSieveCache;
use sievekit::traits::{CoreCache, InspectCache};

fn order<C, K, V>(cache: &C) -> Vec<K>
where
    C: InspectCache<K, V>,
    K: Clone,
    V: Clone,
{
    cache.snapshot().into_iter().map(|e| e.key).collect()
}

fn visited_of<C, K, V>(cache: &C, key: &K) -> Option<bool>
where
    C: InspectCache<K, V>,
    K: Clone + PartialEq,
    V: Clone,
{
    cache
        .snapshot()
        .into_iter()
        .find(|e| &e.key == key)
        .map(|e| e.visited)
}

macro_rules! sieve_suite {
    ($suite:ident, $cache:ident) => {
        mod $suite {
            use super::*;

            // ==============================================
            // Capacity
            // ==============================================

            #[test]
            fn count_never_exceeds_capacity() {
                let mut cache = $cache::new(5);
                for i in 0..200u32 {
                    cache.put(i % 17, i);
                    if i % 3 == 0 {
                        cache.get(&(i % 11));
                    }
                    assert!(cache.count() <= cache.capacity());
                }
                cache.check_invariants().unwrap();
            }

            #[test]
            fn capacity_one_replaces_every_miss() {
                let mut cache = $cache::new(1);
                cache.put("a", 1);
                cache.get(&"a");
                cache.put("b", 2);
                assert_eq!(order(&cache), vec!["b"]);
                assert_eq!(visited_of(&cache, &"b"), Some(false));
                cache.check_invariants().unwrap();
            }

            #[test]
            fn zero_capacity_is_a_config_error() {
                let err = $cache::<u32, u32>::try_new(0).unwrap_err();
                assert!(err.to_string().contains("capacity"));
            }

            #[test]
            #[should_panic(expected = "capacity")]
            fn zero_capacity_panics_in_new() {
                let _ = $cache::<u32, u32>::new(0);
            }

            // ==============================================
            // Visited bit
            // ==============================================

            #[test]
            fn get_marks_visited() {
                let mut cache = $cache::new(4);
                cache.put(1, "one");
                assert_eq!(visited_of(&cache, &1), Some(false));
                assert_eq!(cache.get(&1), Some(&"one"));
                assert_eq!(visited_of(&cache, &1), Some(true));
            }

            #[test]
            fn put_on_existing_key_marks_visited_even_if_unchanged() {
                let mut cache = $cache::new(4);
                cache.put(1, "one");
                assert_eq!(cache.put(1, "one"), Some("one"));
                assert_eq!(visited_of(&cache, &1), Some(true));
                assert_eq!(cache.count(), 1);
            }

            #[test]
            fn put_on_existing_key_keeps_position() {
                let mut cache = $cache::new(4);
                cache.put('a', 1);
                cache.put('b', 2);
                cache.put('c', 3);
                cache.put('a', 10);
                assert_eq!(order(&cache), vec!['c', 'b', 'a']);
            }

            #[test]
            fn miss_changes_nothing() {
                let mut cache = $cache::new(2);
                cache.put(1, ());
                let before = cache.snapshot();
                assert_eq!(cache.get(&9), None);
                assert_eq!(cache.snapshot(), before);
            }

            #[test]
            fn contains_is_non_mutating() {
                let mut probed = $cache::new(3);
                let mut plain = $cache::new(3);
                for cache in [&mut probed, &mut plain] {
                    cache.put(1, ());
                    cache.put(2, ());
                    cache.put(3, ());
                }
                for _ in 0..5 {
                    assert!(probed.contains(&1));
                    assert!(!probed.contains(&42));
                }
                probed.put(4, ());
                plain.put(4, ());
                assert_eq!(probed.snapshot(), plain.snapshot());
                assert!(!probed.contains(&1));
            }

            // ==============================================
            // Eviction
            // ==============================================

            #[test]
            fn no_hits_degenerates_to_fifo() {
                let mut cache = $cache::new(3);
                for k in 0..4 {
                    cache.put(k, ());
                }
                assert!(!cache.contains(&0));
                assert_eq!(order(&cache), vec![3, 2, 1]);
            }

            #[test]
            fn skip_visited_entry() {
                let mut cache = $cache::new(2);
                cache.put(1, ());
                cache.put(2, ());
                cache.get(&1);
                cache.put(3, ());

                assert!(!cache.contains(&2));
                assert_eq!(order(&cache), vec![3, 1]);
                assert_eq!(visited_of(&cache, &1), Some(false));
            }

            #[test]
            fn worked_example() {
                let mut cache = $cache::new(3);
                cache.put("a", 1);
                cache.put("b", 2);
                cache.put("c", 3);
                cache.get(&"a");
                cache.put("d", 4);

                assert!(!cache.contains(&"b"));
                let snap: Vec<_> = cache
                    .snapshot()
                    .into_iter()
                    .map(|e| (e.key, e.value, e.visited))
                    .collect();
                assert_eq!(
                    snap,
                    vec![("d", 4, false), ("c", 3, false), ("a", 1, false)]
                );
                cache.check_invariants().unwrap();
            }

            #[test]
            fn all_visited_sweeps_once_and_takes_the_tail() {
                let mut cache = $cache::new(3);
                for k in 1..=3 {
                    cache.put(k, ());
                    cache.get(&k);
                }
                cache.put(4, ());
                assert_eq!(order(&cache), vec![4, 3, 2]);
                assert!(cache.snapshot().iter().all(|e| !e.visited));
            }

            // ==============================================
            // Hand
            // ==============================================

            #[test]
            fn next_scan_resumes_at_the_hand() {
                let mut cache = $cache::new(4);
                for k in ["a", "b", "c", "d"] {
                    cache.put(k, ());
                }
                cache.get(&"a");
                cache.get(&"b");
                cache.put("e", ());
                assert_eq!(cache.hand(), Some(&"d"));
                assert_eq!(order(&cache), vec!["e", "d", "b", "a"]);

                // a and b were demoted by the last scan and are not revisited
                cache.put("f", ());
                assert!(!cache.contains(&"d"));
                assert!(cache.contains(&"a"));
                assert!(cache.contains(&"b"));
            }

            #[test]
            fn re_marked_entry_survives_a_later_scan() {
                let mut cache = $cache::new(3);
                cache.put(1, ());
                cache.put(2, ());
                cache.put(3, ());
                cache.get(&1);
                cache.put(4, ()); // demotes 1, evicts 2, hand -> 3
                cache.get(&3);
                cache.put(5, ()); // demotes 3, evicts 4 without revisiting 1

                assert!(cache.contains(&3));
                assert!(cache.contains(&1));
                assert!(!cache.contains(&4));
                assert_eq!(order(&cache), vec![5, 3, 1]);
                assert_eq!(visited_of(&cache, &3), Some(false));
            }

            #[test]
            fn evicting_the_head_clears_the_hand() {
                let mut cache = $cache::new(2);
                cache.put(1, ());
                cache.put(2, ());
                cache.get(&1);
                cache.put(3, ());
                assert_eq!(cache.hand(), None);
                cache.check_invariants().unwrap();
            }

            // ==============================================
            // Clear
            // ==============================================

            #[test]
            fn clear_resets_everything() {
                let mut cache = $cache::new(3);
                for k in 0..10 {
                    cache.put(k, k);
                    cache.get(&(k / 2));
                }
                cache.clear();
                assert!(cache.is_empty());
                assert_eq!(cache.hand(), None);
                assert!(cache.snapshot().is_empty());
                cache.check_invariants().unwrap();

                cache.put(7, 7);
                cache.put(8, 8);
                cache.put(9, 9);
                cache.put(10, 10);
                assert_eq!(order(&cache), vec![10, 9, 8]);
            }
        }
    };
}

sieve_suite!(reference, SieveCache);
sieve_suite!(arena, ArenaSieveCache);
