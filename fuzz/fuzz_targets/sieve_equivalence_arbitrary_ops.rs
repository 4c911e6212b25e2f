#![no_main]

use libfuzzer_sys::fuzz_target;
use sievekit::policy::sieve::SieveCache;
use sievekit::policy::sieve_arena::ArenaSieveCache;
use sievekit::traits::{CoreCache, InspectCache};

// Fuzz arbitrary operation sequences on both SIEVE layouts side by side
//
// First byte picks the capacity; every following pair is (op, key). After
// each step both caches must return the same value and expose the same
// snapshot and hand.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 16) + 1;

    let mut reference: SieveCache<u8, u16> = SieveCache::new(capacity);
    let mut arena: ArenaSieveCache<u8, u16> = ArenaSieveCache::new(capacity);

    for (step, pair) in ops.chunks_exact(2).enumerate() {
        let op = pair[0] % 8;
        let key = pair[1] % 32;
        let value = u16::from(pair[0]) << 8 | u16::from(pair[1]);

        match op {
            0..=2 => {
                // put
                assert_eq!(reference.put(key, value), arena.put(key, value));
            },
            3..=5 => {
                // get
                assert_eq!(reference.get(&key).copied(), arena.get(&key).copied());
            },
            6 => {
                // contains
                assert_eq!(reference.contains(&key), arena.contains(&key));
            },
            _ => {
                // clear (rare: only when the key byte also agrees)
                if key == 0 {
                    reference.clear();
                    arena.clear();
                } else {
                    assert_eq!(reference.contains(&key), arena.contains(&key));
                }
            },
        }

        assert_eq!(reference.snapshot(), arena.snapshot(), "step {step}");
        assert_eq!(reference.hand(), arena.hand(), "step {step}");
        assert!(reference.count() <= capacity);
    }

    reference.check_invariants().unwrap();
    arena.check_invariants().unwrap();
});
