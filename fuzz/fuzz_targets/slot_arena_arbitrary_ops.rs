#![no_main]

use libfuzzer_sys::fuzz_target;
use sievekit::ds::{SlotArena, SlotId};

// Fuzz arbitrary insert/remove/clear sequences on a fixed-capacity SlotArena
//
// Checks the free-stack bookkeeping after every step and that a full arena
// hands the value back instead of growing.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 32) + 1;

    let mut arena: SlotArena<u32> = SlotArena::with_capacity(capacity);
    let mut live: Vec<SlotId> = Vec::new();

    for pair in ops.chunks_exact(2) {
        let op = pair[0] % 4;
        let value = u32::from(pair[1]);

        match op {
            0 | 1 => {
                // insert
                match arena.insert(value) {
                    Ok(id) => {
                        assert_eq!(arena.get(id), Some(&value));
                        live.push(id);
                    },
                    Err(back) => {
                        assert_eq!(back, value);
                        assert!(arena.is_full());
                        assert_eq!(live.len(), capacity);
                    },
                }
            },
            2 => {
                // remove
                if !live.is_empty() {
                    let id = live.swap_remove(value as usize % live.len());
                    assert!(arena.remove(id).is_some());
                    assert!(arena.get(id).is_none());
                }
            },
            _ => {
                // clear
                arena.clear();
                live.clear();
            },
        }

        assert_eq!(arena.len(), live.len());
        assert!(arena.check_invariants().is_ok());
    }
});
