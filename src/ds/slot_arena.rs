//! Fixed-capacity slot arena with an O(1) free-index stack.
//!
//! All `capacity` slots are allocated once in [`SlotArena::with_capacity`];
//! inserting pops a recycled index off the free stack and removing pushes it
//! back. Nothing on the insert/remove path allocates.
//!
//! ```text
//!   slots: Box<[Option<T>]>                       free: Vec<usize> (stack)
//!   ┌─────┬─────┬─────┬─────┬─────┬─────┐         ┌───┬───┬───┐
//!   │  A  │  -  │  B  │  C  │  -  │  -  │         │ 5 │ 4 │ 1 │ ◄── top
//!   └─────┴─────┴─────┴─────┴─────┴─────┘         └───┴───┴───┘
//!     [0]   [1]   [2]   [3]   [4]   [5]
//!
//!   invariant: len + free.len() == capacity
//! ```
//!
//! A fresh or cleared arena hands out indices in ascending order.

use crate::error::InvariantError;

/// Stable handle to an occupied slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Box<[Option<T>]>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    /// Allocates `capacity` empty slots and a free stack covering all of them.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots: Box<[Option<T>]> = (0..capacity).map(|_| None).collect();
        let mut free_list = Vec::with_capacity(capacity);
        free_list.extend((0..capacity).rev());
        Self {
            slots,
            free_list,
            len: 0,
        }
    }

    /// Stores `value` in a free slot, or hands it back when every slot is taken.
    pub fn insert(&mut self, value: T) -> Result<SlotId, T> {
        let Some(idx) = self.free_list.pop() else {
            return Err(value);
        };
        debug_assert!(self.slots[idx].is_none(), "free list issued occupied slot {idx}");
        self.slots[idx] = Some(value);
        self.len += 1;
        Ok(SlotId(idx))
    }

    /// Empties the slot and returns its index to the free stack.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.free_list.is_empty()
    }

    /// Total number of slots; fixed at construction.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently on the free stack.
    pub fn free_len(&self) -> usize {
        self.free_list.len()
    }

    /// Swaps in empty slots and refills the free stack, then drops the old
    /// values. The arena is already empty if a value's drop panics.
    pub fn clear(&mut self) {
        let fresh: Box<[Option<T>]> = (0..self.slots.len()).map(|_| None).collect();
        let old = std::mem::replace(&mut self.slots, fresh);
        self.free_list.clear();
        self.free_list.extend((0..self.slots.len()).rev());
        self.len = 0;
        drop(old);
    }

    /// Checks free-stack bookkeeping: no out-of-range or double-issued index,
    /// no occupied slot on the stack, and `len + free == capacity`.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut on_free_list = vec![false; self.slots.len()];
        for &idx in &self.free_list {
            let seen = on_free_list.get_mut(idx).ok_or_else(|| {
                InvariantError::new(format!(
                    "free list index {idx} out of range for capacity {}",
                    self.slots.len()
                ))
            })?;
            if *seen {
                return Err(InvariantError::new(format!(
                    "slot {idx} appears twice on the free list"
                )));
            }
            *seen = true;
            if self.slots[idx].is_some() {
                return Err(InvariantError::new(format!(
                    "slot {idx} is occupied but on the free list"
                )));
            }
        }

        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        if occupied != self.len {
            return Err(InvariantError::new(format!(
                "arena len {} but {} slots occupied",
                self.len, occupied
            )));
        }
        if self.len + self.free_list.len() != self.slots.len() {
            return Err(InvariantError::new(format!(
                "len {} + free {} != capacity {}",
                self.len,
                self.free_list.len(),
                self.slots.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_arena_insert_remove_reuse() {
        let mut arena = SlotArena::with_capacity(4);
        let id1 = arena.insert("a").unwrap();
        let id2 = arena.insert("b").unwrap();
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"a"));
        assert_eq!(arena.get(id2), Some(&"b"));

        assert_eq!(arena.remove(id1), Some("a"));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.free_len(), 3);

        let id3 = arena.insert("c").unwrap();
        assert_eq!(arena.get(id3), Some(&"c"));
        assert_eq!(id1.index(), id3.index());
        arena.check_invariants().unwrap();
    }

    #[test]
    fn fresh_arena_issues_ascending_indices() {
        let mut arena = SlotArena::with_capacity(3);
        let ids: Vec<_> = (0..3).map(|i| arena.insert(i).unwrap().index()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn insert_when_full_returns_value() {
        let mut arena = SlotArena::with_capacity(1);
        arena.insert(1).unwrap();
        assert!(arena.is_full());
        assert_eq!(arena.insert(2), Err(2));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn remove_twice_is_none() {
        let mut arena = SlotArena::with_capacity(2);
        let id = arena.insert(7).unwrap();
        assert_eq!(arena.remove(id), Some(7));
        assert_eq!(arena.remove(id), None);
        assert_eq!(arena.free_len(), 2);
        arena.check_invariants().unwrap();
    }

    #[test]
    fn clear_keeps_capacity_and_resets_order() {
        let mut arena = SlotArena::with_capacity(3);
        for i in 0..3 {
            arena.insert(i).unwrap();
        }
        let middle = SlotId(1);
        arena.remove(middle);
        arena.clear();

        assert!(arena.is_empty());
        assert_eq!(arena.capacity(), 3);
        assert_eq!(arena.free_len(), 3);
        assert_eq!(arena.get(SlotId(0)), None);
        assert_eq!(arena.insert(9).unwrap().index(), 0);
        arena.check_invariants().unwrap();
    }

    #[test]
    fn clear_is_consistent_when_a_drop_panics() {
        struct Bomb(bool);
        impl Drop for Bomb {
            fn drop(&mut self) {
                if self.0 {
                    panic!("bomb");
                }
            }
        }

        let mut arena = SlotArena::with_capacity(3);
        assert!(arena.insert(Bomb(false)).is_ok());
        assert!(arena.insert(Bomb(true)).is_ok());

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| arena.clear()));
        assert!(result.is_err());
        assert!(arena.is_empty());
        assert_eq!(arena.free_len(), 3);
        arena.check_invariants().unwrap();
        assert_eq!(arena.insert(Bomb(false)).ok().map(SlotId::index), Some(0));
    }

    #[test]
    fn out_of_range_id_is_absent() {
        let mut arena: SlotArena<u8> = SlotArena::with_capacity(1);
        assert_eq!(arena.get(SlotId(5)), None);
        assert_eq!(arena.get_mut(SlotId(5)), None);
        assert_eq!(arena.remove(SlotId(5)), None);
    }
}
