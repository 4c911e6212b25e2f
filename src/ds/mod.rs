pub mod slot_arena;

pub use slot_arena::{SlotArena, SlotId};
