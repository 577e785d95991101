//! Memory model for the simulated heap
//!
//! Provides:
//! - Heap addresses and alignment helpers
//! - Host page size
//! - The owned backing region
//! - The break-pointer heap and a locked wrapper around it
//!
//! # Invariants
//! - `heap_lo <= brk <= heap_limit` at all times
//! - The break only grows, or is reset to `heap_lo`

pub mod address;
mod heap;
mod locked;
mod page;
pub mod region;

pub use address::HeapAddr;
pub use heap::SimulatedHeap;
pub use locked::LockedHeap;
pub use page::page_size;
