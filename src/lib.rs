//! heapsim - Simulated Heap Growth Backend
//!
//! Models the classic `sbrk` heap-extension primitive on top of a single
//! fixed-size region obtained from the host, so that a heap allocator can be
//! developed and tested without touching the real process heap.
//!
//! # Model
//! - One contiguous backing region per [`SimulatedHeap`]
//! - A break pointer that only grows, or is reset to the region start
//! - A hard ceiling at the end of the region; exceeding it is an ordinary
//!   out-of-memory failure, never a crash
//!
//! # Example
//! ```
//! use heapsim::SimulatedHeap;
//!
//! let mut heap = SimulatedHeap::with_capacity(1 << 20)?;
//! let block = heap.sbrk(64)?;
//! assert_eq!(block, heap.heap_lo());
//! assert_eq!(heap.heap_size(), 64);
//! heap.teardown();
//! # Ok::<(), heapsim::HeapError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod error;
pub mod mm;
pub mod raw;

pub use config::MAX_HEAP;
pub use error::{Errno, HeapError, Result};
pub use mm::{page_size, HeapAddr, LockedHeap, SimulatedHeap};
