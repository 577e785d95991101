//! Raw `mem_sbrk` Interface
//!
//! The classic C memory-model contract, for allocators ported from C that
//! expect pointers, a sentinel on failure and an `errno`-style code.
//!
//! # Contract
//! - `mem_sbrk` returns the old break, or [`SBRK_FAILED`] (`(void *)-1`)
//! - The code of the most recent failure is kept until cleared; a later
//!   success does not reset it
//! - `mem_heap_hi` is computed as `brk - 1` even on an empty heap, giving
//!   an address one below `mem_heap_lo` that must not be dereferenced

use crate::error::{Errno, Result};
use crate::mm::{page_size, SimulatedHeap};

/// Sentinel returned by [`RawHeap::mem_sbrk`] on failure.
pub const SBRK_FAILED: *mut u8 = usize::MAX as *mut u8;

/// A simulated heap with the C `memlib` calling convention.
#[derive(Debug)]
pub struct RawHeap {
    heap: SimulatedHeap,
    errno: Option<Errno>,
}

impl RawHeap {
    /// Initialize a memory model with [`MAX_HEAP`](crate::MAX_HEAP) bytes.
    pub fn mem_init() -> Result<Self> {
        SimulatedHeap::new().map(Self::from)
    }

    /// Release the memory model.
    pub fn mem_deinit(self) {
        self.heap.teardown();
    }

    /// Reset the break, making the heap empty.
    pub fn mem_reset_brk(&mut self) {
        self.heap.reset_brk();
    }

    /// Extend the heap by `incr` bytes.
    ///
    /// Returns the start of the new area, or [`SBRK_FAILED`] with
    /// [`last_errno`](Self::last_errno) set to `ENOMEM`.
    pub fn mem_sbrk(&mut self, incr: isize) -> *mut u8 {
        match self.heap.sbrk(incr) {
            Ok(addr) => addr.as_ptr(),
            Err(e) => {
                self.errno = Some(e.errno());
                SBRK_FAILED
            }
        }
    }

    /// Get the address of the first heap byte.
    pub fn mem_heap_lo(&self) -> *mut u8 {
        self.heap.heap_lo().as_ptr()
    }

    /// Get the address of the last heap byte.
    pub fn mem_heap_hi(&self) -> *mut u8 {
        self.heap.brk().as_ptr().wrapping_sub(1)
    }

    /// Get the heap size in bytes.
    pub fn mem_heapsize(&self) -> usize {
        self.heap.heap_size()
    }

    /// Get the system page size.
    pub fn mem_pagesize(&self) -> usize {
        page_size()
    }

    /// Get the code of the most recent failure.
    pub fn last_errno(&self) -> Option<Errno> {
        self.errno
    }

    /// Clear the stored failure code.
    pub fn clear_errno(&mut self) {
        self.errno = None;
    }

    /// Get the underlying heap.
    pub fn heap(&self) -> &SimulatedHeap {
        &self.heap
    }

    /// Get the underlying heap mutably.
    pub fn heap_mut(&mut self) -> &mut SimulatedHeap {
        &mut self.heap
    }

    /// Unwrap the underlying heap.
    pub fn into_inner(self) -> SimulatedHeap {
        self.heap
    }
}

impl From<SimulatedHeap> for RawHeap {
    fn from(heap: SimulatedHeap) -> Self {
        Self { heap, errno: None }
    }
}
