//! Simulated Heap
//!
//! A model of the `sbrk` break pointer over a fixed [`BackingRegion`].
//!
//! # Design
//! - The break is kept as an offset from the region start
//! - Growth only moves the break up; shrinking is rejected
//! - The region end is a hard ceiling: growth past it fails with
//!   `OutOfMemory` and leaves the break untouched
//! - `reset_brk` empties the logical heap without touching the bytes

use log::{debug, trace, warn};

use super::address::HeapAddr;
use super::page;
use super::region::BackingRegion;
use crate::config::MAX_HEAP;
use crate::error::{HeapError, Result};

/// A simulated process heap grown with [`sbrk`](Self::sbrk).
///
/// Each instance owns its own backing region, so independent heaps can
/// coexist in one process. The heap is `Send` but not `Sync`; share it
/// across threads through [`LockedHeap`](super::LockedHeap) or another lock.
#[derive(Debug)]
pub struct SimulatedHeap {
    /// Backing memory, `[region_start, region_limit)`.
    region: BackingRegion,
    /// Break pointer as an offset from the region start.
    brk: usize,
}

impl SimulatedHeap {
    /// Create an empty heap with [`MAX_HEAP`] bytes of capacity.
    ///
    /// # Errors
    /// `BackingAllocation` if the host cannot supply the backing region.
    pub fn new() -> Result<Self> {
        Self::with_capacity(MAX_HEAP)
    }

    /// Create an empty heap that can grow to at most `capacity` bytes.
    ///
    /// The backing region is aligned to the host page size and zero-filled.
    ///
    /// # Errors
    /// - `InvalidCapacity` if `capacity` is zero or too large to describe
    /// - `BackingAllocation` if the host cannot supply the backing region
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let region = BackingRegion::new(capacity, page::page_size())?;
        let heap = Self { region, brk: 0 };
        debug!(
            "simulated heap initialized: [{}, {}) capacity {}",
            heap.heap_lo(),
            heap.heap_limit(),
            capacity
        );
        Ok(heap)
    }

    /// Release the backing region.
    ///
    /// Dropping the heap has the same effect; this spells it out at call
    /// sites that mirror an explicit init/deinit pair.
    pub fn teardown(self) {
        debug!(
            "simulated heap teardown: {} of {} bytes granted",
            self.brk,
            self.capacity()
        );
    }

    /// Reset the break to the region start, making the heap empty.
    ///
    /// The backing region is kept and its bytes are not cleared.
    pub fn reset_brk(&mut self) {
        debug!("simulated heap reset: dropping {} granted bytes", self.brk);
        self.brk = 0;
    }

    /// Extend the heap by `increment` bytes.
    ///
    /// Returns the old break: the start of the newly granted range
    /// `[old_break, old_break + increment)`. A zero increment returns the
    /// current break and changes nothing.
    ///
    /// # Errors
    /// - `NegativeIncrement` if `increment < 0`
    /// - `OutOfMemory` if the break would pass the end of the region
    ///
    /// On error the break is unchanged.
    pub fn sbrk(&mut self, increment: isize) -> Result<HeapAddr> {
        let Ok(incr) = usize::try_from(increment) else {
            warn!(
                "mem_sbrk failed: negative increment {} (heap cannot shrink)",
                increment
            );
            return Err(HeapError::NegativeIncrement { increment });
        };

        let remaining = self.remaining();
        if incr > remaining {
            warn!(
                "mem_sbrk failed: ran out of memory (requested {}, remaining {})",
                incr, remaining
            );
            return Err(HeapError::OutOfMemory {
                requested: incr,
                remaining,
            });
        }

        let old_brk = self.addr_at(self.brk);
        self.brk += incr;
        trace!("mem_sbrk({}) -> {}, heap size {}", incr, old_brk, self.brk);
        Ok(old_brk)
    }

    /// Get the address of the first heap byte (`region_start`).
    ///
    /// Constant for the lifetime of the heap.
    #[inline]
    pub fn heap_lo(&self) -> HeapAddr {
        self.addr_at(0)
    }

    /// Get the address of the last granted byte.
    ///
    /// Returns `None` while no bytes are granted, since there is no last
    /// byte to point at.
    #[inline]
    pub fn heap_hi(&self) -> Option<HeapAddr> {
        self.brk.checked_sub(1).map(|last| self.addr_at(last))
    }

    /// Get the current break: the first byte not yet granted.
    #[inline]
    pub fn brk(&self) -> HeapAddr {
        self.addr_at(self.brk)
    }

    /// Get the address one past the last legal heap byte (`region_limit`).
    #[inline]
    pub fn heap_limit(&self) -> HeapAddr {
        self.addr_at(self.capacity())
    }

    /// Get the number of bytes currently granted.
    #[inline]
    pub fn heap_size(&self) -> usize {
        self.brk
    }

    /// Get the total number of bytes the heap can grow to.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.region.len()
    }

    /// Get the number of bytes still available to `sbrk`.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.brk
    }

    /// Get the host page size.
    #[inline]
    pub fn page_size(&self) -> usize {
        page::page_size()
    }

    /// Check whether `addr` lies in the granted range `[heap_lo, brk)`.
    pub fn contains(&self, addr: HeapAddr) -> bool {
        self.heap_lo() <= addr && addr < self.brk()
    }

    /// Get the granted bytes.
    pub fn granted(&self) -> &[u8] {
        self.region.prefix(self.brk)
    }

    /// Get the granted bytes mutably.
    pub fn granted_mut(&mut self) -> &mut [u8] {
        self.region.prefix_mut(self.brk)
    }

    fn addr_at(&self, offset: usize) -> HeapAddr {
        debug_assert!(offset <= self.capacity());
        // SAFETY: offset is at most the region length, so the result is in
        // bounds or one past the end of the region allocation
        unsafe { HeapAddr::new(self.region.base()).add(offset) }
    }
}
