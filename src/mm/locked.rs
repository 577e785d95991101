//! Locked Heap
//!
//! A spinlock-protected slot holding at most one [`SimulatedHeap`], for
//! callers that need a `static` heap or want to share one between threads.
//! The lock is the caller's synchronization; the heap itself stays
//! lock-free and single-threaded.

use spin::{Mutex, MutexGuard};

use super::address::HeapAddr;
use super::heap::SimulatedHeap;
use crate::error::{HeapError, Result};

/// A simulated heap behind a spinlock.
///
/// # Example
/// ```
/// use heapsim::LockedHeap;
///
/// static HEAP: LockedHeap = LockedHeap::empty();
///
/// HEAP.init_with_capacity(4096)?;
/// let block = HEAP.sbrk(128)?;
/// assert_eq!(HEAP.heap_size()?, 128);
/// assert!(HEAP.teardown());
/// # let _ = block;
/// # Ok::<(), heapsim::HeapError>(())
/// ```
#[derive(Debug)]
pub struct LockedHeap {
    inner: Mutex<Option<SimulatedHeap>>,
}

impl LockedHeap {
    /// Create a slot with no heap installed.
    pub const fn empty() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    /// Create a slot holding `heap`.
    pub fn new(heap: SimulatedHeap) -> Self {
        Self {
            inner: Mutex::new(Some(heap)),
        }
    }

    /// Install `heap`, returning the previously installed one, if any.
    pub fn init(&self, heap: SimulatedHeap) -> Option<SimulatedHeap> {
        self.inner.lock().replace(heap)
    }

    /// Create and install a heap of `capacity` bytes.
    ///
    /// A heap that was already installed is torn down first.
    pub fn init_with_capacity(&self, capacity: usize) -> Result<()> {
        let heap = SimulatedHeap::with_capacity(capacity)?;
        if let Some(previous) = self.init(heap) {
            previous.teardown();
        }
        Ok(())
    }

    /// Tear down the installed heap.
    ///
    /// Returns `false` if no heap was installed.
    pub fn teardown(&self) -> bool {
        // Release the region after the lock is dropped
        let heap = self.inner.lock().take();
        match heap {
            Some(heap) => {
                heap.teardown();
                true
            }
            None => false,
        }
    }

    /// Lock the slot.
    pub fn lock(&self) -> MutexGuard<'_, Option<SimulatedHeap>> {
        self.inner.lock()
    }

    /// Run `f` on the installed heap while holding the lock.
    ///
    /// # Errors
    /// `Uninitialized` if no heap is installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut SimulatedHeap) -> R) -> Result<R> {
        self.inner.lock().as_mut().map(f).ok_or(HeapError::Uninitialized)
    }

    /// Extend the installed heap. See [`SimulatedHeap::sbrk`].
    pub fn sbrk(&self, increment: isize) -> Result<HeapAddr> {
        self.with(|heap| heap.sbrk(increment))?
    }

    /// Reset the installed heap. See [`SimulatedHeap::reset_brk`].
    pub fn reset_brk(&self) -> Result<()> {
        self.with(SimulatedHeap::reset_brk)
    }

    /// Get the installed heap's size. See [`SimulatedHeap::heap_size`].
    pub fn heap_size(&self) -> Result<usize> {
        self.with(|heap| heap.heap_size())
    }
}

impl Default for LockedHeap {
    fn default() -> Self {
        Self::empty()
    }
}
