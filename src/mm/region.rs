//! Backing Region
//!
//! The single block of host memory that stands in for process address
//! space. Acquired once, zero-filled, aligned to the host page size and
//! released when dropped.
//!
//! # Memory Layout
//! - `base`: first byte of the region (`region_start`)
//! - `base + len`: one past the last legal byte (`region_limit`)

use std::alloc::{self, Layout};
use core::ptr::NonNull;

use log::debug;

use crate::error::{HeapError, Result};

/// An owned, fixed-size block of host memory.
///
/// This is an RAII type: the memory goes back to the host when it is
/// dropped, on every exit path.
#[derive(Debug)]
pub struct BackingRegion {
    base: NonNull<u8>,
    layout: Layout,
}

impl BackingRegion {
    /// Acquire `size` zeroed bytes aligned to `align` from the host.
    ///
    /// # Errors
    /// - `InvalidCapacity` if `size` is zero or does not form a valid layout
    /// - `BackingAllocation` if the host allocator cannot supply the memory
    pub fn new(size: usize, align: usize) -> Result<Self> {
        if size == 0 {
            return Err(HeapError::InvalidCapacity { capacity: size });
        }
        let layout = Layout::from_size_align(size, align)
            .map_err(|_| HeapError::InvalidCapacity { capacity: size })?;

        // SAFETY: layout has a non-zero size
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        let base = NonNull::new(ptr).ok_or(HeapError::BackingAllocation { size })?;

        debug!(
            "backing region acquired: {:p}..{:p} ({} bytes)",
            base,
            ptr.wrapping_add(size),
            size
        );
        Ok(Self { base, layout })
    }

    /// Get the address of the first byte.
    #[inline]
    pub fn base(&self) -> NonNull<u8> {
        self.base
    }

    /// Get the size of the region in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.layout.size()
    }

    /// Regions are never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Get the first `len` bytes of the region.
    ///
    /// # Panics
    /// Panics if `len` exceeds the region size.
    pub fn prefix(&self, len: usize) -> &[u8] {
        assert!(len <= self.len());
        // SAFETY: The region is live, zero-initialized on acquisition and at
        // least `len` bytes long
        unsafe { core::slice::from_raw_parts(self.base.as_ptr(), len) }
    }

    /// Get the first `len` bytes of the region mutably.
    ///
    /// # Panics
    /// Panics if `len` exceeds the region size.
    pub fn prefix_mut(&mut self, len: usize) -> &mut [u8] {
        assert!(len <= self.len());
        // SAFETY: Same as `prefix`, and `&mut self` guarantees exclusive access
        unsafe { core::slice::from_raw_parts_mut(self.base.as_ptr(), len) }
    }
}

impl Drop for BackingRegion {
    fn drop(&mut self) {
        debug!(
            "backing region released: {:p} ({} bytes)",
            self.base,
            self.len()
        );
        // SAFETY: base was returned by alloc_zeroed with this exact layout and
        // is released only here
        unsafe { alloc::dealloc(self.base.as_ptr(), self.layout) };
    }
}

// SAFETY: The region is uniquely owned; the pointer is never shared with
// another owner.
unsafe impl Send for BackingRegion {}
