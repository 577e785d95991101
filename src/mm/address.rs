//! Heap Address Type
//!
//! Addresses handed out by the simulated heap. A `HeapAddr` always points
//! into, or one past the end of, a live backing region; it is never null.
//!
//! # Properties
//! - Ordered and hashable, so consumers can compare block positions
//! - Dereferencing requires an explicit unsafe conversion to a pointer
//! - Alignment helpers work with the runtime page size

use core::fmt;
use core::ptr::NonNull;

/// An address inside a simulated heap.
///
/// This is a newtype over a non-null byte pointer. Equality and ordering
/// follow the numeric address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct HeapAddr(NonNull<u8>);

impl HeapAddr {
    /// Wrap a pointer.
    #[inline]
    pub const fn new(ptr: NonNull<u8>) -> Self {
        Self(ptr)
    }

    /// Get the raw address value.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0.as_ptr() as usize
    }

    /// Get the underlying pointer.
    #[inline]
    pub const fn as_non_null(self) -> NonNull<u8> {
        self.0
    }

    /// Convert to a raw pointer.
    ///
    /// The pointer is only valid for access within the granted range of the
    /// heap that produced it, and only while that heap is alive.
    #[inline]
    pub const fn as_ptr(self) -> *mut u8 {
        self.0.as_ptr()
    }

    /// Check if the address is a multiple of `align`.
    #[inline]
    pub fn is_aligned_to(self, align: usize) -> bool {
        debug_assert!(align.is_power_of_two());
        self.as_usize() & (align - 1) == 0
    }

    /// Distance in bytes from `base` up to this address.
    ///
    /// # Panics
    /// Panics in debug mode if `base` is above this address.
    #[inline]
    pub fn offset_from(self, base: HeapAddr) -> usize {
        debug_assert!(base <= self);
        self.as_usize() - base.as_usize()
    }

    /// Add an offset to this address.
    ///
    /// # Safety
    /// The result must stay within, or one past the end of, the allocation
    /// this address belongs to.
    #[inline]
    pub unsafe fn add(self, offset: usize) -> Self {
        // SAFETY: Caller guarantees the offset stays in bounds
        Self(unsafe { self.0.add(offset) })
    }
}

impl fmt::Debug for HeapAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeapAddr({:#018x})", self.as_usize())
    }
}

impl fmt::Display for HeapAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.as_usize())
    }
}

/// Round `size` up to the next multiple of `align`.
///
/// `align` must be a power of two. Returns `None` on overflow.
#[inline]
pub const fn align_up(size: usize, align: usize) -> Option<usize> {
    debug_assert!(align.is_power_of_two());
    let mask = align - 1;
    match size.checked_add(mask) {
        Some(v) => Some(v & !mask),
        None => None,
    }
}

/// Round `size` down to a multiple of `align`.
#[inline]
pub const fn align_down(size: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    size & !(align - 1)
}
