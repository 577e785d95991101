//! Error types for the simulated heap.

use core::fmt;

/// POSIX error codes reported out-of-band, the way `sbrk` reports via `errno`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Errno {
    /// Cannot allocate memory
    Enomem = 12,
    /// Invalid argument
    Einval = 22,
}

impl Errno {
    /// Get the raw POSIX code.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enomem => write!(f, "ENOMEM"),
            Self::Einval => write!(f, "EINVAL"),
        }
    }
}

/// Errors returned by heap construction and growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeapError {
    /// The host could not supply the backing region.
    #[error("failed to allocate {size} byte backing region from the host")]
    BackingAllocation { size: usize },
    /// The requested capacity is zero or not representable as a host layout.
    #[error("invalid heap capacity: {capacity} bytes")]
    InvalidCapacity { capacity: usize },
    /// `sbrk` was asked to shrink the heap.
    #[error("negative heap increment {increment}: the heap cannot shrink")]
    NegativeIncrement { increment: isize },
    /// Growth would move the break past the end of the region.
    #[error("out of memory: requested {requested} bytes, {remaining} remaining")]
    OutOfMemory { requested: usize, remaining: usize },
    /// A `LockedHeap` was used before a heap was installed.
    #[error("heap is not initialized")]
    Uninitialized,
}

impl HeapError {
    /// The out-of-band code matching this error.
    ///
    /// Both growth failures map to `ENOMEM`, as `sbrk` does.
    pub const fn errno(&self) -> Errno {
        match self {
            Self::BackingAllocation { .. }
            | Self::NegativeIncrement { .. }
            | Self::OutOfMemory { .. } => Errno::Enomem,
            Self::InvalidCapacity { .. } | Self::Uninitialized => Errno::Einval,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, HeapError>;
