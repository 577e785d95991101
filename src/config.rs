//! Build-time configuration of the simulated address space.

/// Capacity of a default simulated heap (20 MiB).
///
/// Upper bound on total growth across the lifetime of one heap created with
/// [`SimulatedHeap::new`](crate::SimulatedHeap::new).
pub const MAX_HEAP: usize = 20 * (1 << 20);

/// Page size reported when the host cannot be queried.
pub const DEFAULT_PAGE_SIZE: usize = 4096;
