//! Host page size.

use spin::Once;

use crate::config::DEFAULT_PAGE_SIZE;

static PAGE_SIZE: Once<usize> = Once::new();

/// Get the host's native memory page size in bytes.
///
/// Queried once and cached, so repeated calls return the same value. Falls
/// back to [`DEFAULT_PAGE_SIZE`] if the host reports nothing usable.
pub fn page_size() -> usize {
    *PAGE_SIZE.call_once(query_page_size)
}

#[cfg(unix)]
fn query_page_size() -> usize {
    // SAFETY: sysconf has no memory-safety preconditions
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    usize::try_from(size)
        .ok()
        .filter(|size| size.is_power_of_two())
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

#[cfg(not(unix))]
fn query_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
