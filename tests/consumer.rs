//! A real allocator running on top of the simulated heap.
//!
//! `linked_list_allocator::Heap` can only grow upwards by extending its top,
//! which is exactly what `sbrk` hands out.

use core::alloc::Layout;
use core::ptr::NonNull;

use heapsim::mm::address::align_up;
use heapsim::SimulatedHeap;
use linked_list_allocator::Heap;

struct BrkAllocator {
    brk: SimulatedHeap,
    heap: Heap,
    chunk: usize,
}

impl BrkAllocator {
    fn new(capacity: usize) -> Self {
        let mut brk = SimulatedHeap::with_capacity(capacity).unwrap();
        let chunk = brk.page_size();
        let start = brk.sbrk(chunk as isize).unwrap();

        let mut heap = Heap::empty();
        // SAFETY: sbrk granted `chunk` bytes at `start`, owned by this allocator
        unsafe { heap.init(start.as_ptr(), chunk) };

        Self { brk, heap, chunk }
    }

    fn alloc(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        loop {
            if let Ok(ptr) = self.heap.allocate_first_fit(layout) {
                return Some(ptr);
            }
            let grow = align_up(layout.size() + layout.align(), self.chunk)?;
            let old_brk = self.brk.sbrk(isize::try_from(grow).ok()?).ok()?;
            assert_eq!(old_brk.offset_from(self.brk.heap_lo()), self.heap.size());
            // SAFETY: the bytes directly above the current top were just granted
            unsafe { self.heap.extend(grow) };
        }
    }

    fn free(&mut self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: ptr came from `alloc` with the same layout
        unsafe { self.heap.deallocate(ptr, layout) };
    }
}

#[test]
fn allocator_grows_heap_on_demand() {
    let mut allocator = BrkAllocator::new(1 << 20);
    let page = allocator.chunk;
    let layout = Layout::from_size_align(256, 8).unwrap();

    let mut blocks = Vec::new();
    for i in 0..128u8 {
        let ptr = allocator.alloc(layout).unwrap();
        assert!(allocator.brk.contains(heapsim::HeapAddr::new(ptr)));
        unsafe { ptr.as_ptr().write_bytes(i, layout.size()) };
        blocks.push(ptr);
    }

    // 128 * 256 bytes do not fit in the first page
    assert!(allocator.brk.heap_size() > page);
    assert_eq!(allocator.brk.heap_size() % page, 0);
    assert_eq!(allocator.brk.heap_size(), allocator.heap.size());

    for (i, ptr) in blocks.iter().enumerate() {
        let bytes = unsafe { core::slice::from_raw_parts(ptr.as_ptr(), layout.size()) };
        assert!(bytes.iter().all(|&b| usize::from(b) == i));
    }

    let size = allocator.brk.heap_size();
    for ptr in blocks {
        allocator.free(ptr, layout);
    }
    // freeing never shrinks the simulated heap
    assert_eq!(allocator.brk.heap_size(), size);

    // freed space is reused without further growth
    let ptr = allocator.alloc(layout).unwrap();
    allocator.free(ptr, layout);
    assert_eq!(allocator.brk.heap_size(), size);
}

#[test]
fn allocator_sees_out_of_memory() {
    let mut allocator = BrkAllocator::new(4 * heapsim::page_size());
    let layout = Layout::from_size_align(8 * heapsim::page_size(), 8).unwrap();

    assert!(allocator.alloc(layout).is_none());
    assert!(allocator.brk.heap_size() <= allocator.brk.capacity());

    let small = Layout::from_size_align(64, 8).unwrap();
    assert!(allocator.alloc(small).is_some());
}
