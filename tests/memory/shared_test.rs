/*!
 * Shared Memory Manager Tests
 * Trait seams and the thread-safe handle
 */

use contiguous_allocator::memory::{
    ContiguousAllocator, FitPolicy, MemoryInfo, MemoryManager, MemoryPressure,
    SharedMemoryManager,
};
use pretty_assertions::assert_eq;
use std::thread;

fn fill<A: ContiguousAllocator>(allocator: &mut A, count: usize, size: usize) {
    for i in 0..count {
        allocator
            .allocate(&format!("job{}", i), size, FitPolicy::FirstFit)
            .unwrap();
    }
}

#[test]
fn test_trait_objects_drive_manager() {
    let mut mem = MemoryManager::with_capacity(1_000).unwrap();
    fill(&mut mem, 9, 100);

    let info: &dyn MemoryInfo = &mem;
    assert_eq!(info.pressure(), MemoryPressure::High);
    assert_eq!(info.stats().holes, 1);
    assert_eq!(info.lookup("job3").map(|r| r.start()), Some(300));

    let allocator: &mut dyn ContiguousAllocator = &mut mem;
    allocator.release("job0").unwrap();
    allocator.release("job2").unwrap();
    let report = allocator.compact();
    assert_eq!(report.merged_holes, 3);
    assert_eq!(mem.stats().largest_hole, 300);
}

#[test]
fn test_trait_objects_drive_shared_handle() {
    let mut shared = SharedMemoryManager::new(MemoryManager::with_capacity(1_000).unwrap());
    let observer = shared.clone();
    fill(&mut shared, 9, 100);

    let info: &dyn MemoryInfo = &shared;
    assert_eq!(info.pressure(), MemoryPressure::High);
    assert_eq!(info.stats().holes, 1);
    assert_eq!(info.lookup("job3").map(|r| r.start()), Some(300));

    let allocator: &mut dyn ContiguousAllocator = &mut shared;
    allocator.release("job0").unwrap();
    allocator.release("job2").unwrap();
    let report = allocator.compact();
    assert_eq!(report.merged_holes, 3);

    // Clones share the same partition
    assert_eq!(observer.stats().largest_hole, 300);
    assert_eq!(observer.lookup("job1").map(|r| r.start()), Some(0));
    assert_eq!(observer.snapshot().len(), 8);
}

#[test]
fn test_shared_handle_serializes_workers() {
    let shared = SharedMemoryManager::new(MemoryManager::with_capacity(4_096).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let shared = shared.clone();
            thread::spawn(move || {
                let pid = format!("worker{}", worker);
                shared.allocate(&pid, 256, FitPolicy::BestFit).unwrap();
                pid
            })
        })
        .collect();

    let mut pids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    pids.sort();

    let snapshot = shared.snapshot();
    assert_eq!(snapshot.len(), 5);
    let mut owners: Vec<String> = snapshot
        .iter()
        .filter_map(|r| r.process_id().map(|p| p.to_string()))
        .collect();
    owners.sort();
    assert_eq!(owners, pids);

    shared.with(|mem| {
        mem.release("worker1").unwrap();
        mem.release("worker2").unwrap();
    });
    assert!(shared.lookup("worker1").is_none());
    assert_eq!(shared.stats().used_memory, 512);
}
