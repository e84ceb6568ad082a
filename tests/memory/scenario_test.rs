/*!
 * Allocation Scenario Tests
 * End-to-end sequences over a 10000-unit address space
 */

use contiguous_allocator::memory::{FitPolicy, MemoryManager, Owner, Range};
use pretty_assertions::assert_eq;

fn layout(ranges: &[Range]) -> Vec<(usize, usize, Option<String>)> {
    ranges
        .iter()
        .map(|r| (r.start(), r.end(), r.process_id().map(|p| p.to_string())))
        .collect()
}

fn used(start: usize, end: usize, pid: &str) -> (usize, usize, Option<String>) {
    (start, end, Some(pid.to_string()))
}

fn free(start: usize, end: usize) -> (usize, usize, Option<String>) {
    (start, end, None)
}

fn five_processes() -> MemoryManager {
    let mut mem = MemoryManager::with_capacity(10_000).unwrap();
    for (pid, size) in [("P1", 500), ("P2", 400), ("P3", 300), ("P4", 200), ("P5", 100)] {
        mem.allocate(pid, size, FitPolicy::FirstFit).unwrap();
    }
    mem
}

#[test]
fn test_sequential_first_fit_layout() {
    let mem = five_processes();
    assert_eq!(
        layout(mem.snapshot().ranges()),
        vec![
            used(0, 499, "P1"),
            used(500, 899, "P2"),
            used(900, 1199, "P3"),
            used(1200, 1399, "P4"),
            used(1400, 1499, "P5"),
            free(1500, 9999),
        ]
    );
}

#[test]
fn test_separated_holes_do_not_merge() {
    let mut mem = five_processes();
    mem.release("P2").unwrap();
    mem.release("P4").unwrap();

    let holes: Vec<_> = mem
        .inspector()
        .holes()
        .map(|h| (h.start(), h.end()))
        .collect();
    assert_eq!(holes, vec![(500, 899), (1200, 1399), (1500, 9999)]);
}

#[test]
fn test_best_fit_then_release_restores_hole() {
    let mut mem = five_processes();
    mem.release("P2").unwrap();
    mem.release("P4").unwrap();

    let p9 = mem.allocate("p9", 50, FitPolicy::BestFit).unwrap();
    assert_eq!((p9.start(), p9.end()), (1200, 1249));
    assert_eq!(
        layout(&mem.snapshot().ranges()[3..5]),
        vec![used(1200, 1249, "p9"), free(1250, 1399)]
    );

    mem.release("p9").unwrap();
    assert_eq!(
        layout(mem.snapshot().ranges()),
        vec![
            used(0, 499, "P1"),
            free(500, 899),
            used(900, 1199, "P3"),
            free(1200, 1399),
            used(1400, 1499, "P5"),
            free(1500, 9999),
        ]
    );
}

#[test]
fn test_compaction_after_scenario() {
    let mut mem = five_processes();
    mem.release("P2").unwrap();
    mem.release("P4").unwrap();

    let report = mem.compact();
    assert_eq!(report.relocated, 2);
    assert_eq!(report.merged_holes, 3);
    assert_eq!(
        layout(mem.snapshot().ranges()),
        vec![
            used(0, 499, "P1"),
            used(500, 799, "P3"),
            used(800, 899, "P5"),
            free(900, 9999),
        ]
    );

    // Second pass has a single hole and changes nothing
    let before = mem.snapshot();
    assert!(mem.compact().is_noop());
    assert_eq!(mem.snapshot(), before);
}

#[test]
fn test_lookup_follows_relocation() {
    let mut mem = five_processes();
    mem.release("P1").unwrap();
    mem.release("P3").unwrap();
    assert_eq!(mem.lookup("P5").map(|r| r.start()), Some(1400));

    mem.compact();
    let p5 = mem.lookup("P5").unwrap();
    assert_eq!((p5.start(), p5.end()), (600, 699));
    assert_eq!(p5.owner(), &Owner::Allocated("P5".try_into().unwrap()));
    assert_eq!(mem.lookup("P1"), None);
}

#[test]
fn test_fill_exactly_then_fail() {
    let mut mem = MemoryManager::with_capacity(1_000).unwrap();
    mem.allocate("A", 1_000, FitPolicy::WorstFit).unwrap();
    assert_eq!(mem.inspector().holes().count(), 0);
    assert!(mem.allocate("B", 1, FitPolicy::FirstFit).is_err());

    let stats = mem.stats();
    assert_eq!(stats.used_memory, 1_000);
    assert_eq!(stats.usage_percentage, 100.0);
}
