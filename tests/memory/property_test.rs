/*!
 * Partition Property Tests
 * Invariants over random operation sequences
 */

use contiguous_allocator::memory::{FitPolicy, MemoryError, MemoryManager};
use proptest::prelude::*;

const CAPACITY: usize = 1_024;

#[derive(Debug, Clone)]
enum Op {
    Allocate { pid: u8, size: usize, policy: FitPolicy },
    Release { pid: u8 },
    Compact,
}

fn policy() -> impl Strategy<Value = FitPolicy> {
    prop_oneof![
        Just(FitPolicy::FirstFit),
        Just(FitPolicy::BestFit),
        Just(FitPolicy::WorstFit),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..16, 1usize..200, policy())
            .prop_map(|(pid, size, policy)| Op::Allocate { pid, size, policy }),
        3 => (0u8..16).prop_map(|pid| Op::Release { pid }),
        1 => Just(Op::Compact),
    ]
}

fn pid_name(pid: u8) -> String {
    format!("P{}", pid)
}

fn apply(mem: &mut MemoryManager, op: &Op) {
    match op {
        Op::Allocate { pid, size, policy } => {
            let _ = mem.allocate(&pid_name(*pid), *size, *policy);
        }
        Op::Release { pid } => {
            let _ = mem.release(&pid_name(*pid));
        }
        Op::Compact => {
            mem.compact();
        }
    }
}

proptest! {
    #[test]
    fn prop_partition_stays_valid(ops in prop::collection::vec(op(), 0..64)) {
        let mut mem = MemoryManager::with_capacity(CAPACITY).unwrap();
        for op in &ops {
            apply(&mut mem, op);
            prop_assert_eq!(mem.partition().validate(), Ok(()));
            let stats = mem.stats();
            prop_assert_eq!(stats.used_memory + stats.available_memory, CAPACITY);
        }
    }

    #[test]
    fn prop_failed_operations_are_noops(ops in prop::collection::vec(op(), 0..48), extra in op()) {
        let mut mem = MemoryManager::with_capacity(CAPACITY).unwrap();
        for op in &ops {
            apply(&mut mem, op);
        }
        let before = mem.snapshot();
        let failed = match &extra {
            Op::Allocate { pid, size, policy } => {
                mem.allocate(&pid_name(*pid), *size, *policy).is_err()
            }
            Op::Release { pid } => mem.release(&pid_name(*pid)).is_err(),
            Op::Compact => false,
        };
        if failed {
            prop_assert_eq!(mem.snapshot(), before);
        }
    }

    #[test]
    fn prop_compact_preserves_totals_and_order(ops in prop::collection::vec(op(), 0..64)) {
        let mut mem = MemoryManager::with_capacity(CAPACITY).unwrap();
        for op in &ops {
            apply(&mut mem, op);
        }
        let before = mem.stats();
        let order_before: Vec<(String, usize)> = mem
            .snapshot()
            .iter()
            .filter_map(|r| r.process_id().map(|p| (p.to_string(), r.size())))
            .collect();

        mem.compact();

        let after = mem.stats();
        prop_assert_eq!(after.used_memory, before.used_memory);
        prop_assert_eq!(after.available_memory, before.available_memory);
        prop_assert!(after.holes <= 1);

        let order_after: Vec<(String, usize)> = mem
            .snapshot()
            .iter()
            .filter_map(|r| r.process_id().map(|p| (p.to_string(), r.size())))
            .collect();
        prop_assert_eq!(order_after, order_before);
    }

    #[test]
    fn prop_allocate_then_release_restores_boundaries(
        ops in prop::collection::vec(op(), 0..48),
        size in 1usize..300,
        policy in policy(),
    ) {
        let mut mem = MemoryManager::with_capacity(CAPACITY).unwrap();
        for op in &ops {
            apply(&mut mem, op);
        }
        let before = mem.snapshot();

        match mem.allocate("probe", size, policy) {
            Ok(_) => {
                mem.release("probe").unwrap();
                prop_assert_eq!(mem.snapshot(), before);
            }
            Err(err) => {
                let is_insufficient = matches!(err, MemoryError::InsufficientMemory { .. });
                prop_assert!(is_insufficient);
            }
        }
    }
}
