/*!
 * Memory Allocator Implementation
 * Hole selection and splitting
 */

use super::super::types::{FitPolicy, MemoryError, MemoryPressure, MemoryResult, Owner, Range};
use super::MemoryManager;
use crate::core::types::{ProcessId, Size};
use tracing::{info, warn};

impl MemoryManager {
    /// Allocate `size` units for `pid` using the given hole selection policy
    ///
    /// The chosen hole is replaced by the allocated range at its start and,
    /// when the hole is larger than the request, a new hole covering the
    /// remainder right after it.
    pub fn allocate(&mut self, pid: &str, size: Size, policy: FitPolicy) -> MemoryResult<Range> {
        if size == 0 {
            warn!(pid, size, %policy, "Rejected zero-sized allocation");
            return Err(MemoryError::InvalidSize(size));
        }
        let pid = ProcessId::new(pid)?;

        if self.partition.contains(pid.as_str()) {
            warn!(pid = %pid, size, %policy, "Memory already allocated for process");
            return Err(MemoryError::DuplicateProcess(pid));
        }

        let Some(index) = self.select_hole(size, policy) else {
            let available = self.partition.free_memory();
            let largest_hole = self
                .partition
                .holes()
                .map(|(_, hole)| hole.size())
                .max()
                .unwrap_or(0);
            warn!(
                pid = %pid,
                size,
                %policy,
                available,
                largest_hole,
                "Insufficient memory, cannot allocate"
            );
            return Err(MemoryError::InsufficientMemory {
                requested: size,
                largest_hole,
                available,
            });
        };

        let mut ranges = self.partition.ranges().to_vec();
        let hole = ranges.remove(index);
        let allocated = Range::with_size(hole.start(), size, Owner::Allocated(pid.clone()));

        if size < hole.size() {
            ranges.push(Range::free(allocated.end() + 1, hole.end()));
            info!(
                "Split hole [{}:{}]: keeping {} units, leaving [{}:{}] free",
                hole.start(),
                hole.end(),
                size,
                allocated.end() + 1,
                hole.end()
            );
        }
        ranges.push(allocated.clone());
        self.partition.replace(ranges);

        info!(
            pid = %pid,
            start = allocated.start(),
            end = allocated.end(),
            size,
            %policy,
            "Allocated range"
        );
        self.report_pressure();

        Ok(allocated)
    }

    /// Position of the hole the policy picks for a request of `size`
    ///
    /// Holes are scanned in ascending address order and only strictly better
    /// candidates replace the current one, so the lowest address wins ties
    /// for best-fit and worst-fit.
    pub(super) fn select_hole(&self, size: Size, policy: FitPolicy) -> Option<usize> {
        let mut candidates = self
            .partition
            .holes()
            .filter(|(_, hole)| hole.size() >= size);

        match policy {
            FitPolicy::FirstFit => candidates.next().map(|(index, _)| index),
            FitPolicy::BestFit => candidates
                .fold(None, |best: Option<(usize, Size)>, (index, hole)| match best {
                    Some((_, best_size)) if best_size <= hole.size() => best,
                    _ => Some((index, hole.size())),
                })
                .map(|(index, _)| index),
            FitPolicy::WorstFit => candidates
                .fold(None, |worst: Option<(usize, Size)>, (index, hole)| match worst {
                    Some((_, worst_size)) if worst_size >= hole.size() => worst,
                    _ => Some((index, hole.size())),
                })
                .map(|(index, _)| index),
        }
    }

    /// Log memory pressure changes
    pub(super) fn report_pressure(&mut self) {
        let level = self.stats().memory_pressure();
        if level == self.last_pressure {
            return;
        }
        if level > MemoryPressure::Medium {
            warn!(
                level = %level,
                used = self.partition.used_memory(),
                total = self.partition.capacity(),
                "Memory pressure {}",
                level
            );
        } else {
            info!(level = %level, "Memory pressure {}", level);
        }
        self.last_pressure = level;
    }
}
