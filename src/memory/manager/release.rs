/*!
 * Memory Release
 * Freeing ranges and coalescing neighbouring holes
 */

use super::super::types::{MemoryError, MemoryResult, Range};
use super::MemoryManager;
use tracing::{debug, info, warn};

impl MemoryManager {
    /// Release the range owned by `pid`
    ///
    /// Returns the freed bounds as they were before coalescing. The hole that
    /// ends up in the partition may be wider if a neighbour was already free.
    pub fn release(&mut self, pid: &str) -> MemoryResult<Range> {
        let Some((index, owned)) = self.partition.find(pid) else {
            warn!(pid, "Attempted to release a process that does not exist in memory");
            return Err(MemoryError::ProcessNotFound(pid.to_string()));
        };
        let freed = Range::free(owned.start(), owned.end());

        let mut ranges = self.partition.ranges().to_vec();
        ranges[index] = freed.clone();
        let ranges = Self::coalesce_holes(ranges);
        self.partition.replace(ranges);

        info!(
            pid,
            start = freed.start(),
            end = freed.end(),
            size = freed.size(),
            available = self.partition.free_memory(),
            "Released range"
        );
        self.report_pressure();

        Ok(freed)
    }

    /// Merge every run of neighbouring holes into a single hole
    ///
    /// Input must already be sorted and gapless, which makes neighbours in
    /// the sequence neighbours in the address space; one pass is enough.
    pub(super) fn coalesce_holes(ranges: Vec<Range>) -> Vec<Range> {
        let before = ranges.len();
        let mut merged: Vec<Range> = Vec::with_capacity(before);

        for range in ranges {
            match merged.last_mut() {
                Some(last) if last.is_free() && range.is_free() => {
                    *last = Range::free(last.start(), range.end());
                }
                _ => merged.push(range),
            }
        }

        if merged.len() < before {
            debug!(
                "Coalesced adjacent holes, reduced from {} to {} ranges",
                before,
                merged.len()
            );
        }
        merged
    }
}
