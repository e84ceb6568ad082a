/*!
 * Memory Compaction
 * Whole-space defragmentation
 */

use super::super::types::{CompactionReport, Range};
use super::MemoryManager;
use tracing::{debug, info};

impl MemoryManager {
    /// Slide every allocated range down to address 0 and merge all free
    /// space into one trailing hole
    ///
    /// Allocated ranges keep their owner, size and relative order; only their
    /// addresses change. With fewer than two holes there is nothing to gain
    /// and the partition is left as is.
    pub fn compact(&mut self) -> CompactionReport {
        let merged_holes = self.partition.holes().count();
        if merged_holes < 2 {
            debug!(holes = merged_holes, "Nothing to compact");
            return CompactionReport {
                relocated: 0,
                merged_holes: 0,
                hole: None,
            };
        }

        let mut ranges = Vec::with_capacity(self.partition.len() - merged_holes + 1);
        let mut next_start = 0;
        let mut relocated = 0;

        for range in self.partition.ranges().iter().filter(|r| !r.is_free()) {
            if range.start() != next_start {
                relocated += 1;
            }
            ranges.push(Range::with_size(next_start, range.size(), range.owner().clone()));
            next_start += range.size();
        }

        // At least two holes exist, so the tail is never empty
        let hole = Range::free(next_start, self.partition.capacity() - 1);
        ranges.push(hole.clone());
        self.partition.replace(ranges);

        info!(
            relocated,
            merged_holes,
            hole_start = hole.start(),
            hole_size = hole.size(),
            "Compacted memory"
        );

        CompactionReport {
            relocated,
            merged_holes,
            hole: Some(hole),
        }
    }
}
