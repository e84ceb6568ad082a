/*!
 * Memory Inspector
 * Read-only views of the partition for reporting
 */

use super::partition::Partition;
use super::types::{MemoryStats, Range};
use serde::Serialize;

/// Ordered copy of the partition's ranges, ascending by start
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    ranges: Vec<Range>,
}

impl Snapshot {
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Range> {
        self.ranges.iter()
    }
}

impl IntoIterator for Snapshot {
    type Item = Range;
    type IntoIter = std::vec::IntoIter<Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Range;
    type IntoIter = std::slice::Iter<'a, Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// Borrowed, read-only view over a partition
#[derive(Debug, Clone, Copy)]
pub struct Inspector<'a> {
    partition: &'a Partition,
}

impl<'a> Inspector<'a> {
    pub fn new(partition: &'a Partition) -> Self {
        Self { partition }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ranges: self.partition.ranges().to_vec(),
        }
    }

    /// Holes in ascending address order
    pub fn holes(&self) -> impl Iterator<Item = &'a Range> + 'a {
        self.partition.holes().map(|(_, hole)| hole)
    }

    pub fn stats(&self) -> MemoryStats {
        let total = self.partition.capacity();
        let (holes, available, largest_hole) =
            self.holes().fold((0usize, 0usize, 0usize), |(count, free, largest), hole| {
                (count + 1, free + hole.size(), largest.max(hole.size()))
            });
        let used = total - available;

        MemoryStats {
            total_memory: total,
            used_memory: used,
            available_memory: available,
            usage_percentage: (used as f64 / total as f64) * 100.0,
            allocated_ranges: self.partition.process_count(),
            holes,
            largest_hole,
            fragmentation: fragmentation_ratio(available, largest_hole),
        }
    }
}

/// External fragmentation: share of free space outside the largest hole
fn fragmentation_ratio(available: usize, largest_hole: usize) -> f64 {
    if available == 0 {
        return 0.0;
    }
    (1.0 - largest_hole as f64 / available as f64).clamp(0.0, 1.0)
}
