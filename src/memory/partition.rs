/*!
 * Partition
 * Ordered, gapless cover of the simulated address space
 */

use super::types::{MemoryError, MemoryResult, Range};
use crate::core::limits::DEFAULT_MEMORY_MAX;
use crate::core::types::{Address, ProcessId, Size};
use ahash::RandomState;
use std::collections::HashSet;
use thiserror::Error;

/// Broken partition invariant, reported by [`Partition::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartitionViolation {
    #[error("partition holds no ranges")]
    Empty,

    #[error("first range starts at {0} instead of 0")]
    StartNotZero(Address),

    #[error("last range ends at {end} instead of {expected}")]
    EndMismatch { end: Address, expected: Address },

    #[error("range ending at {left_end} is followed by a range starting at {right_start}")]
    Discontiguous {
        left_end: Address,
        right_start: Address,
    },

    #[error("process '{0}' owns more than one range")]
    DuplicateOwner(ProcessId),

    #[error("adjacent holes at {first} and {second} were not coalesced")]
    AdjacentHoles { first: Address, second: Address },

    #[error("owner index out of sync with ranges")]
    OwnerIndexMismatch,
}

/// Ordered collection of ranges exactly covering `[0, capacity - 1]`
///
/// Invariants after every completed mutation:
/// - ranges are sorted by start and each one begins right after the previous
/// - the first range starts at 0 and the last one ends at `capacity - 1`
/// - every process owns at most one range
/// - no two neighbouring ranges are both holes
#[derive(Debug, Clone)]
pub struct Partition {
    ranges: Vec<Range>,
    capacity: Size,
    // Owners present in `ranges`, kept for O(1) duplicate and lookup checks
    owners: HashSet<ProcessId, RandomState>,
}

impl Partition {
    /// Partition with a single hole spanning the whole space
    pub fn new(capacity: Size) -> MemoryResult<Self> {
        if capacity == 0 {
            return Err(MemoryError::InvalidCapacity(capacity));
        }
        Ok(Self::single_hole(capacity))
    }

    // Caller guarantees `capacity > 0`
    fn single_hole(capacity: Size) -> Self {
        Self {
            ranges: vec![Range::free(0, capacity - 1)],
            capacity,
            owners: HashSet::with_hasher(RandomState::new()),
        }
    }

    pub fn capacity(&self) -> Size {
        self.capacity
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Check if a process currently owns a range
    pub fn contains(&self, pid: &str) -> bool {
        self.owners.contains(pid)
    }

    pub fn process_count(&self) -> usize {
        self.owners.len()
    }

    /// Position and range owned by `pid`
    pub fn find(&self, pid: &str) -> Option<(usize, &Range)> {
        if !self.contains(pid) {
            return None;
        }
        self.ranges
            .iter()
            .enumerate()
            .find(|(_, range)| range.process_id().map(ProcessId::as_str) == Some(pid))
    }

    /// Holes in ascending address order, with their positions
    pub fn holes(&self) -> impl Iterator<Item = (usize, &Range)> + '_ {
        self.ranges
            .iter()
            .enumerate()
            .filter(|(_, range)| range.is_free())
    }

    pub fn free_memory(&self) -> Size {
        self.holes().map(|(_, range)| range.size()).sum()
    }

    pub fn used_memory(&self) -> Size {
        self.capacity - self.free_memory()
    }

    /// Swap in a new range collection in one step
    ///
    /// The collection is re-sorted by start and the owner index rebuilt, so
    /// callers may push replacement ranges in any order.
    pub(crate) fn replace(&mut self, mut ranges: Vec<Range>) {
        ranges.sort_by_key(Range::start);
        self.owners = ranges
            .iter()
            .filter_map(|range| range.process_id().cloned())
            .collect();
        self.ranges = ranges;

        debug_assert_eq!(self.validate(), Ok(()));
    }

    /// Check every partition invariant
    pub fn validate(&self) -> Result<(), PartitionViolation> {
        let first = self.ranges.first().ok_or(PartitionViolation::Empty)?;
        if first.start() != 0 {
            return Err(PartitionViolation::StartNotZero(first.start()));
        }

        let mut seen: HashSet<&ProcessId, RandomState> = HashSet::with_hasher(RandomState::new());
        if let Some(pid) = first.process_id() {
            seen.insert(pid);
        }

        for pair in self.ranges.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            if left.end() + 1 != right.start() {
                return Err(PartitionViolation::Discontiguous {
                    left_end: left.end(),
                    right_start: right.start(),
                });
            }
            if left.is_free() && right.is_free() {
                return Err(PartitionViolation::AdjacentHoles {
                    first: left.start(),
                    second: right.start(),
                });
            }
            if let Some(pid) = right.process_id() {
                if !seen.insert(pid) {
                    return Err(PartitionViolation::DuplicateOwner(pid.clone()));
                }
            }
        }

        // `first` exists, so `last` does too
        if let Some(last) = self.ranges.last() {
            if last.end() != self.capacity - 1 {
                return Err(PartitionViolation::EndMismatch {
                    end: last.end(),
                    expected: self.capacity - 1,
                });
            }
        }

        if seen.len() != self.owners.len() || seen.iter().any(|pid| !self.owners.contains(*pid)) {
            return Err(PartitionViolation::OwnerIndexMismatch);
        }

        Ok(())
    }
}

impl Default for Partition {
    /// Single hole over the default address space size
    fn default() -> Self {
        Self::single_hole(DEFAULT_MEMORY_MAX)
    }
}
