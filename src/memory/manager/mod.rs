/*!
 * Memory Management
 *
 * Contiguous allocator over a single fixed-size simulated address space.
 *
 * ## Operations
 *
 * - **Allocation**: first-fit, best-fit or worst-fit hole selection, splitting
 *   the chosen hole when the request is smaller than it
 * - **Release**: the freed range becomes a hole and every run of neighbouring
 *   holes is coalesced into one
 * - **Compaction**: allocated ranges slide to address 0 in their original
 *   order and all free space becomes one trailing hole
 *
 * Every operation builds the next range collection off to the side and swaps
 * it into the partition in one step; a rejected request leaves the partition
 * untouched.
 */

mod allocator;
mod compaction;
mod release;

use super::inspector::{Inspector, Snapshot};
use super::partition::Partition;
use super::traits::{ContiguousAllocator, MemoryInfo};
use super::types::{
    CompactionReport, FitPolicy, MemoryPressure, MemoryResult, MemoryStats, Range,
};
use crate::config::AllocatorConfig;
use crate::core::types::Size;
use tracing::info;

/// Memory manager
///
/// Owns the partition exclusively. Callers that need to share it across
/// threads go through [`SharedMemoryManager`](super::SharedMemoryManager).
#[derive(Debug, Clone)]
pub struct MemoryManager {
    pub(super) partition: Partition,
    // Last pressure level reported, so transitions are logged once
    pub(super) last_pressure: MemoryPressure,
}

impl MemoryManager {
    /// Memory manager with the default address space size
    pub fn new() -> Self {
        Self::from_partition(Partition::default())
    }

    /// Create memory manager over `[0, total - 1]`
    pub fn with_capacity(total: Size) -> MemoryResult<Self> {
        let partition = Partition::new(total)?;
        Ok(Self::from_partition(partition))
    }

    pub fn from_config(config: &AllocatorConfig) -> MemoryResult<Self> {
        Self::with_capacity(config.max_memory)
    }

    fn from_partition(partition: Partition) -> Self {
        info!(
            capacity = partition.capacity(),
            "Memory manager initialized with a single hole [0:{}]",
            partition.capacity() - 1
        );
        Self {
            partition,
            last_pressure: MemoryPressure::Low,
        }
    }

    /// Total size of the address space (MAX)
    pub fn capacity(&self) -> Size {
        self.partition.capacity()
    }

    /// Read-only view over the current partition
    pub fn inspector(&self) -> Inspector<'_> {
        Inspector::new(&self.partition)
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inspector().snapshot()
    }

    pub fn stats(&self) -> MemoryStats {
        self.inspector().stats()
    }

    /// Range currently owned by `pid`
    pub fn lookup(&self, pid: &str) -> Option<Range> {
        self.partition.find(pid).map(|(_, range)| range.clone())
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}

// Implement trait interfaces
impl ContiguousAllocator for MemoryManager {
    fn allocate(&mut self, pid: &str, size: Size, policy: FitPolicy) -> MemoryResult<Range> {
        MemoryManager::allocate(self, pid, size, policy)
    }

    fn release(&mut self, pid: &str) -> MemoryResult<Range> {
        MemoryManager::release(self, pid)
    }

    fn compact(&mut self) -> CompactionReport {
        MemoryManager::compact(self)
    }
}

impl MemoryInfo for MemoryManager {
    fn snapshot(&self) -> Snapshot {
        MemoryManager::snapshot(self)
    }

    fn stats(&self) -> MemoryStats {
        MemoryManager::stats(self)
    }

    fn lookup(&self, pid: &str) -> Option<Range> {
        MemoryManager::lookup(self, pid)
    }
}
