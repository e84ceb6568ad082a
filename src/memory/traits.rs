/*!
 * Memory Traits
 * Allocator abstractions
 */

use super::inspector::Snapshot;
use super::types::*;
use crate::core::types::Size;

/// Contiguous allocator interface
///
/// Implementations either fully apply an operation or return an error with
/// the address space left exactly as it was.
pub trait ContiguousAllocator {
    /// Allocate `size` units for a process using the given policy
    fn allocate(&mut self, pid: &str, size: Size, policy: FitPolicy) -> MemoryResult<Range>;

    /// Release the range owned by a process
    fn release(&mut self, pid: &str) -> MemoryResult<Range>;

    /// Move all allocated ranges to the front and merge the holes
    fn compact(&mut self) -> CompactionReport;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Ordered view of every range
    fn snapshot(&self) -> Snapshot;

    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Range currently owned by a process
    fn lookup(&self, pid: &str) -> Option<Range>;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
