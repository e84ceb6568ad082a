/*!
 * Shared Memory Manager
 * Thread-safe handle serializing whole operations
 */

use super::inspector::Snapshot;
use super::manager::MemoryManager;
use super::traits::{ContiguousAllocator, MemoryInfo};
use super::types::{CompactionReport, FitPolicy, MemoryResult, MemoryStats, Range};
use crate::core::types::Size;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to a single memory manager
///
/// Each operation holds the lock from selection to swap-in, so no caller can
/// observe the partition between those two points.
#[derive(Debug, Clone)]
pub struct SharedMemoryManager {
    inner: Arc<Mutex<MemoryManager>>,
}

impl SharedMemoryManager {
    pub fn new(manager: MemoryManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    pub fn allocate(&self, pid: &str, size: Size, policy: FitPolicy) -> MemoryResult<Range> {
        self.inner.lock().allocate(pid, size, policy)
    }

    pub fn release(&self, pid: &str) -> MemoryResult<Range> {
        self.inner.lock().release(pid)
    }

    pub fn compact(&self) -> CompactionReport {
        self.inner.lock().compact()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock().snapshot()
    }

    pub fn stats(&self) -> MemoryStats {
        self.inner.lock().stats()
    }

    pub fn lookup(&self, pid: &str) -> Option<Range> {
        self.inner.lock().lookup(pid)
    }

    /// Run `f` with exclusive access, for multi-step sequences that must not
    /// interleave with other callers
    pub fn with<R>(&self, f: impl FnOnce(&mut MemoryManager) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<MemoryManager> for SharedMemoryManager {
    fn from(manager: MemoryManager) -> Self {
        Self::new(manager)
    }
}

impl ContiguousAllocator for SharedMemoryManager {
    fn allocate(&mut self, pid: &str, size: Size, policy: FitPolicy) -> MemoryResult<Range> {
        self.inner.lock().allocate(pid, size, policy)
    }

    fn release(&mut self, pid: &str) -> MemoryResult<Range> {
        self.inner.lock().release(pid)
    }

    fn compact(&mut self) -> CompactionReport {
        self.inner.lock().compact()
    }
}

impl MemoryInfo for SharedMemoryManager {
    fn snapshot(&self) -> Snapshot {
        self.inner.lock().snapshot()
    }

    fn stats(&self) -> MemoryStats {
        self.inner.lock().stats()
    }

    fn lookup(&self, pid: &str) -> Option<Range> {
        self.inner.lock().lookup(pid)
    }
}
