/*!
 * Contiguous Memory Allocator Library
 * Simulated contiguous allocation with first/best/worst-fit, coalescing and compaction
 */

pub mod config;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod shell;

// Re-exports
pub use config::{AllocatorConfig, ConfigError, StatFormat};
pub use crate::core::types::{Address, ProcessId, Size};
pub use memory::{
    CompactionReport, ContiguousAllocator, FitPolicy, MemoryError, MemoryInfo, MemoryManager,
    MemoryResult, MemoryStats, Owner, Range, SharedMemoryManager, Snapshot,
};
pub use monitoring::init_tracing;
pub use shell::{Command, Shell};
