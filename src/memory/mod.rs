/*!
 * Memory Module
 * Contiguous allocation over a simulated address space
 */

pub mod inspector;
pub mod manager;
pub mod partition;
pub mod shared;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use inspector::{Inspector, Snapshot};
pub use manager::MemoryManager;
pub use partition::{Partition, PartitionViolation};
pub use shared::SharedMemoryManager;
pub use traits::*;
pub use types::*;
