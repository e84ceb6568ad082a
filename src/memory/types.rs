/*!
 * Memory Types
 * Ranges, owners, fit policies and errors for contiguous allocation
 */

use crate::core::limits::{
    PRESSURE_CRITICAL_THRESHOLD, PRESSURE_HIGH_THRESHOLD, PRESSURE_MEDIUM_THRESHOLD,
};
use crate::core::types::{Address, ProcessId, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Every variant is returned before the partition is touched, so a failed
/// operation never leaves a partially mutated address space behind.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum MemoryError {
    #[error("Memory already allocated for '{0}'")]
    #[diagnostic(
        code(memory::duplicate_process),
        help("Release the existing allocation first or choose a different process id.")
    )]
    DuplicateProcess(ProcessId),

    #[error("Insufficient memory, cannot allocate {requested} (largest hole {largest_hole}, {available} free)")]
    #[diagnostic(
        code(memory::insufficient_memory),
        help("Request a smaller size, release a process, or compact to merge holes.")
    )]
    InsufficientMemory {
        requested: Size,
        largest_hole: Size,
        available: Size,
    },

    #[error("'{0}' does not exist in memory")]
    #[diagnostic(code(memory::process_not_found), help("Check the id with STAT."))]
    ProcessNotFound(String),

    #[error("Invalid allocation size: {0}")]
    #[diagnostic(code(memory::invalid_size), help("Allocation size must be greater than zero."))]
    InvalidSize(Size),

    #[error("Invalid memory capacity: {0}")]
    #[diagnostic(code(memory::invalid_capacity), help("MAX must be greater than zero."))]
    InvalidCapacity(Size),

    #[error("Invalid process id: '{0}'")]
    #[diagnostic(
        code(memory::invalid_process_id),
        help("Process ids must be non-empty and contain no whitespace.")
    )]
    InvalidProcessId(String),
}

/// Owner of a range: either a hole or a process
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "pid", rename_all = "snake_case")]
pub enum Owner {
    Free,
    Allocated(ProcessId),
}

impl Owner {
    pub fn is_free(&self) -> bool {
        matches!(self, Owner::Free)
    }

    pub fn process_id(&self) -> Option<&ProcessId> {
        match self {
            Owner::Free => None,
            Owner::Allocated(pid) => Some(pid),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Owner::Free => write!(f, "Unused"),
            Owner::Allocated(pid) => write!(f, "Process {}", pid),
        }
    }
}

/// One contiguous, inclusive `[start:end]` piece of the address space
///
/// Ranges are immutable: moving, resizing or re-owning one means building a
/// new range and swapping it into the partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    start: Address,
    end: Address,
    owner: Owner,
}

impl Range {
    /// Build the range `[start:end]`
    ///
    /// Callers inside the crate guarantee `end >= start`; the public entry
    /// points never hand out ranges they did not build themselves.
    pub(crate) fn new(start: Address, end: Address, owner: Owner) -> Self {
        debug_assert!(end >= start, "range [{}:{}] is inverted", start, end);
        Self { start, end, owner }
    }

    /// Range of `size` units beginning at `start`
    pub(crate) fn with_size(start: Address, size: Size, owner: Owner) -> Self {
        Self::new(start, start + size - 1, owner)
    }

    pub(crate) fn free(start: Address, end: Address) -> Self {
        Self::new(start, end, Owner::Free)
    }

    pub fn start(&self) -> Address {
        self.start
    }

    /// Inclusive upper bound
    pub fn end(&self) -> Address {
        self.end
    }

    pub fn size(&self) -> Size {
        self.end - self.start + 1
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn is_free(&self) -> bool {
        self.owner.is_free()
    }

    pub fn process_id(&self) -> Option<&ProcessId> {
        self.owner.process_id()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}:{}] {}", self.start, self.end, self.owner)
    }
}

/// Hole selection policy for allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitPolicy {
    /// First hole (lowest address) that is large enough
    FirstFit,
    /// Smallest hole that is large enough, lowest address on ties
    BestFit,
    /// Largest hole, lowest address on ties
    WorstFit,
}

impl FitPolicy {
    pub const ALL: [FitPolicy; 3] = [FitPolicy::FirstFit, FitPolicy::BestFit, FitPolicy::WorstFit];

    /// Parse the single-letter policy flag used by `RQ`
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "F" => Some(FitPolicy::FirstFit),
            "B" => Some(FitPolicy::BestFit),
            "W" => Some(FitPolicy::WorstFit),
            _ => None,
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            FitPolicy::FirstFit => "F",
            FitPolicy::BestFit => "B",
            FitPolicy::WorstFit => "W",
        }
    }
}

impl fmt::Display for FitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FitPolicy::FirstFit => write!(f, "first-fit"),
            FitPolicy::BestFit => write!(f, "best-fit"),
            FitPolicy::WorstFit => write!(f, "worst-fit"),
        }
    }
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub available_memory: Size,
    pub usage_percentage: f64,
    pub allocated_ranges: usize,
    pub holes: usize,
    pub largest_hole: Size,
    /// `1 - largest_hole / available_memory`, 0 when nothing is free
    pub fragmentation: f64,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_ratio(self.usage_percentage / 100.0)
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= PRESSURE_CRITICAL_THRESHOLD {
            MemoryPressure::Critical
        } else if ratio >= PRESSURE_HIGH_THRESHOLD {
            MemoryPressure::High
        } else if ratio >= PRESSURE_MEDIUM_THRESHOLD {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Outcome of a compaction pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompactionReport {
    /// Allocated ranges whose start address changed
    pub relocated: usize,
    /// Holes merged into the trailing hole
    pub merged_holes: usize,
    /// The single trailing hole, `None` when compaction was a no-op
    pub hole: Option<Range>,
}

impl CompactionReport {
    pub fn is_noop(&self) -> bool {
        self.hole.is_none()
    }
}
