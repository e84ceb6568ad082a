/*!
 * System Limits and Constants
 *
 * Centralized location for allocator-wide defaults and thresholds.
 */

// =============================================================================
// MEMORY LIMITS
// =============================================================================

/// Default simulated address space size (MAX)
/// Used when neither the command line nor the environment provides one
pub const DEFAULT_MEMORY_MAX: usize = 10_000;

// =============================================================================
// MEMORY PRESSURE THRESHOLDS
// =============================================================================

/// Usage ratio at which pressure is reported as medium
pub const PRESSURE_MEDIUM_THRESHOLD: f64 = 0.60;

/// Usage ratio at which pressure is reported as high (warning)
pub const PRESSURE_HIGH_THRESHOLD: f64 = 0.80;

/// Usage ratio at which pressure is reported as critical
pub const PRESSURE_CRITICAL_THRESHOLD: f64 = 0.95;

// =============================================================================
// COMMAND SURFACE
// =============================================================================

/// Prompt printed before every command read by the shell
pub const DEFAULT_PROMPT: &str = "allocator>";
