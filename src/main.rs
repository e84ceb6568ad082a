/*!
 * Contiguous Memory Allocator - Main Entry Point
 *
 * Usage:
 *     allocator <MAX>
 *
 * Reads commands from stdin:
 * - RQ <id> <size> <F|B|W>: allocate with first, best or worst fit
 * - RL <id>: release a process
 * - C: compact holes
 * - STAT: report every range
 * - X: exit
 */

use contiguous_allocator::{init_tracing, AllocatorConfig, MemoryManager, Shell};
use miette::{IntoDiagnostic, Result};
use std::io;
use tracing::info;

fn main() -> Result<()> {
    let config = AllocatorConfig::load(std::env::args().skip(1))?;

    init_tracing(config.trace_json);
    info!(
        max_memory = config.max_memory,
        stat_format = ?config.stat_format,
        "Contiguous allocator starting"
    );

    let manager = MemoryManager::from_config(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::with_config(manager, stdin.lock(), stdout.lock(), &config);
    shell.run().into_diagnostic()?;

    info!("Contiguous allocator exiting");
    Ok(())
}
