/*!
 * Allocator Shell
 * Read-eval-print loop driving a memory manager
 */

use super::command::Command;
use super::render::{render_error, render_stat};
use crate::config::{AllocatorConfig, StatFormat};
use crate::memory::MemoryManager;
use crate::monitoring::span_command;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// What the shell does after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive shell over any line source and sink
pub struct Shell<R, W> {
    manager: MemoryManager,
    input: R,
    output: W,
    prompt: String,
    stat_format: StatFormat,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(manager: MemoryManager, input: R, output: W) -> Self {
        let defaults = AllocatorConfig::default();
        Self {
            manager,
            input,
            output,
            prompt: defaults.prompt,
            stat_format: defaults.stat_format,
        }
    }

    /// Shell using the prompt and STAT format from `config`
    pub fn with_config(
        manager: MemoryManager,
        input: R,
        output: W,
        config: &AllocatorConfig,
    ) -> Self {
        Self {
            manager,
            input,
            output,
            prompt: config.prompt.clone(),
            stat_format: config.stat_format,
        }
    }

    pub fn manager(&self) -> &MemoryManager {
        &self.manager
    }

    /// Give back the manager and the output sink
    pub fn into_parts(self) -> (MemoryManager, W) {
        (self.manager, self.output)
    }

    /// Run until `X` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        let mut line = String::new();
        loop {
            write!(self.output, "{}", self.prompt)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("End of input, leaving shell");
                writeln!(self.output)?;
                return Ok(());
            }

            if self.execute(&line)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Execute a single protocol line
    ///
    /// Rejected commands and failed operations are reported on the output
    /// and the shell keeps going; only I/O errors stop it.
    pub fn execute(&mut self, line: &str) -> io::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                warn!(line = line.trim(), error = %err, "Rejected command");
                writeln!(self.output, "{}", err)?;
                return Ok(Flow::Continue);
            }
        };

        let span = span_command(command.keyword());
        let _entered = span.enter();

        let outcome = match &command {
            Command::Exit => return Ok(Flow::Exit),
            Command::Stat => {
                let rendered = render_stat(&self.manager.snapshot(), self.stat_format)
                    .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
                self.output.write_all(rendered.as_bytes())?;
                Ok(())
            }
            Command::Compact => {
                self.manager.compact();
                Ok(())
            }
            Command::Release { pid } => self.manager.release(pid).map(|_| ()),
            Command::Request { pid, size, policy } => {
                self.manager.allocate(pid, *size, *policy).map(|_| ())
            }
        };

        match outcome {
            Ok(()) => span.record_result(true),
            Err(err) => {
                span.record_error(&err.to_string());
                writeln!(self.output, "{}", render_error(&err))?;
            }
        }
        Ok(Flow::Continue)
    }
}
