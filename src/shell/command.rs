/*!
 * Shell Commands
 * Parsing of the line-oriented allocator protocol
 */

use crate::core::types::Size;
use crate::memory::FitPolicy;
use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// Command parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum CommandError {
    #[error("command not recognized")]
    #[diagnostic(
        code(shell::unrecognized),
        help("Commands: STAT, C, RL <id>, RQ <id> <size> <F|B|W>, X")
    )]
    Unrecognized(String),

    #[error("invalid size '{0}'")]
    #[diagnostic(code(shell::invalid_size), help("Size must be a positive integer."))]
    InvalidSize(String),
}

/// One parsed protocol command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `STAT`: report every range
    Stat,
    /// `C`: compact all holes
    Compact,
    /// `RL <id>`: release a process
    Release { pid: String },
    /// `RQ <id> <size> <F|B|W>`: allocate for a process
    Request {
        pid: String,
        size: Size,
        policy: FitPolicy,
    },
    /// `X`: leave the shell
    Exit,
}

impl Command {
    /// Parse one input line; blank lines yield `Ok(None)`
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let args: Vec<&str> = line.split_whitespace().collect();

        let command = match args.as_slice() {
            [] => return Ok(None),
            ["X"] => Command::Exit,
            ["STAT"] => Command::Stat,
            ["C"] => Command::Compact,
            ["RL", pid] => Command::Release {
                pid: pid.to_string(),
            },
            ["RQ", pid, size, flag] => {
                let policy = FitPolicy::from_flag(flag)
                    .ok_or_else(|| CommandError::Unrecognized(line.trim().to_string()))?;
                let size = match size.parse::<Size>() {
                    Ok(size) if size > 0 => size,
                    _ => return Err(CommandError::InvalidSize(size.to_string())),
                };
                Command::Request {
                    pid: pid.to_string(),
                    size,
                    policy,
                }
            }
            _ => return Err(CommandError::Unrecognized(line.trim().to_string())),
        };

        Ok(Some(command))
    }

    /// Protocol keyword, used to name tracing spans
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Stat => "STAT",
            Command::Compact => "C",
            Command::Release { .. } => "RL",
            Command::Request { .. } => "RQ",
            Command::Exit => "X",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Release { pid } => write!(f, "RL {}", pid),
            Command::Request { pid, size, policy } => {
                write!(f, "RQ {} {} {}", pid, size, policy.flag())
            }
            other => f.write_str(other.keyword()),
        }
    }
}
