/*!
 * Shell Module
 * Textual command surface over the memory manager
 */

pub mod command;
pub mod render;
pub mod repl;

pub use command::{Command, CommandError};
pub use render::{render_error, render_range, render_stat};
pub use repl::{Flow, Shell};
