//! Console sink implementations

pub mod file;
pub mod memory;
pub mod terminal;

pub use file::FileConsole;
pub use memory::{MemoryConsole, SinkRecord};
pub use terminal::{render_table, TerminalConsole};

pub use crate::core::{ConsoleArg, ConsoleSink};
