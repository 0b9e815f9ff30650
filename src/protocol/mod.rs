//! Text protocol handling.
//!
//! The ASCII grid notation for boards and the command parser for the
//! driver loop.

pub mod ascii;
pub mod parser;

pub use ascii::{encode_ascii, parse_ascii, AsciiError};
pub use parser::{parse_command, Command};
