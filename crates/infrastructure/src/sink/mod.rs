//! Report sinks

mod json_line;

pub use json_line::JsonLineSink;
