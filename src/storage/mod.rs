//! File storage helpers
//!
//! Reading data files and atomically writing build outputs.

pub mod file_io;

pub use file_io::{read_json_required, read_text, write_atomic, write_json_atomic};
