//! Display formatting for terminal output

pub mod envelope;
pub mod summary;

pub use envelope::format_envelope_info;
pub use summary::{format_dollars, format_summary};
