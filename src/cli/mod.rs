//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the vault and page layers.

pub mod build;
pub mod inspect;
pub mod open;
pub mod password;
pub mod sync;

pub use build::{handle_build, handle_seal, BuildArgs, SealArgs};
pub use inspect::{handle_inspect, handle_summary};
pub use open::{handle_open, handle_verify, OpenArgs, OutputFormat};
pub use password::resolve_password;
pub use sync::{handle_sync, SyncArgs};
