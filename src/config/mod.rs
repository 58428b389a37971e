//! Configuration module for Wheelboard
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::WheelboardPaths;
pub use settings::Settings;
