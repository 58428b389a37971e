//! Importing portfolio data from older formats

pub mod build_script;

pub use build_script::extract_data;
