//! Wheelboard - password-protected static dashboard builder
//!
//! Wheelboard turns a portfolio data file into a single static HTML page whose
//! data is encrypted with a password. The page decrypts itself in the browser;
//! the server hosting it only ever sees ciphertext.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: Key derivation, AES-256-GCM and the envelope wire format
//! - `vault`: Encoding and decoding of whole payloads
//! - `page`: Embedding envelopes into page templates and reading them back
//! - `models`: Typed view of the portfolio data and derived totals
//! - `import`: Reading data out of legacy build scripts
//! - `storage`: File reading and atomic writes
//! - `config`: Configuration and path management
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use wheelboard::crypto::Password;
//! use wheelboard::vault;
//!
//! let password = Password::new("1029")?;
//! let envelope = vault::encode(&serde_json::json!({"cash": 17000}), &password)?;
//! let payload = vault::decode(&envelope, &password)?;
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod import;
pub mod logging;
pub mod models;
pub mod page;
pub mod storage;
pub mod vault;

pub use crypto::{Envelope, Password};
pub use error::{WheelboardError, WheelboardResult};
