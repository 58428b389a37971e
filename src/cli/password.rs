//! Password input
//!
//! The password comes from an environment variable when it is set, otherwise
//! from a hidden terminal prompt. It is never echoed or logged.

use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::Password;
use crate::error::{WheelboardError, WheelboardResult};

/// Get the password from `env_var`, or prompt for it
///
/// With `confirm`, an interactive prompt asks twice and loops until both
/// entries match. A set but empty environment variable is an error.
pub fn resolve_password(env_var: &str, confirm: bool) -> WheelboardResult<Password> {
    match std::env::var(env_var) {
        Ok(value) => {
            debug!(env_var, "using password from environment");
            Password::new(value)
        }
        Err(_) => prompt_password(confirm),
    }
}

fn prompt_password(confirm: bool) -> WheelboardResult<Password> {
    loop {
        let first = prompt("Password: ")?;
        if first.is_empty() {
            eprintln!("Password must not be empty. Please try again.");
            continue;
        }

        if confirm {
            let second = prompt("Confirm password: ")?;
            if *first != *second {
                eprintln!("Passwords do not match. Please try again.");
                continue;
            }
        }

        return Password::new(first.as_str());
    }
}

fn prompt(label: &str) -> WheelboardResult<Zeroizing<String>> {
    rpassword::prompt_password(label)
        .map(Zeroizing::new)
        .map_err(|e| WheelboardError::Io(format!("Failed to read password: {}", e)))
}
