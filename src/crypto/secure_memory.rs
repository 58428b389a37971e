//! Secure memory handling for the dashboard password
//!
//! The password is kept in a zeroizing buffer and never printed.

use std::fmt;
use std::ops::Deref;

use zeroize::Zeroizing;

use crate::error::{WheelboardError, WheelboardResult};

/// A non-empty password that zeros its contents on drop
pub struct Password {
    inner: Zeroizing<String>,
}

impl Password {
    /// Create a new Password
    ///
    /// # Errors
    ///
    /// Returns a validation error if the password is empty.
    pub fn new(s: impl Into<String>) -> WheelboardResult<Self> {
        let inner = Zeroizing::new(s.into());
        if inner.is_empty() {
            return Err(WheelboardError::Validation(
                "password must not be empty".to_string(),
            ));
        }
        Ok(Self { inner })
    }

    /// Get the password contents
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Get the UTF-8 bytes fed to key derivation
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }
}

impl Deref for Password {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl TryFrom<String> for Password {
    type Error = WheelboardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Password {
    type Error = WheelboardError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("len", &self.inner.len())
            .finish()
    }
}

// Don't print the contents in Display output
impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}
