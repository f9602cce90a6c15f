//! Utility functions and types.

use std::fmt::Debug;

/// Redacts secret material for `Debug` output.
///
/// - Empty input prints `EMPTY`.
/// - Input shorter than 12 characters is fully redacted.
/// - Longer input keeps the first and last three characters, so an access
///   key id can still be told apart from another one in logs.
/// - Input marked with [`Redact::full`] never shows any character.
pub struct Redact<'a> {
    value: &'a str,
    full: bool,
}

impl Redact<'_> {
    /// Hide every character, for secret keys.
    pub fn full(mut self) -> Self {
        self.full = true;
        self
    }
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact { value, full: false }
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact::from(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact::from(value.as_deref().unwrap_or_default())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.value.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if self.full || length < 12 || !self.value.is_ascii() {
            f.write_str("***")
        } else {
            f.write_str(&self.value[..3])?;
            f.write_str("***")?;
            f.write_str(&self.value[length - 3..])
        }
    }
}
