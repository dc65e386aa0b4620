//! Form validation shared by the login screen and the admin bootstrap CLI.
//!
//! DESIGN
//! ======
//! Validators are plain functions from raw form input to either the
//! normalized input or a [`ValidationErrors`] map keyed by field name. They
//! never touch stores or the network, so the server can reuse them.

pub mod auth;

use std::collections::BTreeMap;

/// Field-keyed validation messages, in the order rules were checked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<&'static str>>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: &'static str) {
        self.fields.entry(field).or_default().push(message);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every message recorded for `field`.
    #[must_use]
    pub fn field(&self, field: &str) -> &[&'static str] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// First message for `field`, which is what forms display.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&'static str> {
        self.field(field).first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[&'static str])> + '_ {
        self.fields.iter().map(|(field, messages)| (*field, messages.as_slice()))
    }

    /// `Ok(value)` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid input")?;
        for (i, (field, messages)) in self.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
