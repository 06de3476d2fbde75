//! The validation capability and its aggregate error.

use std::error::Error;
use std::fmt;

/// Inspects a merged settings value and reports accumulated invariant
/// violations.
///
/// Attached via [`with_validator`](crate::Composer::with_validator) and run
/// as the last pipeline stage, only after decode and override both
/// succeeded. A validator should check everything and report every violation
/// it finds, not stop at the first one.
///
/// Implemented for closures of the matching shape, so one-off validators
/// don't need a named type.
pub trait Validator<S> {
    fn validate(&self, settings: &S) -> Result<(), Violations>;
}

impl<S, F> Validator<S> for F
where
    F: Fn(&S) -> Result<(), Violations>,
{
    fn validate(&self, settings: &S) -> Result<(), Violations> {
        self(settings)
    }
}

/// Violations accumulated during a single validation pass.
///
/// An ordered list of messages with a combined display form. Messages stay
/// individually inspectable via [`iter`](Self::iter) — nothing is dropped or
/// deduplicated on the way into a
/// [`ComposeError::Validation`](crate::ComposeError::Validation).
#[derive(Debug, Default)]
pub struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation. Insertion order is preserved.
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Iterate over the recorded messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded, `Err(self)` otherwise.
    ///
    /// The natural tail call of a validator body: push every violation
    /// found, then convert.
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}

impl Error for Violations {}
