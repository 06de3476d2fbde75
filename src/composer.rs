//! The composer: a single-use document source, two optional plugin slots,
//! and the decode → override → validate pipeline.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ComposeError;
use crate::overrides::OverrideApplier;
use crate::source::{self, DEFAULT_FILE_NAME, DocumentSource};
use crate::validate::Validator;

/// Composes a settings value from a baseline document, pluggable overrides,
/// and pluggable validation.
///
/// A `Composer` owns its document source exclusively and holds the plugins
/// only by reference — their lifecycles belong to the caller. The source is
/// single-use: the first [`compose`](Self::compose) call consumes and closes
/// it, so repeated composition means constructing a fresh `Composer` (and,
/// for the default source, reopening the default file).
pub struct Composer<'a, S> {
    source: Option<Box<dyn DocumentSource>>,
    overrides: Option<&'a dyn OverrideApplier<S>>,
    validator: Option<&'a dyn Validator<S>>,
}

impl<S> fmt::Debug for Composer<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("source", &self.source.is_some())
            .field("overrides", &self.overrides.is_some())
            .field("validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a, S> Composer<'a, S> {
    /// Bind an explicit document source, with no plugins attached.
    ///
    /// A faulty source is accepted here without complaint; it fails later,
    /// at the read stage of [`compose`](Self::compose).
    pub fn new(source: impl DocumentSource + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            overrides: None,
            validator: None,
        }
    }

    /// Open [`DEFAULT_FILE_NAME`] relative to the current working directory.
    ///
    /// An open failure is reported as [`ComposeError::Open`] with the
    /// OS-level cause intact, so "not found" stays distinguishable from
    /// "permission denied".
    pub fn from_default_file() -> Result<Self, ComposeError> {
        Self::from_file(DEFAULT_FILE_NAME)
    }

    /// Open an explicit settings file, with the same `Open` wrapping as
    /// [`from_default_file`](Self::from_default_file).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ComposeError> {
        Ok(Self::new(source::open(path.as_ref())?))
    }

    /// Attach an override applier, replacing any previously attached one.
    /// `None` explicitly disables the override stage.
    pub fn with_overrides(mut self, applier: Option<&'a dyn OverrideApplier<S>>) -> Self {
        self.overrides = applier;
        self
    }

    /// Attach a validator, replacing any previously attached one.
    /// `None` explicitly disables the validation stage.
    pub fn with_validator(mut self, validator: Option<&'a dyn Validator<S>>) -> Self {
        self.validator = validator;
        self
    }
}

impl<S: DeserializeOwned> Composer<'_, S> {
    /// Run the pipeline: decode the document into `settings`, apply the
    /// override applier, then run the validator.
    ///
    /// The stages run in that fixed order, each exactly once, and the first
    /// failing stage's error is the sole result — an unattached stage is
    /// skipped, and validation only runs once decode and override both
    /// succeeded. Nothing is retried internally.
    ///
    /// The document source is consumed and closed by this call, whatever the
    /// outcome; a second `compose` on the same composer fails with
    /// [`ComposeError::MissingSource`] before touching `settings`.
    pub fn compose(&mut self, settings: &mut S) -> Result<(), ComposeError> {
        self.decode(settings)?;

        if let Some(applier) = self.overrides {
            debug!("applying settings overrides");
            applier.apply(settings).map_err(ComposeError::Update)?;
        }

        if let Some(validator) = self.validator {
            debug!("validating settings");
            validator
                .validate(settings)
                .map_err(ComposeError::Validation)?;
        }

        Ok(())
    }

    /// Decode stage: take the source out of its slot, read it to end, decode
    /// the bytes into `settings`. The source is closed on every path once
    /// taken, and a close failure is never swallowed — it wins over whatever
    /// the read or decode produced.
    fn decode(&mut self, settings: &mut S) -> Result<(), ComposeError> {
        let mut source = self.source.take().ok_or(ComposeError::MissingSource)?;

        let decoded = read_and_decode(source.as_mut(), settings);
        let closed = source.close();
        debug!(ok = decoded.is_ok(), "decoded settings document");

        match (decoded, closed) {
            (_, Err(e)) => Err(ComposeError::Close(e)),
            (decoded, Ok(())) => decoded,
        }
    }
}

fn read_and_decode<S: DeserializeOwned>(
    source: &mut dyn DocumentSource,
    settings: &mut S,
) -> Result<(), ComposeError> {
    let mut buf = Vec::new();
    source.read_to_end(&mut buf).map_err(ComposeError::Read)?;
    *settings = serde_json::from_slice(&buf).map_err(ComposeError::Unmarshal)?;
    Ok(())
}
