use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::overrides::BoxError;
use crate::validate::Violations;

/// Everything that can go wrong while composing a settings value.
///
/// Each variant wraps its underlying cause rather than discarding it, so
/// callers can inspect both the categorical kind and the low-level cause
/// (e.g. distinguish a missing-file [`Open`](Self::Open) from a
/// permission-denied one).
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("No document source is bound to this composer")]
    MissingSource,

    #[error("Failed to open settings file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("Failed to read settings document: {0}")]
    Read(#[source] io::Error),

    #[error("Failed to close settings document: {0}")]
    Close(#[source] io::Error),

    #[error("Failed to unmarshal settings document: {0}")]
    Unmarshal(#[source] serde_json::Error),

    #[error("Failed to apply settings overrides: {0}")]
    Update(#[source] BoxError),

    #[error("Settings validation failed: {0}")]
    Validation(#[source] Violations),
}
