//! Layered application settings: a JSON baseline, pluggable overrides,
//! pluggable validation.
//!
//! Define a settings struct, point a [`Composer`] at a document, and one
//! call hands the struct back decoded, overridden, and validated:
//!
//! ```ignore
//! let env = EnvOverrides::new("MYAPP");
//! let mut settings = Settings::default();
//! Composer::from_default_file()?
//!     .with_overrides(Some(&env))
//!     .with_validator(Some(&check_required))
//!     .compose(&mut settings)?;
//! ```
//!
//! That single call opens `appsettings.json` in the working directory,
//! decodes it into `settings`, overlays `MYAPP__*` environment variables,
//! and runs the validator over the merged result.
//!
//! # The pipeline
//!
//! Composition is a fixed three-stage pipeline over a caller-defined struct:
//!
//! ```text
//! JSON document       decoded into the settings struct
//!        ↑ overridden by
//! Override applier    any external source: env vars, remote config, flags
//!        ↑ checked by
//! Validator           accumulated invariant violations
//! ```
//!
//! Stages run in that order, each exactly once, and the first failure ends
//! the call. The override and validation stages are **opt-in**: with neither
//! attached, a well-formed document alone is sufficient, and fields the
//! document omits simply take their default values. Requiredness is a
//! validator's business, not the decoder's.
//!
//! The composer never inspects the struct's shape. It is a black box
//! threaded through the stages, which is what makes the extension points
//! pluggable: an applier and a validator address the same structure the
//! decode stage populated, by whatever convention they choose.
//!
//! # The document source
//!
//! The baseline document comes from a [`DocumentSource`] — anything that
//! yields a byte stream and can be closed exactly once. The composer owns
//! its source exclusively and consumes it on the first
//! [`compose`](Composer::compose): the stream is read to completion, decoded,
//! and closed on every exit path, including the error paths. A close failure
//! is never swallowed; it fails the composition even when reading and
//! decoding went through, because a handle that won't release cleanly is not
//! a success.
//!
//! Repeated composition therefore means a fresh `Composer` per attempt. A
//! second `compose` on the same instance fails with
//! [`ComposeError::MissingSource`] before touching anything else.
//!
//! # Field naming
//!
//! Document keys map to struct fields through serde: conventional lowercase
//! keys for nested groups, with `#[serde(rename = "...")]` where a document
//! key differs from the field name (`msg-level`, say). The composer computes
//! no name reconciliation of its own — decode follows the struct's serde
//! attributes, and an override applier follows whatever convention it
//! implements.
//!
//! # Environment overrides
//!
//! [`EnvOverrides`] is the batteries-included applier. With prefix `MYAPP`,
//! variables map via double-underscore nesting — `MYAPP__DATABASE__URL`
//! targets `database.url` — and every variable is optional, so the
//! environment is a sparse overlay on top of the document. Any other
//! override source is a small [`OverrideApplier`] impl away, and closures of
//! the right shape work directly.
//!
//! # Error handling
//!
//! All fallible operations return [`ComposeError`]. Each variant names the
//! failed stage — open, read, close, unmarshal, update, validate — and wraps
//! the underlying cause rather than flattening it to a string, so callers
//! can tell a missing file from a permission problem. Validation failures
//! carry a [`Violations`] aggregate in which every reported message remains
//! individually inspectable.

pub mod error;

mod composer;
mod env;
pub(crate) mod merge;
mod overrides;
mod source;
mod validate;

#[cfg(test)]
mod fixtures;

pub use composer::Composer;
pub use env::EnvOverrides;
pub use error::ComposeError;
pub use overrides::{BoxError, OverrideApplier};
pub use source::{DEFAULT_FILE_NAME, DocumentSource};
pub use validate::{Validator, Violations};
