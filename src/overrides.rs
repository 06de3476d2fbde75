//! The override capability: mutate a decoded settings value from any
//! external source.

use std::error::Error;

/// Boxed error type that plugins return across the capability boundary.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Mutates the settings value the decode stage populated.
///
/// Attached via [`with_overrides`](crate::Composer::with_overrides) and run
/// between decode and validation. Implementations are free to source their
/// values from anywhere — environment variables (see
/// [`EnvOverrides`](crate::EnvOverrides)), remote key-value stores, CLI
/// flags. The pipeline imposes no naming convention; an applier addresses
/// the same structure the document was decoded into, however it sees fit.
///
/// Implemented for closures of the matching shape.
pub trait OverrideApplier<S> {
    fn apply(&self, settings: &mut S) -> Result<(), BoxError>;
}

impl<S, F> OverrideApplier<S> for F
where
    F: Fn(&mut S) -> Result<(), BoxError>,
{
    fn apply(&self, settings: &mut S) -> Result<(), BoxError> {
        self(settings)
    }
}
