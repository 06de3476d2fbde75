//! Document sources: byte-stream providers consumed and closed exactly once.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::ComposeError;

/// File name opened when no explicit source is supplied, resolved relative
/// to the process working directory.
pub const DEFAULT_FILE_NAME: &str = "appsettings.json";

/// A byte-stream provider for the baseline settings document.
///
/// A source is read to completion and then closed, exactly once, during
/// [`compose`](crate::Composer::compose). `close` exists so implementations
/// can surface release failures — dropping a `File` would silently swallow
/// them — and a reported close failure fails the whole composition even when
/// reading and decoding succeeded.
pub trait DocumentSource: Read {
    /// Release the underlying resource. Called once, after reading, on every
    /// exit path of the decode stage.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl DocumentSource for File {}

impl<T: AsRef<[u8]>> DocumentSource for io::Cursor<T> {}

/// Open `path`, wrapping any failure so the OS-level cause (not found,
/// permission denied, ...) stays inspectable behind the `Open` kind.
pub(crate) fn open(path: &Path) -> Result<File, ComposeError> {
    File::open(path).map_err(|source| ComposeError::Open {
        path: path.to_path_buf(),
        source,
    })
}
