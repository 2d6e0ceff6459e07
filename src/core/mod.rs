use std::path::Path;

mod error;
pub(crate) mod utils;

pub use error::Error;

/// Operations whose meaning differs between host families.
///
/// Each supported OS provides one implementation; callers go through
/// [`crate::platform::Native`] instead of branching on the target themselves.
pub trait Platform {
    /// Returns `true` if the entry at `path` is hidden by the host's convention.
    fn is_hidden(path: &Path) -> bool;

    /// Hides or shows the entry at `path`.
    /// Returns `false` if the host cannot do this without renaming the entry.
    fn set_hidden(path: &Path, hidden: bool) -> bool;

    /// Rebuilds `path` with the casing stored on disk. `path` must exist.
    fn cased(path: &str) -> Result<String>;

    /// Substitutes environment variable references using the host's syntax.
    fn expand(text: &str) -> Result<String>;
}

pub type Result<T> = std::result::Result<T, Error>;
