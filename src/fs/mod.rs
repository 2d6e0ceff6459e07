pub mod directory;
mod entry;
pub mod file;
pub mod path;
mod scan;

use tracing::debug;

use crate::core::Result;

/// Collapses an operation result into the boolean contract of the public API.
fn succeeded(operation: &str, result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            debug!(operation, error = %err, "operation failed");
            false
        }
    }
}
