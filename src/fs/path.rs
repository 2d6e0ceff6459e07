//! Path text manipulation and operations on entries of any kind.
//!
//! Paths are UTF-8 strings. The text functions (`extension`, `name`, trailing delimiter
//! handling, ...) never touch the filesystem, and none of the functions here panic or return
//! errors: failure is reported as `false` or an empty string.

use std::path::Path;

use tracing::debug;

use super::{directory, file, succeeded};
use crate::core::utils::{self, is_delim, split_name, trim_trailing_delims};
use crate::core::Platform;
use crate::encoding;
use crate::platform::Native;
use crate::Error;

pub use crate::core::utils::DELIMITER;

/// Returns the current working directory, or an empty string if it cannot be determined.
pub fn current_directory() -> String {
    match std::env::current_dir() {
        Ok(dir) => encoding::path_to_utf8(&dir),
        Err(err) => {
            debug!(error = %err, "cannot read current directory");
            String::new()
        }
    }
}

/// Changes the current working directory.
/// Returns `false` if the directory does not exist or cannot be entered.
pub fn set_current_directory<P: AsRef<Path>>(dir: P) -> bool {
    succeeded(
        "set_current_directory",
        std::env::set_current_dir(dir).map_err(Error::from),
    )
}

/// Returns `true` if anything (file or directory) exists at `path`.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// Deletes whatever exists at `path`, recursively for directories.
/// Returns `false` if nothing existed or if anything is still there afterwards.
pub fn delete<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    if !exists(path) {
        return false;
    }
    succeeded("delete", utils::remove_any(path).map_err(Error::from));
    !exists(path)
}

/// Moves a file or directory. Returns `false` if `src` does not exist.
pub fn move_to<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> bool {
    let src = src.as_ref();
    if !exists(src) {
        return false;
    }
    succeeded("move", std::fs::rename(src, dst).map_err(Error::from))
}

/// Copies a file, or a directory with all its contents. An existing `dst` is never overwritten.
/// Returns `false` if `src` does not exist.
pub fn copy<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> bool {
    let src = src.as_ref();
    if directory::exists(src) {
        directory::copy(src, dst)
    } else {
        file::copy(src, dst)
    }
}

/// Returns `true` if `path` is hidden: a name starting with a dot on Unix, the hidden
/// attribute on Windows. Missing paths are never hidden.
pub fn is_hidden<P: AsRef<Path>>(path: P) -> bool {
    Native::is_hidden(path.as_ref())
}

/// Hides or shows `path`.
///
/// On hosts where hidden means "name starts with a dot" this always returns `false`: hiding
/// would require renaming the entry.
pub fn set_hidden<P: AsRef<Path>>(path: P, hidden: bool) -> bool {
    Native::set_hidden(path.as_ref(), hidden)
}

/// Resolves `path` against the current working directory. The target does not need to exist.
pub fn absolute(path: &str) -> String {
    match std::path::absolute(path) {
        Ok(absolute) => encoding::path_to_utf8(&absolute),
        Err(err) => {
            debug!(path, error = %err, "cannot make path absolute");
            String::new()
        }
    }
}

/// Returns `true` if `path` is absolute under the host's rules (`C:\x` is, `C:x` is not).
pub fn is_absolute(path: &str) -> bool {
    Path::new(path).is_absolute()
}

/// The opposite of [`is_absolute`].
pub fn is_relative(path: &str) -> bool {
    !is_absolute(path)
}

/// Returns the absolute path of the directory containing `path`, without a trailing
/// delimiter. Returns an empty string for a root.
pub fn parent(path: &str) -> String {
    let trimmed = trim_trailing_delims(path);
    if trimmed.is_empty() || is_bare_drive(trimmed) {
        return String::new();
    }
    let Ok(absolute) = std::path::absolute(trimmed) else {
        return String::new();
    };
    utils::normalize(absolute)
        .parent()
        .map(encoding::path_to_utf8)
        .unwrap_or_default()
}

fn is_bare_drive(path: &str) -> bool {
    cfg!(windows) && path.len() == 2 && utils::has_drive_prefix(path)
}

/// Byte offset of the extension dot within a final path item.
fn extension_start(name: &str) -> Option<usize> {
    if name == "." || name == ".." {
        return None;
    }
    // A leading dot marks a hidden name, not an extension.
    match name.rfind('.') {
        Some(0) | None => None,
        Some(pos) => Some(pos),
    }
}

/// Returns the extension of the final item of `path`, including its dot (`".bat"`), or an
/// empty string if there is none.
pub fn extension(path: &str) -> String {
    let (_, name) = split_name(path);
    extension_start(name)
        .map(|pos| name[pos..].to_owned())
        .unwrap_or_default()
}

/// Replaces the extension of `path`, or appends one if it has none.
/// `ext` may be given with or without its dot; an empty `ext` removes the extension.
pub fn set_extension(path: &str, ext: &str) -> String {
    let (head, name) = split_name(path);
    let stem = match extension_start(name) {
        Some(pos) => &name[..pos],
        None => name,
    };

    let mut result = String::with_capacity(head.len() + stem.len() + ext.len() + 1);
    result.push_str(head);
    result.push_str(stem);
    if !ext.is_empty() {
        if !ext.starts_with('.') {
            result.push('.');
        }
        result.push_str(ext);
    }
    result
}

/// Appends [`DELIMITER`] unless `path` already ends with a delimiter.
pub fn include_trailing_delim(path: &str) -> String {
    let mut result = path.to_owned();
    if !result.ends_with(is_delim) {
        result.push(DELIMITER);
    }
    result
}

/// Strips every trailing delimiter. A bare root becomes an empty string.
pub fn exclude_trailing_delim(path: &str) -> String {
    trim_trailing_delims(path).to_owned()
}

/// Returns the final item of `path`, ignoring trailing delimiters.
/// For a bare root the root itself is returned (`"/"`, or `"C:"` on Windows).
pub fn name(path: &str) -> String {
    let trimmed = trim_trailing_delims(path);
    let (head, name) = split_name(trimmed);
    if !name.is_empty() {
        return name.to_owned();
    }
    if !head.is_empty() {
        return head.to_owned();
    }
    if path.starts_with(is_delim) {
        return DELIMITER.to_string();
    }
    String::new()
}

/// Returns `path` spelled with the casing stored on disk.
///
/// Case-sensitive hosts return `path` unchanged. An empty string is returned if `path` does
/// not exist or one of its items cannot be looked up.
pub fn cased(path: &str) -> String {
    Native::cased(path).unwrap_or_else(|err| {
        debug!(path, error = %err, "cannot resolve casing");
        String::new()
    })
}

/// Expands environment variable references (`%NAME%` on Windows, `$NAME`/`${NAME}`
/// elsewhere). Undefined variables stay as written. Returns an empty string on failure.
///
/// Other functions of this crate never expand variables themselves.
pub fn expand(text: &str) -> String {
    Native::expand(text).unwrap_or_else(|err| {
        debug!(text, error = %err, "cannot expand environment variables");
        String::new()
    })
}
