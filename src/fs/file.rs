//! Operations on regular files. Directories never count as files here.

use std::fs::{File, OpenOptions};
use std::path::Path;

use tracing::debug;

use super::succeeded;
use crate::core::Result;
use crate::Error;

pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

/// Returns `false` if `path` is not a file or is still there afterwards.
pub fn delete<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    if !exists(path) {
        return false;
    }
    succeeded("delete file", std::fs::remove_file(path).map_err(Error::from));
    !exists(path)
}

/// Returns `false` if `src` is not a file or the rename fails.
pub fn move_to<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> bool {
    let src = src.as_ref();
    if !exists(src) {
        return false;
    }
    succeeded("move file", std::fs::rename(src, dst).map_err(Error::from))
}

/// Returns `false` if `src` is not a file or `dst` already exists.
pub fn copy<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> bool {
    let src = src.as_ref();
    if !exists(src) {
        return false;
    }
    succeeded("copy file", copy_new(src, dst.as_ref()))
}

pub(crate) fn copy_new(src: &Path, dst: &Path) -> Result<()> {
    if dst.exists() {
        return Err(Error::AlreadyExists(dst.to_path_buf()));
    }
    std::fs::copy(src, dst)?;
    Ok(())
}

/// Returns the size of a file in bytes, or `0` if it cannot be measured.
///
/// An empty file and a failure look the same here; use [`try_size`] to tell them apart.
pub fn size<P: AsRef<Path>>(path: P) -> u64 {
    let path = path.as_ref();
    try_size(path).unwrap_or_else(|err| {
        debug!(path = %path.display(), error = %err, "cannot measure file");
        0
    })
}

/// Opens the file at `path` and returns its size in bytes.
pub fn try_size<P: AsRef<Path>>(path: P) -> Result<u64> {
    let path = path.as_ref();
    if !exists(path) {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    Ok(File::open(path)?.metadata()?.len())
}

/// Returns `true` if the file cannot be opened for appending.
/// A path that is not a file is never readonly.
pub fn is_readonly<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    if !exists(path) {
        return false;
    }
    OpenOptions::new().append(true).open(path).is_err()
}
