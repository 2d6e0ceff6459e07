//! Operations on directories, including filtered scans and the writability probe.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use rand::RngCore;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::entry::EntryType;
use super::scan::Scan;
use super::{file, succeeded};
use crate::core::{Platform, Result, utils};
use crate::platform::Native;
use crate::Error;

const PROBE_PREFIX: &str = "testfile_";

pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_dir()
}

/// Creates `path` together with any missing parents.
///
/// Returns `false` if something already exists at `path`. With `hidden` the deepest directory
/// is hidden afterwards, and the result reflects whether that worked too: on hosts without a
/// hidden attribute the directory is created but `false` is returned.
pub fn create<P: AsRef<Path>>(path: P, hidden: bool) -> bool {
    let path = path.as_ref();
    if path.exists() {
        return false;
    }
    if !succeeded("create directory", std::fs::create_dir_all(path).map_err(Error::from)) {
        return false;
    }
    !hidden || Native::set_hidden(path, true)
}

/// Deletes `path` with all its contents.
/// Returns `false` if `path` is not a directory or is still there afterwards.
pub fn delete<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    if !exists(path) {
        return false;
    }
    succeeded("delete directory", std::fs::remove_dir_all(path).map_err(Error::from));
    !exists(path)
}

pub fn move_to<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> bool {
    let src = src.as_ref();
    if !exists(src) {
        return false;
    }
    succeeded("move directory", std::fs::rename(src, dst).map_err(Error::from))
}

/// Copies `src` with all its contents to `dst`, which must not exist yet.
pub fn copy<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> bool {
    let src = src.as_ref();
    if !exists(src) {
        return false;
    }
    succeeded("copy directory", copy_tree(src, dst.as_ref()))
}

fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    if dst.exists() {
        return Err(Error::AlreadyExists(dst.to_path_buf()));
    }
    let src_abs = utils::normalize(std::path::absolute(src)?);
    let dst_abs = utils::normalize(std::path::absolute(dst)?);
    if dst_abs.starts_with(&src_abs) {
        return Err(anyhow!("cannot copy {} into itself", src.display()).into());
    }

    for entry in WalkDir::new(src) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(anyhow::Error::from)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            file::copy_new(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Lists the files in `dir` whose name fully matches the regular expression `pattern`.
///
/// `None` or an empty pattern lists every file. With `recursive`, every subdirectory is
/// searched whether or not its own name matches. Paths are absolute and keep the host's
/// enumeration order. A missing directory or an invalid pattern gives an empty list.
pub fn get_files<P: AsRef<Path>>(dir: P, pattern: Option<&str>, recursive: bool) -> Vec<String> {
    let dir = dir.as_ref();
    try_get_files(dir, pattern, recursive).unwrap_or_else(|err| {
        debug!(dir = %dir.display(), error = %err, "file scan failed");
        Vec::new()
    })
}

pub fn try_get_files<P: AsRef<Path>>(
    dir: P,
    pattern: Option<&str>,
    recursive: bool,
) -> Result<Vec<String>> {
    Scan::new(pattern, EntryType::File, recursive)?.run(dir.as_ref())
}

/// Lists the subdirectories of `dir` whose name fully matches `pattern`.
/// See [`get_files`] for the matching and ordering rules.
pub fn get_directories<P: AsRef<Path>>(
    dir: P,
    pattern: Option<&str>,
    recursive: bool,
) -> Vec<String> {
    let dir = dir.as_ref();
    try_get_directories(dir, pattern, recursive).unwrap_or_else(|err| {
        debug!(dir = %dir.display(), error = %err, "directory scan failed");
        Vec::new()
    })
}

pub fn try_get_directories<P: AsRef<Path>>(
    dir: P,
    pattern: Option<&str>,
    recursive: bool,
) -> Result<Vec<String>> {
    Scan::new(pattern, EntryType::Directory, recursive)?.run(dir.as_ref())
}

/// Tests whether files can be created in `dir`.
///
/// An empty probe file named `testfile_XXXXXXXX` is created and removed right away. If the
/// caller may create but not delete files in `dir`, the probe file is left behind (a warning
/// is logged). A path that is not a directory is never readonly.
pub fn is_readonly<P: AsRef<Path>>(dir: P) -> bool {
    let dir = dir.as_ref();
    if !exists(dir) {
        return false;
    }
    match ProbeFile::create(dir) {
        Ok(_probe) => false,
        Err(err) => {
            debug!(dir = %dir.display(), error = %err, "probe file cannot be created");
            true
        }
    }
}

/// An empty file that is removed when dropped.
struct ProbeFile {
    path: PathBuf,
}

impl ProbeFile {
    fn create(dir: &Path) -> std::io::Result<Self> {
        let mut rng = rand::thread_rng();
        loop {
            let path = dir.join(format!("{PROBE_PREFIX}{:08X}", rng.next_u32()));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(Self { path }),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err),
            }
        }
    }
}

impl Drop for ProbeFile {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %err, "probe file left behind");
        }
    }
}
