use std::path::{Component, Path, PathBuf};

/// Preferred path delimiter of the host.
#[cfg(windows)]
pub const DELIMITER: char = '\\';
/// Preferred path delimiter of the host.
#[cfg(not(windows))]
pub const DELIMITER: char = '/';

/// Windows accepts both `/` and `\`, everyone else uses `/` exclusively.
pub(crate) fn is_delim(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}

pub(crate) fn trim_trailing_delims(path: &str) -> &str {
    path.trim_end_matches(is_delim)
}

/// Splits `path` into everything up to (and including) the last delimiter and the final item.
/// On Windows a bare drive prefix (`C:name`) also ends the head.
pub(crate) fn split_name(path: &str) -> (&str, &str) {
    if let Some(pos) = path.rfind(is_delim) {
        return path.split_at(pos + 1);
    }
    if cfg!(windows) && has_drive_prefix(path) {
        return path.split_at(2);
    }
    ("", path)
}

pub(crate) fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Lexically resolves `.` and `..` components. Never climbs above a root.
pub(crate) fn normalize<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(parent) = result.parent() {
                    result = parent.to_path_buf();
                }
            }
            _ => result.push(component),
        }
    }
    result
}

/// Removes a file or a whole directory tree.
pub(crate) fn remove_any(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}
