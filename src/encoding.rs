//! Conversions between UTF-8 text and the host's native string encoding.
//!
//! Every path handed out by this crate is UTF-8. Names the host stores in another encoding
//! are converted lossily (invalid sequences become `U+FFFD`).

use std::ffi::OsStr;
use std::path::Path;

/// Converts a host string to UTF-8, replacing invalid sequences.
pub fn to_utf8(text: &OsStr) -> String {
    text.to_string_lossy().into_owned()
}

/// Same as [`to_utf8`] for paths.
pub fn path_to_utf8(path: &Path) -> String {
    to_utf8(path.as_os_str())
}

/// Encodes `text` as a NUL-terminated UTF-16 buffer for Win32 calls.
#[cfg(windows)]
pub fn to_wide<S: AsRef<OsStr>>(text: S) -> Vec<u16> {
    use std::os::windows::ffi::OsStrExt;

    let mut wide: Vec<u16> = text.as_ref().encode_wide().collect();
    wide.push(0);
    wide
}

/// Decodes a UTF-16 buffer up to its first NUL (or its end).
#[cfg(windows)]
pub fn from_wide(wide: &[u16]) -> String {
    let len = wide.iter().position(|&unit| unit == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}
