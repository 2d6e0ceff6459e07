use std::path::Path;
use std::ptr;

use anyhow::anyhow;
use tracing::debug;
use windows_sys::Win32::Foundation::INVALID_HANDLE_VALUE;
use windows_sys::Win32::Storage::FileSystem::{
    FILE_ATTRIBUTE_HIDDEN, FindClose, FindFirstFileW, GetFileAttributesW,
    INVALID_FILE_ATTRIBUTES, SetFileAttributesW, WIN32_FIND_DATAW,
};
use windows_sys::Win32::System::Environment::ExpandEnvironmentStringsW;

use crate::Error;
use crate::core::utils::{DELIMITER, has_drive_prefix, is_delim};
use crate::core::{Platform, Result};
use crate::encoding::{from_wide, to_wide};

/// Windows hosts: hidden is a file attribute, paths are case-insensitive and variables are
/// written `%NAME%`.
pub struct Windows;

fn attributes(path: &Path) -> Option<u32> {
    let wide = to_wide(path);
    // SAFETY: `wide` is an owned, NUL-terminated UTF-16 buffer that outlives the call.
    let attribs = unsafe { GetFileAttributesW(wide.as_ptr()) };
    (attribs != INVALID_FILE_ATTRIBUTES).then_some(attribs)
}

/// Looks up the name of the last item of `path` exactly as stored on disk.
fn on_disk_name(path: &str) -> Result<String> {
    let wide = to_wide(path);
    // SAFETY: WIN32_FIND_DATAW is plain data; all-zero is a valid value.
    let mut data: WIN32_FIND_DATAW = unsafe { std::mem::zeroed() };

    // SAFETY: `wide` is NUL-terminated and `data` is a valid out-pointer for this call.
    let handle = unsafe { FindFirstFileW(wide.as_ptr(), &mut data) };
    if handle == INVALID_HANDLE_VALUE {
        return Err(anyhow!("cannot look up '{}': {}", path, std::io::Error::last_os_error()).into());
    }
    // SAFETY: `handle` is a valid search handle returned above and closed exactly once.
    unsafe { FindClose(handle) };

    Ok(from_wide(&data.cFileName))
}

impl Platform for Windows {
    fn is_hidden(path: &Path) -> bool {
        attributes(path).is_some_and(|attribs| attribs & FILE_ATTRIBUTE_HIDDEN != 0)
    }

    fn set_hidden(path: &Path, hidden: bool) -> bool {
        let Some(mut attribs) = attributes(path) else {
            debug!(path = %path.display(), "cannot read attributes");
            return false;
        };

        if hidden {
            attribs |= FILE_ATTRIBUTE_HIDDEN;
        } else {
            attribs &= !FILE_ATTRIBUTE_HIDDEN;
        }

        let wide = to_wide(path);
        // SAFETY: `wide` is an owned, NUL-terminated UTF-16 buffer that outlives the call.
        unsafe { SetFileAttributesW(wide.as_ptr(), attribs) != 0 }
    }

    /// Network prefixes (`\\server\share`) are kept as written, drive letters are upper-cased,
    /// every other item is replaced by its on-disk name. `.` and `..` pass through.
    fn cased(path: &str) -> Result<String> {
        if !Path::new(path).exists() {
            return Err(Error::NotFound(path.into()));
        }

        let mut result = String::with_capacity(path.len());
        let mut rest = path;
        let mut verbatim = 0;

        if let Some(stripped) = path.strip_prefix(r"\\") {
            result.push_str(r"\\");
            rest = stripped;
            verbatim = 2;
        } else if has_drive_prefix(path) {
            result.push(path.as_bytes()[0].to_ascii_uppercase() as char);
            result.push(':');
            result.push(DELIMITER);
            rest = &path[2..];
        }

        let items: Vec<&str> = rest.split(is_delim).filter(|item| !item.is_empty()).collect();
        for (index, item) in items.iter().enumerate() {
            if index < verbatim || *item == "." || *item == ".." {
                result.push_str(item);
            } else {
                let name = on_disk_name(&format!("{result}{item}"))?;
                result.push_str(&name);
            }
            if index + 1 < items.len() {
                result.push(DELIMITER);
            }
        }

        if !items.is_empty() && rest.ends_with(is_delim) {
            result.push(DELIMITER);
        }

        Ok(result)
    }

    fn expand(text: &str) -> Result<String> {
        let source = to_wide(text);

        // SAFETY: `source` is NUL-terminated; a null destination with size 0 queries the length.
        let size = unsafe { ExpandEnvironmentStringsW(source.as_ptr(), ptr::null_mut(), 0) };
        if size == 0 {
            return Err(std::io::Error::last_os_error().into());
        }
        if size == 1 {
            return Ok(String::new());
        }

        let mut buffer = vec![0u16; size as usize];
        // SAFETY: `buffer` holds exactly `size` UTF-16 units as reported by the call above.
        let written =
            unsafe { ExpandEnvironmentStringsW(source.as_ptr(), buffer.as_mut_ptr(), size) };
        if written == 0 || written > size {
            return Err(std::io::Error::last_os_error().into());
        }

        Ok(from_wide(&buffer))
    }
}
