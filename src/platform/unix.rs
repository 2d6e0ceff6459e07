use std::path::Path;

use tracing::debug;

use crate::core::{Platform, Result};
use crate::encoding;
use crate::Error;

/// Unix-like hosts: hidden means "name starts with a dot", paths are case-sensitive and
/// variables are written `$NAME` or `${NAME}`.
pub struct Unix;

impl Platform for Unix {
    fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name.as_encoded_bytes().starts_with(b"."))
    }

    /// Hiding would require renaming the entry, which this call never does.
    fn set_hidden(path: &Path, _hidden: bool) -> bool {
        debug!(path = %path.display(), "hidden attribute is not supported on this host");
        false
    }

    fn cased(path: &str) -> Result<String> {
        if !Path::new(path).exists() {
            return Err(Error::NotFound(path.into()));
        }
        Ok(path.to_owned())
    }

    /// Undefined variables are left as written.
    fn expand(text: &str) -> Result<String> {
        let mut result = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(pos) = rest.find('$') {
            result.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            let (name, consumed) = match after.strip_prefix('{') {
                Some(braced) => match braced.find('}') {
                    Some(end) => (&braced[..end], end + 2),
                    None => ("", 0),
                },
                None => {
                    let end = after
                        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                        .unwrap_or(after.len());
                    (&after[..end], end)
                }
            };

            let reference = &rest[pos..pos + 1 + consumed];
            let value = if name.is_empty() {
                None
            } else {
                std::env::var_os(name)
            };
            match value {
                Some(value) => result.push_str(&encoding::to_utf8(&value)),
                None => result.push_str(reference),
            }

            rest = &rest[pos + 1 + consumed..];
        }

        result.push_str(rest);
        Ok(result)
    }
}
