//! Directory scanning shared by `directory::get_files` and `directory::get_directories`.
//!
//! Results keep the order in which the host enumerates entries. A recursive scan is
//! depth-first: a subdirectory's results are appended as soon as that subdirectory is met,
//! so they interleave with the matches of the current level.

use std::path::Path;

use regex::Regex;
use tracing::warn;
use walkdir::WalkDir;

use super::entry::EntryType;
use crate::core::Result;
use crate::{Error, encoding};

pub(crate) struct Scan {
    pattern: Option<Regex>,
    kind: EntryType,
    recursive: bool,
}

impl Scan {
    /// `pattern` must match an entry's whole name. `None` or an empty pattern matches
    /// everything.
    pub(crate) fn new(pattern: Option<&str>, kind: EntryType, recursive: bool) -> Result<Self> {
        let pattern = match pattern {
            Some(pattern) if !pattern.is_empty() => Some(full_match(pattern)?),
            _ => None,
        };

        Ok(Self {
            pattern,
            kind,
            recursive,
        })
    }

    pub(crate) fn run(&self, dir: &Path) -> Result<Vec<String>> {
        if !dir.is_dir() {
            return Err(Error::NotFound(dir.to_path_buf()));
        }
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        // Linked directories are listed but never entered, so link cycles cannot recurse.
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(false);

        let mut found = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.path() == Some(dir) => return Err(err.into()),
                Err(err) => {
                    warn!(path = ?err.path(), error = %err, "skipping unreadable directory");
                    continue;
                }
            };

            let path = entry.path();
            if EntryType::of(path) == self.kind && self.matches(&encoding::to_utf8(entry.file_name()))
            {
                let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
                found.push(encoding::path_to_utf8(&absolute));
            }
        }
        Ok(found)
    }

    fn matches(&self, name: &str) -> bool {
        self.pattern
            .as_ref()
            .is_none_or(|pattern| pattern.is_match(name))
    }
}

/// Compiles `pattern` anchored at both ends.
///
/// The pattern is checked on its own first: unbalanced groups could otherwise close the
/// anchoring group and turn the full match into a search.
fn full_match(pattern: &str) -> Result<Regex> {
    let invalid = |source| Error::InvalidPattern {
        pattern: pattern.to_owned(),
        source,
    };
    Regex::new(pattern).map_err(invalid)?;
    Regex::new(&format!("^(?:{pattern})$")).map_err(invalid)
}
