use std::path::Path;

/// Kind of entry a directory scan collects.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum EntryType {
    File,
    Directory,
}

impl EntryType {
    /// Classifies `path`, following symlinks. Anything that is not a directory counts as a file.
    pub(crate) fn of(path: &Path) -> EntryType {
        if path.is_dir() {
            EntryType::Directory
        } else {
            EntryType::File
        }
    }
}
