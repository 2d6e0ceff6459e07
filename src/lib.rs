//! A small cross-platform layer over the host filesystem and process table.
//!
//! ### Overview
//!
//! `hostfs-kit` wraps the operations tools keep rewriting by hand: existence checks, creating,
//! deleting, moving and copying files and directories, path text manipulation, filtered
//! directory scans and launching external programs with optional output redirection.
//!
//! **Key ideas**:
//! - **No surprises at the boundary**: queries on missing paths return `false`, `0` or an empty
//!   string, and mutating calls return `false` when their precondition does not hold. Nothing
//!   panics or propagates OS errors through the boolean API; failures are logged with `tracing`.
//! - **Explicit where it matters**: `try_*` twins and [`process`] return [`Result`] so that
//!   "empty" and "failed" can be told apart.
//! - **One seam per platform**: hidden attributes, on-disk casing and environment expansion
//!   differ between hosts and live behind the [`Platform`] trait ([`platform::Native`]).
//! - **UTF-8 paths**: every path handed out is a `String`; see [`encoding`].
//!
//! ### Example
//!
//! ```no_run
//! use hostfs_kit::{directory, path};
//!
//! assert!(directory::create("build/cache", false));
//! assert!(path::set_current_directory("build"));
//!
//! let sources = directory::get_files(".", Some(r".*\.rs"), true);
//! println!("{} sources below {}", sources.len(), path::current_directory());
//!
//! assert_eq!(path::set_extension("notes.txt", "md"), "notes.md");
//! ```

mod core;
pub mod encoding;
mod fs;
pub mod platform;
pub mod process;

pub use core::{Error, Platform, Result};
pub use fs::{directory, file, path};
