//! Host-specific implementations of [`Platform`](crate::Platform).
//!
//! `Native` names the implementation for the target being compiled, so the rest of the crate
//! never needs its own `cfg` branches for hidden attributes, casing or variable expansion.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::Unix;
#[cfg(windows)]
pub use windows::Windows;

#[cfg(unix)]
pub type Native = Unix;
#[cfg(windows)]
pub type Native = Windows;

#[cfg(not(any(unix, windows)))]
compile_error!("hostfs-kit supports unix and windows targets only");
