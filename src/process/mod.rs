//! Launching external programs.
//!
//! Arguments are passed as one raw string, like a command line. On Windows the string is
//! appended verbatim after the quoted program. Elsewhere it is split into words with
//! shell-like quoting and the program is started directly, without a shell.
//!
//! Synchronous calls block until the child exits; there is no timeout. Asynchronous calls
//! start the child and forget it.

#[cfg(not(windows))]
mod args;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tracing::{debug, trace};

use crate::core::Result;
use crate::{Error, encoding};

#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Raw argument string. `None` passes no arguments.
    pub args: Option<String>,
    /// Working directory of the child. `None` keeps the caller's.
    pub current_dir: Option<PathBuf>,
    /// Wait for the child to exit and collect its exit code.
    pub synchronous: bool,
    /// Start the child without a console window (Windows only).
    pub hide_window: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ConsoleOptions {
    pub args: Option<String>,
    pub current_dir: Option<PathBuf>,
    pub stdout: Redirect,
    pub stderr: Redirect,
}

/// Destination of a child's output stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Redirect {
    /// Share the caller's stream.
    #[default]
    Inherit,
    /// Throw the output away.
    Discard,
    /// Truncate or create the file and write into it.
    File(PathBuf),
}

impl Redirect {
    /// Maps an optional file name: absent inherits, empty discards, anything else is a file.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => Redirect::Inherit,
            Some("") => Redirect::Discard,
            Some(path) => Redirect::File(PathBuf::from(path)),
        }
    }

    fn open(&self) -> std::io::Result<Stdio> {
        Ok(match self {
            Redirect::Inherit => Stdio::inherit(),
            Redirect::Discard => Stdio::null(),
            Redirect::File(path) => Stdio::from(File::create(path)?),
        })
    }
}

/// Outcome of a successful launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// Started without waiting.
    Detached,
    /// Ran to completion. The code is `None` if the host reported none (e.g. killed by a
    /// signal) or it could not be retrieved.
    Exited(Option<i32>),
}

impl Launch {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Launch::Detached => None,
            Launch::Exited(code) => *code,
        }
    }
}

/// Runs `app`. Fails only if the process cannot be started.
pub fn run_app<P: AsRef<Path>>(app: P, options: &AppOptions) -> Result<Launch> {
    let app = app.as_ref();
    let mut command = build_command(app, options.args.as_deref(), options.current_dir.as_deref());
    if options.hide_window {
        hide_window(&mut command);
    }

    let child = spawn(app, &mut command)?;
    if !options.synchronous {
        return Ok(Launch::Detached);
    }
    Ok(wait(child))
}

/// Runs a console program synchronously, redirecting its output as requested.
///
/// If `stdout` and `stderr` name the same file, both streams share one handle so their output
/// lands in write order. If a redirection target cannot be opened, nothing is started.
pub fn run_console_app<P: AsRef<Path>>(app: P, options: &ConsoleOptions) -> Result<Launch> {
    let app = app.as_ref();
    let (stdout, stderr) = open_redirects(&options.stdout, &options.stderr)?;

    let mut command = build_command(app, options.args.as_deref(), options.current_dir.as_deref());
    command.stdout(stdout).stderr(stderr);

    let child = spawn(app, &mut command)?;
    Ok(wait(child))
}

fn open_redirects(stdout: &Redirect, stderr: &Redirect) -> Result<(Stdio, Stdio)> {
    if let (Redirect::File(out_path), Redirect::File(err_path)) = (stdout, stderr) {
        if out_path.as_os_str() == err_path.as_os_str() {
            let file = File::create(out_path)?;
            let shared = file.try_clone()?;
            return Ok((Stdio::from(file), Stdio::from(shared)));
        }
    }
    // An already opened stdout target is closed when this returns early.
    let out = stdout.open()?;
    let err = stderr.open()?;
    Ok((out, err))
}

fn build_command(app: &Path, args: Option<&str>, current_dir: Option<&Path>) -> Command {
    let mut command = Command::new(app);
    if let Some(args) = args {
        push_args(&mut command, args);
    }
    if let Some(dir) = current_dir {
        command.current_dir(dir);
    }
    command
}

#[cfg(windows)]
fn push_args(command: &mut Command, args: &str) {
    use std::os::windows::process::CommandExt;

    command.raw_arg(args);
}

#[cfg(not(windows))]
fn push_args(command: &mut Command, args: &str) {
    command.args(args::split(args));
}

#[cfg(windows)]
fn hide_window(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    use windows_sys::Win32::System::Threading::CREATE_NO_WINDOW;

    command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_window(_command: &mut Command) {}

fn spawn(app: &Path, command: &mut Command) -> Result<Child> {
    trace!(?command, "starting process");
    command.spawn().map_err(|source| Error::Spawn {
        program: encoding::path_to_utf8(app),
        source,
    })
}

fn wait(mut child: Child) -> Launch {
    match child.wait() {
        Ok(status) => Launch::Exited(status.code()),
        Err(err) => {
            debug!(pid = child.id(), error = %err, "cannot collect exit status");
            Launch::Exited(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempdir::TempDir;

    fn setup_test_env() -> TempDir {
        TempDir::new("process_test").unwrap()
    }

    #[test]
    fn test_redirect_from_arg() {
        assert_eq!(Redirect::from_arg(None), Redirect::Inherit);
        assert_eq!(Redirect::from_arg(Some("")), Redirect::Discard);
        assert_eq!(
            Redirect::from_arg(Some("out.txt")),
            Redirect::File(PathBuf::from("out.txt"))
        );
    }

    #[test]
    fn test_launch_exit_code() {
        assert_eq!(Launch::Detached.exit_code(), None);
        assert_eq!(Launch::Exited(Some(0)).exit_code(), Some(0));
        assert_eq!(Launch::Exited(None).exit_code(), None);
    }

    #[test]
    fn test_missing_program_fails_to_start() {
        let temp_dir = setup_test_env();
        let missing = temp_dir.path().join("no-such-program");

        let result = run_app(&missing, &AppOptions::default());
        assert!(matches!(result, Err(Error::Spawn { .. })));

        let result = run_console_app(&missing, &ConsoleOptions::default());
        assert!(matches!(result, Err(Error::Spawn { .. })));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;

        fn sh(script: &str) -> Option<String> {
            Some(format!("-c '{script}'"))
        }

        #[test]
        fn test_run_app_synchronous_exit_code() -> Result<()> {
            let options = AppOptions {
                args: sh("exit 3"),
                synchronous: true,
                ..Default::default()
            };
            assert_eq!(run_app("sh", &options)?, Launch::Exited(Some(3)));

            Ok(())
        }

        #[test]
        fn test_run_app_exit_code_zero_is_reported() -> Result<()> {
            let options = AppOptions {
                args: sh("true"),
                synchronous: true,
                hide_window: true,
                ..Default::default()
            };
            assert_eq!(run_app("sh", &options)?.exit_code(), Some(0));

            Ok(())
        }

        #[test]
        fn test_run_app_asynchronous() -> Result<()> {
            let options = AppOptions {
                args: sh("exit 0"),
                ..Default::default()
            };
            assert_eq!(run_app("sh", &options)?, Launch::Detached);

            Ok(())
        }

        #[test]
        fn test_signal_termination_has_no_exit_code() -> Result<()> {
            let options = AppOptions {
                args: sh("kill -9 $$"),
                synchronous: true,
                ..Default::default()
            };
            assert_eq!(run_app("sh", &options)?, Launch::Exited(None));

            Ok(())
        }

        #[test]
        fn test_console_shared_redirect_target() -> Result<()> {
            let temp_dir = setup_test_env();
            let log = temp_dir.path().join("both.log");
            let options = ConsoleOptions {
                args: sh("echo out; echo err 1>&2; echo out2"),
                stdout: Redirect::File(log.clone()),
                stderr: Redirect::File(log.clone()),
                ..Default::default()
            };

            assert_eq!(
                run_console_app("sh", &options)?,
                Launch::Exited(Some(0))
            );
            assert_eq!(fs::read_to_string(&log)?, "out\nerr\nout2\n");

            Ok(())
        }

        #[test]
        fn test_console_separate_targets() -> Result<()> {
            let temp_dir = setup_test_env();
            let out = temp_dir.path().join("out.log");
            let err = temp_dir.path().join("err.log");
            fs::write(&out, b"stale content that must be truncated")?;

            let options = ConsoleOptions {
                args: sh("echo out; echo err 1>&2"),
                stdout: Redirect::File(out.clone()),
                stderr: Redirect::File(err.clone()),
                ..Default::default()
            };

            run_console_app("sh", &options)?;
            assert_eq!(fs::read_to_string(&out)?, "out\n");
            assert_eq!(fs::read_to_string(&err)?, "err\n");

            Ok(())
        }

        #[test]
        fn test_console_discard() -> Result<()> {
            let options = ConsoleOptions {
                args: sh("echo discarded; exit 4"),
                stdout: Redirect::Discard,
                stderr: Redirect::Discard,
                ..Default::default()
            };
            assert_eq!(run_console_app("sh", &options)?.exit_code(), Some(4));

            Ok(())
        }

        #[test]
        fn test_console_working_directory() -> Result<()> {
            let temp_dir = setup_test_env();
            let out = temp_dir.path().join("pwd.log");
            let options = ConsoleOptions {
                args: sh("pwd -P"),
                current_dir: Some(temp_dir.path().to_path_buf()),
                stdout: Redirect::File(out.clone()),
                ..Default::default()
            };

            run_console_app("sh", &options)?;
            let expected = temp_dir.path().canonicalize()?;
            assert_eq!(
                fs::read_to_string(&out)?.trim_end(),
                encoding::path_to_utf8(&expected)
            );

            Ok(())
        }

        #[test]
        fn test_console_unopenable_target_starts_nothing() {
            let temp_dir = setup_test_env();
            let marker = temp_dir.path().join("marker");
            let options = ConsoleOptions {
                args: Some(format!("-c 'touch {}'", marker.display())),
                stdout: Redirect::File(temp_dir.path().join("missing/out.log")),
                ..Default::default()
            };

            assert!(run_console_app("sh", &options).is_err());
            assert!(!marker.exists());
        }
    }

    #[cfg(windows)]
    mod windows {
        use super::*;

        #[test]
        fn test_run_app_synchronous_exit_code() -> Result<()> {
            let options = AppOptions {
                args: Some("/C \"exit 3\"".to_owned()),
                synchronous: true,
                hide_window: true,
                ..Default::default()
            };
            assert_eq!(
                run_app("cmd.exe", &options)?,
                Launch::Exited(Some(3))
            );

            Ok(())
        }

        #[test]
        fn test_console_shared_redirect_target() -> Result<()> {
            let temp_dir = setup_test_env();
            let log = temp_dir.path().join("both.log");
            let options = ConsoleOptions {
                args: Some("/C \"echo out& echo err 1>&2\"".to_owned()),
                stdout: Redirect::File(log.clone()),
                stderr: Redirect::File(log.clone()),
                ..Default::default()
            };

            run_console_app("cmd.exe", &options)?;
            let content = fs::read_to_string(&log)?;
            let out = content.find("out");
            let err = content.find("err");
            assert!(out.is_some() && err.is_some());
            assert!(out < err);

            Ok(())
        }
    }
}
