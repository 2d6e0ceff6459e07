//! Walks through a directory round trip and a child process inside a scratch directory.
//!
//! Run with `RUST_LOG=hostfs_kit=debug cargo run --example acceptance` to see failures
//! the boolean API swallows.

use anyhow::{Result, bail};
use hostfs_kit::process::{self, AppOptions, ConsoleOptions, Redirect};
use hostfs_kit::{directory, file, path};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    #[cfg(windows)]
    println!("{}", path::expand("%windir%\\test.txt"));
    #[cfg(not(windows))]
    println!("{}", path::expand("$HOME/test.txt"));

    let scratch = tempdir::TempDir::new("hostfs_acceptance")?;
    let start = path::current_directory();
    if !path::set_current_directory(scratch.path()) {
        bail!("cannot enter {}", scratch.path().display());
    }
    println!("working in {}", path::current_directory());

    let outcome = round_trip();
    path::set_current_directory(&start);
    outcome?;

    println!("{}", path::set_extension(r"C:\Test.txt", "a"));
    println!("is_relative(\"a/b\") = {}", path::is_relative("a/b"));
    println!("extension = {}", path::extension(r"C:\autoexec.bat"));

    run_child(&scratch)?;
    Ok(())
}

fn round_trip() -> Result<()> {
    if !directory::create("testdir", false) {
        bail!("cannot create testdir");
    }
    if !path::set_current_directory("testdir") {
        bail!("cannot enter testdir");
    }
    println!("inside {}", path::current_directory());

    if !directory::create("testdir2", true) {
        println!("testdir2 created without the hidden attribute");
    }
    println!("hidden: {}", path::is_hidden("testdir2"));

    let here = path::current_directory();
    if !path::set_current_directory(path::parent(".")) {
        bail!("cannot leave {here}");
    }
    if !directory::delete(path::name(&here)) {
        bail!("cannot delete {here}");
    }
    println!("removed {}", path::name(&here));
    Ok(())
}

fn run_child(scratch: &tempdir::TempDir) -> Result<()> {
    let log = scratch.path().join("child.log");

    #[cfg(windows)]
    let (app, args) = ("cmd.exe", "/C \"echo hello from the child\"");
    #[cfg(not(windows))]
    let (app, args) = ("sh", "-c 'echo hello from the child'");

    let options = ConsoleOptions {
        args: Some(args.to_owned()),
        stdout: Redirect::File(log.clone()),
        stderr: Redirect::File(log.clone()),
        ..Default::default()
    };
    let launch = process::run_console_app(app, &options)?;
    println!(
        "child exited with {:?}, wrote {} bytes",
        launch.exit_code(),
        file::size(&log)
    );

    let detached = process::run_app(
        app,
        &AppOptions {
            args: Some(args.to_owned()),
            hide_window: true,
            ..Default::default()
        },
    )?;
    println!("second child: {detached:?}");
    Ok(())
}
