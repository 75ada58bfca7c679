//! The launcher as the foreground job of its own terminal, interrupted by
//! another process rather than by ^C.
#![cfg(target_os = "linux")]

use std::fs::{self, File};
use std::io::{self, Read};
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn open_pty() -> (OwnedFd, OwnedFd) {
    let mut master = -1;
    let mut slave = -1;
    // SAFETY: the out-pointers are valid; name, termios and winsize may be null.
    let rc = unsafe {
        libc::openpty(
            &mut master,
            &mut slave,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            std::ptr::null_mut(),
        )
    };
    assert_eq!(rc, 0, "openpty failed: {}", io::Error::last_os_error());
    // SAFETY: openpty returned two fresh descriptors owned by nobody else.
    unsafe { (OwnedFd::from_raw_fd(master), OwnedFd::from_raw_fd(slave)) }
}

#[test]
fn sigint_from_another_process_reaches_the_target() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("app.sh"),
        "trap 'exit 42' INT\n: > ready\nwhile :; do sleep 0.1; done\n",
    )
    .unwrap();

    let (master, slave) = open_pty();
    let mut command = Command::new(env!("CARGO_BIN_EXE_run"));
    command
        .env_clear()
        .env("PATH", std::env::var_os("PATH").unwrap_or_else(|| "/usr/bin:/bin".into()))
        .env("LAUNCHER_PROGRAM", "sh")
        .env("LAUNCHER_SCRIPT", "app.sh")
        .env("LAUNCHER_WORKDIR", dir.path())
        .env("RUST_LOG", "error")
        .stdin(Stdio::from(slave.try_clone().unwrap()))
        .stdout(Stdio::from(slave.try_clone().unwrap()))
        .stderr(Stdio::from(slave));
    // SAFETY: only async-signal-safe calls between fork and exec.
    unsafe {
        command.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(io::Error::last_os_error());
            }
            if libc::ioctl(libc::STDIN_FILENO, libc::TIOCSCTTY as _, 0) == -1 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }
    let mut child = command.spawn().expect("Failed to start launcher on a pty");
    drop(command);

    let master = File::from(master);
    let mut drain = master.try_clone().unwrap();
    thread::spawn(move || {
        let mut buf = [0u8; 1024];
        while let Ok(n) = drain.read(&mut buf) {
            if n == 0 {
                break;
            }
        }
    });

    let ready = dir.path().join("ready");
    let start = Instant::now();
    while !ready.exists() {
        if start.elapsed() > Duration::from_secs(10) {
            let _ = child.kill();
            panic!("target never became ready");
        }
        thread::sleep(Duration::from_millis(20));
    }

    // SAFETY: tcgetpgrp only queries the terminal.
    let foreground = unsafe { libc::tcgetpgrp(master.as_raw_fd()) };
    assert_eq!(foreground, child.id() as libc::pid_t, "launcher is not the foreground job");

    // SAFETY: kill(2) has no memory-safety preconditions.
    let rc = unsafe { libc::kill(child.id() as libc::pid_t, libc::SIGINT) };
    assert_eq!(rc, 0);

    let start = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break status;
        }
        if start.elapsed() > Duration::from_secs(10) {
            let _ = child.kill();
            panic!("launcher kept running after SIGINT");
        }
        thread::sleep(Duration::from_millis(20));
    };
    assert_eq!(status.code(), Some(42));
}
