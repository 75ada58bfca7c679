//! Relaying termination signals from the launcher to its child.

use std::io;
use tokio::process::Child;

/// A signal caught by the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Caught {
    pub signum: i32,
    pub name: &'static str,
}

#[cfg(unix)]
pub(crate) struct Forwarder {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
    hangup: tokio::signal::unix::Signal,
    quit: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Forwarder {
    /// Replace the default disposition of SIGINT, SIGTERM, SIGHUP and SIGQUIT
    /// so the launcher outlives them and can relay them.
    pub(crate) fn install() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            hangup: signal(SignalKind::hangup())?,
            quit: signal(SignalKind::quit())?,
        })
    }

    pub(crate) async fn recv(&mut self) -> Caught {
        tokio::select! {
            _ = self.interrupt.recv() => Caught { signum: libc::SIGINT, name: "SIGINT" },
            _ = self.terminate.recv() => Caught { signum: libc::SIGTERM, name: "SIGTERM" },
            _ = self.hangup.recv() => Caught { signum: libc::SIGHUP, name: "SIGHUP" },
            _ = self.quit.recv() => Caught { signum: libc::SIGQUIT, name: "SIGQUIT" },
        }
    }

    /// Relay `caught` to the child. Returns `false` when the child is
    /// already reaped.
    ///
    /// Every caught signal is relayed, whatever its origin, so a terminal ^C
    /// reaches a foreground child twice.
    pub(crate) fn forward(&self, child: &mut Child, caught: Caught) -> io::Result<bool> {
        let Some(pid) = child.id() else {
            return Ok(false);
        };
        // SAFETY: kill(2) has no memory-safety preconditions.
        let rc = unsafe { libc::kill(pid as libc::pid_t, caught.signum) };
        if rc == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(true)
    }
}

#[cfg(not(unix))]
pub(crate) struct Forwarder;

#[cfg(not(unix))]
impl Forwarder {
    pub(crate) fn install() -> io::Result<Self> {
        Ok(Self)
    }

    pub(crate) async fn recv(&mut self) -> Caught {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        Caught {
            signum: 2,
            name: "CTRL_C",
        }
    }

    pub(crate) fn forward(&self, child: &mut Child, _caught: Caught) -> io::Result<bool> {
        child.start_kill()?;
        Ok(true)
    }
}
