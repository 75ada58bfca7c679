//! Launch failures.
//!
//! Every failure to locate or start the target program maps to one of these
//! variants. Failures of the target itself are not errors; they show up as an
//! [`ExitOutcome`](crate::ExitOutcome).

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a target that could not be found or started.
pub const EXIT_NOT_FOUND: i32 = 127;
/// Exit code for a target that was found but could not be executed.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("target program not found: {}", .program.to_string_lossy())]
    ProgramNotFound { program: OsString },

    #[error("permission denied executing {}", .program.to_string_lossy())]
    PermissionDenied { program: OsString },

    #[error("target script missing: {}", .path.display())]
    ScriptMissing { path: PathBuf },

    #[error("working directory missing: {}", .path.display())]
    WorkingDirMissing { path: PathBuf },

    #[error("failed to start {}: {source}", .program.to_string_lossy())]
    Spawn {
        program: OsString,
        #[source]
        source: io::Error,
    },

    #[error("failed to collect target exit status: {0}")]
    Wait(#[source] io::Error),

    #[error("failed to set up process supervision: {0}")]
    Runtime(#[source] io::Error),
}

impl LaunchError {
    /// Map a spawn error to the matching variant.
    pub fn from_spawn(program: OsString, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::ProgramNotFound { program },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { program },
            _ => Self::Spawn {
                program,
                source: err,
            },
        }
    }

    /// Reserved process exit code, distinct from ordinary target failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PermissionDenied { .. } => EXIT_NOT_EXECUTABLE,
            _ => EXIT_NOT_FOUND,
        }
    }
}
