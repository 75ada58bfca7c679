use crate::error::LaunchError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROGRAM: &str = "python3";
pub const DEFAULT_SCRIPT: &str = "app.py";

/// The program the launcher hands off to.
///
/// The command line is `program [script] args...`. A relative script path is
/// resolved against `working_dir` when one is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProgram {
    pub program: OsString,
    pub script: Option<PathBuf>,
    pub args: Vec<OsString>,
    pub working_dir: Option<PathBuf>,
}

impl Default for TargetProgram {
    fn default() -> Self {
        Self {
            program: OsString::from(DEFAULT_PROGRAM),
            script: Some(PathBuf::from(DEFAULT_SCRIPT)),
            args: Vec::new(),
            working_dir: None,
        }
    }
}

impl TargetProgram {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            script: None,
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Script path as the child will see it.
    pub fn script_path(&self) -> Option<PathBuf> {
        let script = self.script.as_deref()?;
        Some(match &self.working_dir {
            Some(dir) if script.is_relative() => dir.join(script),
            _ => script.to_path_buf(),
        })
    }

    /// Check what can be checked before spawning: a configured working
    /// directory must be a directory, a configured script a regular file.
    pub fn preflight(&self) -> Result<(), LaunchError> {
        if let Some(dir) = self.working_dir() {
            if !dir.is_dir() {
                return Err(LaunchError::WorkingDirMissing {
                    path: dir.to_path_buf(),
                });
            }
        }
        if let Some(path) = self.script_path() {
            if !path.is_file() {
                return Err(LaunchError::ScriptMissing { path });
            }
        }
        Ok(())
    }

    /// Arguments after the program name.
    pub fn argv(&self) -> Vec<OsString> {
        self.script
            .iter()
            .map(|script| script.as_os_str().to_os_string())
            .chain(self.args.iter().cloned())
            .collect()
    }

    pub fn display_command(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.script.iter().map(|s| s.as_os_str()))
            .chain(self.args.iter().map(|a| a.as_os_str()))
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }
}
