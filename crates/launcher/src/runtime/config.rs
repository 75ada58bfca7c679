use env_spine::EnvSnapshot;
use launch_io::TargetProgram;
use std::ffi::OsStr;
use std::path::PathBuf;

pub const PROGRAM_VAR: &str = "LAUNCHER_PROGRAM";
pub const SCRIPT_VAR: &str = "LAUNCHER_SCRIPT";
pub const WORKDIR_VAR: &str = "LAUNCHER_WORKDIR";
pub const JSON_LOGS_VAR: &str = "LAUNCHER_JSON_LOGS";
pub const AUDIT_LOG_VAR: &str = "LAUNCHER_AUDIT_LOG";

/// The launcher's own settings. `run` takes no arguments, so these come
/// from `LAUNCHER_*` variables; they reach the target unchanged like any
/// other unrelated variable.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub target: TargetProgram,
    pub json_logs: bool,
    pub audit_path: Option<PathBuf>,
    /// Command-line arguments, which are accepted and ignored.
    pub ignored_args: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            target: TargetProgram::default(),
            json_logs: false,
            audit_path: None,
            ignored_args: Vec::new(),
        }
    }
}

impl RuntimeConfig {
    /// `args` is the full argv, program name first.
    pub fn from_snapshot(env: &EnvSnapshot, args: &[String]) -> Self {
        let mut cfg = RuntimeConfig::default();

        if let Some(program) = non_empty(env, PROGRAM_VAR) {
            cfg.target.program = program.to_os_string();
        }
        // Present but empty disables the script argument.
        if let Some(script) = env.get(SCRIPT_VAR) {
            cfg.target.script = (!script.is_empty()).then(|| PathBuf::from(script));
        }
        if let Some(dir) = non_empty(env, WORKDIR_VAR) {
            cfg.target.working_dir = Some(PathBuf::from(dir));
        }
        cfg.json_logs = env
            .get_lossy(JSON_LOGS_VAR)
            .map(|val| matches!(val.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        cfg.audit_path = non_empty(env, AUDIT_LOG_VAR).map(PathBuf::from);
        cfg.ignored_args = args.iter().skip(1).cloned().collect();
        cfg
    }
}

fn non_empty<'a>(env: &'a EnvSnapshot, name: &str) -> Option<&'a OsStr> {
    env.get(name).filter(|value| !value.is_empty())
}
