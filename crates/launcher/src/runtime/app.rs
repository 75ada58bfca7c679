use crate::infra::audit::{AuditEventType, AuditLogger};
use crate::infra::redact::redact_config;
use crate::runtime::config::RuntimeConfig;
use crate::runtime::logging::init_tracing;
use env_spine::{ConfigSet, EnvSnapshot};
use launch_io::launch;
use std::path::Path;
use tracing::{error, info, warn};

pub fn run_from_env() -> i32 {
    let env = EnvSnapshot::capture();
    let args: Vec<String> = std::env::args().collect();
    run(RuntimeConfig::from_snapshot(&env, &args), &env)
}

/// Fill in missing configuration, start the target and return the exit code
/// the launcher should terminate with.
pub fn run(config: RuntimeConfig, env: &EnvSnapshot) -> i32 {
    init_tracing(config.json_logs);

    if !config.ignored_args.is_empty() {
        warn!(args = ?config.ignored_args, "run takes no arguments; ignoring them");
    }

    let settings = ConfigSet::resolve(env);
    let shown = redact_config(&settings);
    for entry in shown.entries() {
        info!(
            key = %entry.key,
            value = %entry.value.to_string_lossy(),
            source = ?entry.source,
            "Configuration resolved"
        );
    }
    let child_env = env.with_config(&settings);

    let mut audit = init_audit_logger(config.audit_path.as_deref());
    record(
        &mut audit,
        AuditEventType::LaunchStarted,
        serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "program": config.target.program.to_string_lossy(),
            "script": config.target.script.as_ref().map(|s| s.display().to_string()),
            "command": config.target.display_command(),
            "configuration": shown,
        }),
    );

    match launch(&config.target, &child_env) {
        Ok(outcome) => {
            info!(
                code = outcome.code(),
                signal = outcome.signal(),
                "Target exited"
            );
            record(
                &mut audit,
                AuditEventType::TargetExited,
                serde_json::json!({
                    "code": outcome.code(),
                    "signal": outcome.signal(),
                }),
            );
            outcome.code()
        }
        Err(e) => {
            error!(error = %e, command = %config.target.display_command(), "Launch failed");
            record(
                &mut audit,
                AuditEventType::LaunchFailed,
                serde_json::json!({
                    "error": e.to_string(),
                    "exit_code": e.exit_code(),
                }),
            );
            e.exit_code()
        }
    }
}

fn init_audit_logger(audit_path: Option<&Path>) -> Option<AuditLogger> {
    audit_path.and_then(|path| match AuditLogger::new(path) {
        Ok(logger) => {
            info!(path = %path.display(), "Audit logging enabled");
            Some(logger)
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Failed to initialize audit logger; continuing without it");
            None
        }
    })
}

fn record(audit: &mut Option<AuditLogger>, event_type: AuditEventType, details: serde_json::Value) {
    if let Some(logger) = audit {
        if let Err(e) = logger.log_event(event_type, details) {
            warn!(error = %e, ?event_type, "Failed to write audit entry");
        }
    }
}
