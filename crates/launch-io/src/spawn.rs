use crate::error::LaunchError;
use crate::exit::ExitOutcome;
use crate::signals::Forwarder;
use crate::target::TargetProgram;
use env_spine::EnvSnapshot;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Start `target` with exactly the variables in `env` and wait for it.
///
/// Runs on a current-thread runtime; the launcher never does more than wait
/// on one child and relay signals to it.
pub fn launch(target: &TargetProgram, env: &EnvSnapshot) -> Result<ExitOutcome, LaunchError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(LaunchError::Runtime)?;
    runtime.block_on(run_target(target, env))
}

async fn run_target(
    target: &TargetProgram,
    env: &EnvSnapshot,
) -> Result<ExitOutcome, LaunchError> {
    target.preflight()?;

    let mut command = Command::new(&target.program);
    command
        .args(target.argv())
        .env_clear()
        .envs(env.iter())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);
    if let Some(dir) = target.working_dir() {
        command.current_dir(dir);
    }

    // Handlers go in before the child exists so no signal can slip past.
    let mut signals = Forwarder::install().map_err(LaunchError::Runtime)?;

    let mut child = command
        .spawn()
        .map_err(|err| LaunchError::from_spawn(target.program.clone(), err))?;
    info!(
        pid = child.id(),
        command = %target.display_command(),
        "Target started"
    );

    loop {
        tokio::select! {
            status = child.wait() => {
                let outcome = ExitOutcome::from(status.map_err(LaunchError::Wait)?);
                debug!(?outcome, "Target terminated");
                return Ok(outcome);
            }
            caught = signals.recv() => {
                match signals.forward(&mut child, caught) {
                    Ok(true) => info!(signal = caught.name, "Forwarded signal to target"),
                    Ok(false) => debug!(signal = caught.name, "Target already exited; signal not forwarded"),
                    Err(e) => warn!(signal = caught.name, error = %e, "Failed to forward signal"),
                }
            }
        }
    }
}
