//! # hubctl-sandbox
//!
//! Runs service control scripts under a fixed privileged identity.
//!
//! Provides [`privileged_command`] which wraps a program in
//! `sudo -n -u <identity>`, and [`SudoExecutor`] which implements
//! [`ScriptExecutor`] on top of it. `-n` makes sudo fail instead of waiting
//! for a password nobody will type.

use async_trait::async_trait;
use hubctl_core::{error::HubError, traits::ScriptExecutor};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Build a [`Command`] that runs `program` as `run_as` through sudo.
pub fn privileged_command(program: &str, run_as: &str) -> Command {
    let mut cmd = Command::new("sudo");
    cmd.arg("-n").arg("-u").arg(run_as).arg(program);
    cmd
}

/// Compose a script path the way the state document expects:
/// the prefix followed directly by the script name.
pub fn script_path(path: &str, script: &str) -> String {
    format!("{path}{script}")
}

/// Run a prepared command to completion, discarding its output.
///
/// Launch failures and non-zero exits both become [`HubError::Execution`].
pub async fn run_to_completion(mut cmd: Command, label: &str) -> Result<(), HubError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = cmd
        .output()
        .await
        .map_err(|e| HubError::Execution(format!("failed to launch {label}: {e}")))?;

    if output.status.success() {
        debug!("{label} exited successfully");
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    warn!("{label} failed with {}: {stderr}", output.status);
    Err(HubError::Execution(format!(
        "{label} exited with {}",
        output.status
    )))
}

/// Script executor that escalates through sudo.
#[derive(Debug, Clone)]
pub struct SudoExecutor {
    run_as: String,
}

impl SudoExecutor {
    pub fn new(run_as: impl Into<String>) -> Self {
        Self {
            run_as: run_as.into(),
        }
    }
}

#[async_trait]
impl ScriptExecutor for SudoExecutor {
    async fn run(&self, path: &str, script: &str) -> Result<(), HubError> {
        let program = script_path(path, script);
        info!("running {program} as {}", self.run_as);
        run_to_completion(privileged_command(&program, &self.run_as), &program).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privileged_command_shape() {
        let cmd = privileged_command("/srv/web/start.sh", "root");
        let std = cmd.as_std();
        assert_eq!(std.get_program().to_string_lossy(), "sudo");
        let args: Vec<String> = std
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert_eq!(args, vec!["-n", "-u", "root", "/srv/web/start.sh"]);
    }

    #[test]
    fn test_script_path_inserts_no_separator() {
        assert_eq!(script_path("/srv/web/", "stop.sh"), "/srv/web/stop.sh");
        assert_eq!(script_path("/srv/web", "stop.sh"), "/srv/webstop.sh");
    }

    #[tokio::test]
    async fn test_run_success() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("exit 0");
        assert!(run_to_completion(cmd, "ok").await.is_ok());
    }

    #[tokio::test]
    async fn test_run_nonzero_exit_is_error() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo nope >&2; exit 3");
        let err = run_to_completion(cmd, "bad").await.unwrap_err();
        assert!(matches!(err, HubError::Execution(_)));
    }

    #[tokio::test]
    async fn test_run_missing_program_is_error() {
        let cmd = Command::new("/nonexistent/__hubctl__/start.sh");
        let err = run_to_completion(cmd, "missing").await.unwrap_err();
        assert!(err.to_string().contains("failed to launch"));
    }
}
