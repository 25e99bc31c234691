//! Fallback execution: unrecognized command strings are handed verbatim to
//! the OS shell, run in the session's current directory, with a wall-clock
//! timeout. The string is not sanitized; raw passthrough is the contract.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::error::{TermError, TermResult};
use crate::models::CommandResult;

pub async fn run_fallback(
    command: &str,
    cwd: &Path,
    timeout: Duration,
) -> TermResult<CommandResult> {
    let verb = command
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();

    let mut cmd = shell_command(command);
    cmd.current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        // dropping the wait future on timeout must also kill the child
        .kill_on_drop(true);

    debug!(command = command, cwd = %cwd.display(), "Spawning fallback shell command");

    let child = cmd
        .spawn()
        .map_err(|_| TermError::CommandNotFound(verb.clone()))?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(CommandResult::from_streams(
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
            output.status.code().unwrap_or(1),
        )),
        Ok(Err(_)) => Err(TermError::CommandNotFound(verb)),
        Err(_) => Err(TermError::CommandTimeout),
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fallback_captures_stdout() {
        let tmp = tempfile::tempdir().unwrap();
        let result = run_fallback("echo hello", tmp.path(), Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(result.output.trim(), "hello");
        assert!(result.error.is_empty());
        assert_eq!(result.exit_code, 0);
    }

    #[tokio::test]
    async fn test_fallback_runs_in_session_directory() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("marker.txt"), b"here").unwrap();

        let result = run_fallback("cat marker.txt", tmp.path(), Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(result.output, "here");
    }

    #[tokio::test]
    async fn test_fallback_preserves_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let result = run_fallback("exit 3", tmp.path(), Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(result.exit_code, 3);
    }

    #[tokio::test]
    async fn test_fallback_timeout() {
        let tmp = tempfile::tempdir().unwrap();
        let start = std::time::Instant::now();
        let err = run_fallback("sleep 30", tmp.path(), Duration::from_millis(200))
            .await
            .unwrap_err();

        assert!(matches!(err, TermError::CommandTimeout));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_fallback_captures_stderr() {
        let tmp = tempfile::tempdir().unwrap();
        let result = run_fallback("definitely-not-a-command", tmp.path(), Duration::from_secs(10))
            .await
            .unwrap();

        assert!(!result.error.is_empty());
        assert_ne!(result.exit_code, 0);
    }
}
