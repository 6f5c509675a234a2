use crate::core::error::{Result, ZapError};
use std::ffi::OsStr;
use std::process::Output;
use tokio::process::Command;

pub struct ProcessExecutor;

impl ProcessExecutor {
    pub async fn execute<S: AsRef<OsStr>>(cmd: impl AsRef<OsStr>, args: &[S]) -> Result<Output> {
        let cmd = cmd.as_ref();
        let output = Command::new(cmd)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                ZapError::CommandFailed(format!("{}: {}", cmd.to_string_lossy(), e))
            })?;

        Ok(output)
    }

    pub async fn execute_with_output<S: AsRef<OsStr>>(
        cmd: impl AsRef<OsStr>,
        args: &[S],
    ) -> Result<String> {
        let cmd = cmd.as_ref();
        let output = Self::execute(cmd, args).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ZapError::CommandFailed(format!(
                "{} failed: {}",
                cmd.to_string_lossy(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Combined stdout and stderr of a finished process, trimmed.
    pub fn combined_output(output: &Output) -> String {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut text = stdout.trim().to_string();
        if !stderr.trim().is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(stderr.trim());
        }
        text
    }
}
