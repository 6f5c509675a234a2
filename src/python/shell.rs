use crate::core::error::{Result, ZapError};
use crate::python::activation::{bin_dir, ShellKind};
use crate::store::Environment;
use colored::Colorize;
use std::ffi::OsString;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Starts an interactive shell with an environment applied and waits for it to exit.
pub struct ShellLauncher<'a> {
    environment: &'a Environment,
    kind: ShellKind,
}

impl<'a> ShellLauncher<'a> {
    pub fn new(environment: &'a Environment, kind: ShellKind) -> Self {
        Self { environment, kind }
    }

    /// Returns the child's exit code.
    pub async fn spawn(&self) -> Result<i32> {
        if !self.environment.path.exists() {
            return Err(ZapError::EnvironmentNotFound {
                name: self.environment.name.clone(),
                version: Some(self.environment.version.clone()),
            });
        }

        let mut command = self.command()?;

        eprintln!(
            "{} Entering {} (Python {})",
            "→".blue().bold(),
            self.environment.name.cyan(),
            self.environment.version.yellow()
        );
        eprintln!("  Type {} to leave", "exit".yellow());
        eprintln!();

        let status = command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ZapError::CommandFailed(format!("Failed to spawn shell: {}", e)))?;

        debug!("Shell exited with {}", status);
        Ok(status.code().unwrap_or(1))
    }

    fn command(&self) -> Result<Command> {
        let env_dir = &self.environment.path;
        let activation = self.kind.activation_command(env_dir);

        let command = match self.kind {
            ShellKind::PowerShell if cfg!(windows) => {
                let mut command = Command::new("powershell");
                command.args(["-NoExit", "-Command", activation.as_str()]);
                command
            }
            ShellKind::Cmd => {
                let mut command = Command::new("cmd");
                command.args(["/K", activation.as_str()]);
                command
            }
            _ => {
                let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/bash".to_string());
                let mut command = Command::new(shell);
                command
                    .env("VIRTUAL_ENV", env_dir)
                    .env("VIRTUAL_ENV_PROMPT", &self.environment.name)
                    .env("PATH", self.search_path()?)
                    .env_remove("PYTHONHOME");
                if self.kind == ShellKind::Posix {
                    command.env("PS1", format!("({}) $ ", self.environment.name));
                }
                command
            }
        };

        Ok(command)
    }

    fn search_path(&self) -> Result<OsString> {
        let mut paths = vec![bin_dir(&self.environment.path)];
        if let Some(original) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&original));
        }
        std::env::join_paths(paths)
            .map_err(|e| ZapError::CommandFailed(format!("Cannot build PATH: {}", e)))
    }
}
