use crate::core::error::{Result, ZapError};
use crate::core::ProcessExecutor;
use crate::python::locator::Interpreter;
use crate::python::version::release;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Marker file every virtual environment carries at its top level.
pub const VENV_MARKER: &str = "pyvenv.cfg";

/// The host facility that populates a directory with a virtual environment.
pub trait VenvCreator {
    fn create(&self, target: &Path, interpreter: &Interpreter) -> impl Future<Output = Result<()>>;
}

/// `python -m venv`, the standard library's environment builder.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdlibVenv;

impl StdlibVenv {
    fn args(target: &Path, interpreter: &Interpreter) -> Vec<String> {
        let mut args = vec!["-m".to_string(), "venv".to_string()];
        if supports_upgrade_deps(&interpreter.version) {
            args.push("--upgrade-deps".to_string());
        }
        args.push(target.to_string_lossy().to_string());
        args
    }
}

impl VenvCreator for StdlibVenv {
    async fn create(&self, target: &Path, interpreter: &Interpreter) -> Result<()> {
        let args = Self::args(target, interpreter);
        debug!(
            "Running {} {}",
            interpreter.executable.display(),
            args.join(" ")
        );

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("Invalid spinner template"),
        );
        spinner.set_message(format!("Running {} -m venv", interpreter.executable.display()));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = ProcessExecutor::execute(&interpreter.executable, &args).await;
        spinner.finish_and_clear();

        let output = result.map_err(|e| ZapError::Creation(e.to_string()))?;
        if !output.status.success() {
            let detail = ProcessExecutor::combined_output(&output);
            return Err(ZapError::Creation(if detail.is_empty() {
                format!(
                    "{} -m venv exited with {}",
                    interpreter.executable.display(),
                    output.status
                )
            } else {
                detail
            }));
        }

        Ok(())
    }
}

fn supports_upgrade_deps(version: &str) -> bool {
    release(version).is_some_and(|r| r >= (3, 12))
}
