use crate::config::Settings;
use crate::core::error::Result;
use crate::core::exit_code;
use crate::python::{ShellKind, ShellLauncher};
use crate::resolve::{resolve, Prompter};
use crate::store::EnvironmentStore;
use colored::Colorize;
use std::io::Write;

/// Writes the activation command to `out`, or runs an activated shell and returns its
/// exit code. Status lines go to stderr so the output can be `eval`ed.
pub async fn execute<P: Prompter, W: Write>(
    settings: &Settings,
    prompter: &mut P,
    out: &mut W,
    name: String,
    version: Option<String>,
    shell: bool,
) -> Result<i32> {
    let store = EnvironmentStore::new(settings.root());
    let environment = resolve(&store, &name, version.as_deref(), prompter, "activate").await?;

    eprintln!(
        "{} Using Python {} environment {}",
        "ℹ".blue().bold(),
        environment.version.yellow(),
        environment.name.cyan()
    );

    let kind = ShellKind::detect();
    if shell {
        return ShellLauncher::new(&environment, kind).spawn().await;
    }

    writeln!(out, "{}", kind.activation_command(&environment.path))?;
    out.flush()?;
    Ok(exit_code::SUCCESS)
}
