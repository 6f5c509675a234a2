use crate::core::error::Result;
use crate::python::ShellKind;
use colored::Colorize;
use std::path::PathBuf;

pub fn execute() -> Result<()> {
    let Some(active) = std::env::var_os("VIRTUAL_ENV").filter(|v| !v.is_empty()) else {
        eprintln!("{}", "No active virtual environment detected".yellow());
        return Ok(());
    };

    let active = PathBuf::from(active);
    let name = active
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| active.display().to_string());

    eprintln!("{} Active environment: {}", "ℹ".blue().bold(), name.cyan());
    println!("{}", ShellKind::detect().deactivation_command());

    Ok(())
}
