use crate::config::{validate_env_name, validate_version_tag, Settings};
use crate::core::error::{Result, ZapError};
use crate::python::locator::select;
use crate::python::{InterpreterLocator, StdlibVenv};
use crate::store::EnvironmentStore;
use colored::Colorize;

pub async fn execute(settings: &Settings, version: Option<String>, name: String) -> Result<()> {
    let version = pick_version(version, settings.default_version())?;
    validate_version_tag(&version)?;
    validate_env_name(&name)?;

    let interpreters = InterpreterLocator::new().discover().await?;
    let interpreter = select(&interpreters, &version)?;

    let store = EnvironmentStore::new(settings.root());
    println!(
        "{} Creating {} at {} using {}",
        "⚙".blue().bold(),
        name.cyan(),
        store.path_for(&version, &name).display().to_string().yellow(),
        interpreter.executable.display()
    );

    let environment = store
        .create(&StdlibVenv, interpreter, &version, &name)
        .await?;

    println!(
        "{} Environment {} created (Python {})",
        "✓".green().bold(),
        environment.name.cyan(),
        environment.version.yellow()
    );
    println!(
        "Activate it with {}",
        format!("zap activate {} --version {}", environment.name, environment.version).cyan()
    );

    Ok(())
}

fn pick_version(explicit: Option<String>, default: Option<&str>) -> Result<String> {
    explicit
        .or_else(|| default.map(str::to_string))
        .ok_or(ZapError::NoDefaultVersion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_version_wins_over_default() {
        assert_eq!(
            pick_version(Some("3.11".to_string()), Some("3.12")).unwrap(),
            "3.11"
        );
        assert_eq!(pick_version(None, Some("3.12")).unwrap(), "3.12");
    }

    #[test]
    fn missing_version_and_default_is_not_found() {
        let err = pick_version(None, None).unwrap_err();
        assert!(matches!(err, ZapError::NoDefaultVersion));
    }
}
