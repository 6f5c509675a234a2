use crate::config::{validate_version_tag, GlobalConfigManager};
use crate::core::error::Result;
use crate::python::InterpreterLocator;
use colored::Colorize;
use tracing::warn;

pub async fn execute(config_mgr: &GlobalConfigManager, version: String) -> Result<()> {
    validate_version_tag(&version)?;

    let interpreters = InterpreterLocator::new().discover().await?;
    if !interpreters.iter().any(|i| i.version == version) {
        warn!(
            "Python {} is not installed right now; `zap create` will fail until it is",
            version
        );
    }

    config_mgr.set_default_version(&version).await?;

    println!(
        "{} Default Python version set to {} ({})",
        "✓".green().bold(),
        version.cyan(),
        config_mgr.config_path().display()
    );

    Ok(())
}
