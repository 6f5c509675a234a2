use crate::config::Settings;
use crate::core::error::{Result, ZapError};
use crate::resolve::{confirm, resolve, Prompter};
use crate::store::EnvironmentStore;
use colored::Colorize;

pub async fn execute<P: Prompter>(
    settings: &Settings,
    prompter: &mut P,
    name: String,
    version: Option<String>,
    yes: bool,
) -> Result<()> {
    let store = EnvironmentStore::new(settings.root());
    let environment = resolve(&store, &name, version.as_deref(), prompter, "delete").await?;

    if !yes {
        let question = format!("Delete {}? [y/N]", environment.path.display());
        if !confirm(prompter, &question).await? {
            return Err(ZapError::Cancelled);
        }
    }

    store.delete(&environment).await?;

    println!(
        "{} Removed {} (Python {})",
        "✓".green().bold(),
        environment.name.cyan(),
        environment.version.yellow()
    );

    Ok(())
}
