pub mod commands;

use crate::config::{GlobalConfigManager, Settings};
use crate::core::error::Result;
use crate::core::exit_code;
use crate::resolve::TerminalPrompter;
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "zap",
    version,
    about = "Light-weight manager for named Python virtual environments",
    long_about = "Light-weight manager for named Python virtual environments.\n\n\
        Environments live in {root}/{version}/{name}. The root is $ENV_ROOT, the `root` key of \
        the global config file, or ~/venvs (C:\\venvs on Windows).",
    after_help = "Examples:\n  \
        zap create 3.11 myenv\n  \
        zap activate myenv --shell\n  \
        zap activate myenv --version 3.11\n  \
        zap delete myenv -y\n\n\
        Exit codes: 0 ok, 1 operation failed, 2 usage, 3 not found, 4 invalid selection, \
        5 cancelled, 70 internal error"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available Python interpreters and created environments
    List,

    /// Create a new environment with the given Python version tag
    Create {
        /// Python version tag (e.g., 3.11, 3.12-arm64); optional when a default is set
        #[arg(value_name = "VERSION")]
        first: String,

        /// Environment name
        #[arg(value_name = "NAME")]
        second: Option<String>,
    },

    /// Print the activation command, or start an activated shell with --shell
    Activate {
        /// Environment name
        name: String,

        /// Python version of the environment (e.g., 3.11, 3.12-arm64)
        #[arg(short, long)]
        version: Option<String>,

        /// Spawn a new shell with the environment already activated
        #[arg(long)]
        shell: bool,
    },

    /// Delete an environment
    Delete {
        /// Environment name
        name: String,

        /// Python version of the environment (e.g., 3.11, 3.12-arm64)
        #[arg(short, long)]
        version: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the command that deactivates the current environment
    Deactivate,

    /// Set the default Python version used by `create`
    #[command(name = "set-default")]
    SetDefault {
        /// Python version tag (e.g., 3.11, 3.12-arm64)
        version: String,
    },
}

/// Runs one command and returns the process exit code.
pub async fn run(cli: Cli) -> Result<i32> {
    let config_mgr = GlobalConfigManager::new()?;
    let settings = Settings::load(&config_mgr).await;
    debug!(
        "Root {} ({:?})",
        settings.root().display(),
        settings.root_source()
    );

    match cli.command {
        Commands::List => commands::list::execute(&settings).await?,

        Commands::Create { first, second } => {
            let (version, name) = match second {
                Some(name) => (Some(first), name),
                None => (None, first),
            };
            commands::create::execute(&settings, version, name).await?
        }

        Commands::Activate {
            name,
            version,
            shell,
        } => {
            return commands::activate::execute(
                &settings,
                &mut TerminalPrompter,
                &mut std::io::stdout(),
                name,
                version,
                shell,
            )
            .await
        }

        Commands::Delete { name, version, yes } => {
            commands::delete::execute(&settings, &mut TerminalPrompter, name, version, yes).await?
        }

        Commands::Deactivate => commands::deactivate::execute()?,

        Commands::SetDefault { version } => {
            commands::set_default::execute(&config_mgr, version).await?
        }
    }

    Ok(exit_code::SUCCESS)
}
