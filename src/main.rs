use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, EnvFilter};
use zap::cli::{run, Cli};
use zap::core::ZapError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging; stdout is reserved for command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI
    let cli = Cli::parse();

    // Run command. Always leave through process::exit: a prompt abandoned by Ctrl+C may
    // still hold a blocking stdin read.
    let code = match run(cli).await {
        Ok(code) => code,
        Err(ZapError::Cancelled) => {
            eprintln!("{}", "Operation cancelled.".yellow());
            ZapError::Cancelled.exit_code()
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}
