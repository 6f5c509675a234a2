use crate::config::Settings;
use crate::core::error::Result;
use crate::python::version::compare_tags;
use crate::python::{Interpreter, InterpreterLocator};
use crate::store::{Environment, EnvironmentStore};
use colored::Colorize;

pub async fn execute(settings: &Settings) -> Result<()> {
    let interpreters = InterpreterLocator::new().discover().await?;
    let environments = EnvironmentStore::new(settings.root()).enumerate().await?;

    print_interpreters(&interpreters);
    println!();
    print_environments(settings, &environments);

    Ok(())
}

fn print_interpreters(interpreters: &[Interpreter]) {
    println!("{}", "Available Python interpreters:".bold());

    if interpreters.is_empty() {
        println!("  {}", "No Python interpreters found".yellow());
        return;
    }

    let mut sorted: Vec<&Interpreter> = interpreters.iter().collect();
    sorted.sort_by(|a, b| compare_tags(&a.version, &b.version));

    let width = sorted.iter().map(|i| i.version.len()).max().unwrap_or(0);
    for interpreter in sorted {
        println!(
            "  {} → {}",
            format!("{:<width$}", interpreter.version, width = width).cyan(),
            interpreter.executable.display()
        );
    }
}

fn print_environments(settings: &Settings, environments: &[Environment]) {
    println!(
        "{} {}:",
        "Virtual environments in".bold(),
        settings.root().display().to_string().bold()
    );

    if environments.is_empty() {
        println!("  {}", "No environments yet".yellow());
        println!(
            "  Run {} to create one",
            "zap create <version> <name>".cyan()
        );
        return;
    }

    for (version, names) in group_by_version(environments) {
        println!("  Python {}", version.yellow());
        for name in names {
            println!("    * {}", name.cyan());
        }
    }
}

/// Versions in natural order, each with its environment names sorted.
pub fn group_by_version(environments: &[Environment]) -> Vec<(&str, Vec<&str>)> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();

    for env in environments {
        match groups.iter_mut().find(|(v, _)| *v == env.version) {
            Some((_, names)) => names.push(env.name.as_str()),
            None => groups.push((env.version.as_str(), vec![env.name.as_str()])),
        }
    }

    groups.sort_by(|a, b| compare_tags(a.0, b.0));
    for (_, names) in &mut groups {
        names.sort_unstable();
    }
    groups
}
