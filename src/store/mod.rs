pub mod environment;

pub use environment::{path_for, Environment};

use crate::config::{validate_env_name, validate_version_tag};
use crate::core::error::{Result, ZapError};
use crate::core::{ensure_dir_exists, is_dir, is_file, remove_dir_if_exists};
use crate::python::{Interpreter, VenvCreator, VENV_MARKER};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::ReadDir;
use tracing::{debug, warn};

/// The environments under one root, laid out as `{root}/{version}/{name}`.
///
/// Nothing is cached: every call reads the directory tree again.
pub struct EnvironmentStore {
    root: PathBuf,
}

impl EnvironmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, version: &str, name: &str) -> PathBuf {
        path_for(&self.root, version, name)
    }

    /// Every environment, sorted by `(version, name)`.
    ///
    /// A missing root is an empty store. Entries that do not fit the two-level layout are
    /// skipped.
    pub async fn enumerate(&self) -> Result<Vec<Environment>> {
        let Some(mut versions) = read_dir_if_exists(&self.root).await? else {
            debug!("Root {} does not exist yet", self.root.display());
            return Ok(Vec::new());
        };

        let mut environments = Vec::new();
        while let Some(entry) = versions.next_entry().await? {
            let version_dir = entry.path();
            let Some(version) = utf8_file_name(&version_dir) else {
                debug!("Skipping non UTF-8 entry {}", version_dir.display());
                continue;
            };
            if !is_dir(&version_dir).await {
                debug!("Skipping stray file {}", version_dir.display());
                continue;
            }

            let mut names = match tokio::fs::read_dir(&version_dir).await {
                Ok(names) => names,
                Err(e) => {
                    debug!("Skipping unreadable {}: {}", version_dir.display(), e);
                    continue;
                }
            };

            while let Ok(Some(entry)) = names.next_entry().await {
                let env_dir = entry.path();
                let Some(name) = utf8_file_name(&env_dir) else {
                    continue;
                };
                if !is_file(&env_dir.join(VENV_MARKER)).await {
                    debug!("Skipping {} (no {})", env_dir.display(), VENV_MARKER);
                    continue;
                }
                environments.push(Environment::new(name, version.clone(), env_dir));
            }
        }

        environments.sort_by(|a, b| (&a.version, &a.name).cmp(&(&b.version, &b.name)));
        Ok(environments)
    }

    /// Environments named exactly `name`, across all versions.
    pub async fn find(&self, name: &str) -> Result<Vec<Environment>> {
        let mut environments = self.enumerate().await?;
        environments.retain(|env| env.name == name);
        Ok(environments)
    }

    /// Creates `{root}/{version}/{name}` with `creator`, refusing to overwrite anything.
    pub async fn create<C: VenvCreator>(
        &self,
        creator: &C,
        interpreter: &Interpreter,
        version: &str,
        name: &str,
    ) -> Result<Environment> {
        validate_version_tag(version)?;
        validate_env_name(name)?;

        let target = self.path_for(version, name);
        if tokio::fs::try_exists(&target).await? {
            return Err(ZapError::Creation(format!(
                "Environment '{}' already exists at {}",
                name,
                target.display()
            )));
        }

        if let Some(parent) = target.parent() {
            ensure_dir_exists(parent).await?;
        }

        debug!(
            "Creating {} with {}",
            target.display(),
            interpreter.executable.display()
        );
        if let Err(e) = creator.create(&target, interpreter).await {
            if let Err(cleanup) = remove_dir_if_exists(&target).await {
                warn!(
                    "Could not remove partial environment {}: {}",
                    target.display(),
                    cleanup
                );
            }
            return Err(match e {
                ZapError::Creation(_) => e,
                other => ZapError::Creation(other.to_string()),
            });
        }

        Ok(Environment::new(name, version, target))
    }

    /// Removes the environment's whole directory tree.
    pub async fn delete(&self, environment: &Environment) -> Result<()> {
        match tokio::fs::remove_dir_all(&environment.path).await {
            Ok(()) => {
                debug!("Removed {}", environment.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ZapError::Deletion(format!(
                "{} no longer exists",
                environment.path.display()
            ))),
            Err(e) => Err(ZapError::Deletion(format!(
                "{}: {}",
                environment.path.display(),
                e
            ))),
        }
    }
}

async fn read_dir_if_exists(path: &Path) -> Result<Option<ReadDir>> {
    match tokio::fs::read_dir(path).await {
        Ok(entries) => Ok(Some(entries)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => {
            if path.exists() && !is_dir(path).await {
                debug!("{} is not a directory", path.display());
                Ok(None)
            } else {
                Err(e.into())
            }
        }
    }
}

fn utf8_file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}
