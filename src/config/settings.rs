use crate::config::global::GlobalConfigManager;
use crate::config::schema::GlobalConfig;
use crate::core::expand_path;
use directories::BaseDirs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const ROOT_ENV_VAR: &str = "ENV_ROOT";

#[cfg(windows)]
const DEFAULT_WINDOWS_ROOT: &str = r"C:\venvs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    Environment,
    ConfigFile,
    PlatformDefault,
}

/// Per-invocation configuration, resolved once in `main` and passed down.
#[derive(Debug, Clone)]
pub struct Settings {
    root: PathBuf,
    root_source: RootSource,
    default_version: Option<String>,
}

impl Settings {
    /// Never fails: an unreadable config file or a vanished working directory is
    /// logged and replaced by defaults, so commands that don't need them still run.
    pub async fn load(manager: &GlobalConfigManager) -> Self {
        let config = manager.load().await.unwrap_or_else(|e| {
            warn!(
                "Ignoring config file {}: {}",
                manager.config_path().display(),
                e
            );
            GlobalConfig::default()
        });
        let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        let cwd = std::env::current_dir().unwrap_or_else(|e| {
            warn!("Current directory unavailable: {}", e);
            PathBuf::from(".")
        });

        Self::resolve(
            std::env::var_os(ROOT_ENV_VAR),
            &config,
            home.as_deref(),
            &cwd,
        )
    }

    /// Precedence: `ENV_ROOT`, then the config file's `root`, then the platform default.
    pub fn resolve(
        env_root: Option<OsString>,
        config: &GlobalConfig,
        home: Option<&Path>,
        cwd: &Path,
    ) -> Self {
        let from_env = env_root
            .filter(|v| !v.is_empty())
            .map(|v| expand_path(&v.to_string_lossy(), home, cwd));

        let from_config = config
            .root
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| expand_path(v, home, cwd));

        let (root, root_source) = match (from_env, from_config) {
            (Some(root), _) => (root, RootSource::Environment),
            (None, Some(root)) => (root, RootSource::ConfigFile),
            (None, None) => (default_root(home, cwd), RootSource::PlatformDefault),
        };

        let default_version = config
            .defaults
            .python_version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Self {
            root,
            root_source,
            default_version,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn root_source(&self) -> RootSource {
        self.root_source
    }

    pub fn default_version(&self) -> Option<&str> {
        self.default_version.as_deref()
    }
}

#[cfg(windows)]
pub fn default_root(_home: Option<&Path>, _cwd: &Path) -> PathBuf {
    PathBuf::from(DEFAULT_WINDOWS_ROOT)
}

#[cfg(not(windows))]
pub fn default_root(home: Option<&Path>, cwd: &Path) -> PathBuf {
    home.unwrap_or(cwd).join("venvs")
}
