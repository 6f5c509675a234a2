use crate::config::schema::GlobalConfig;
use crate::core::error::Result;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tokio::fs;

const GLOBAL_CONFIG_FILE: &str = "config.toml";
pub const CONFIG_DIR_ENV_VAR: &str = "ZAP_CONFIG_DIR";

pub struct GlobalConfigManager {
    config_dir: PathBuf,
    config_path: PathBuf,
}

impl GlobalConfigManager {
    pub fn new() -> Result<Self> {
        Ok(Self::with_dir(Self::get_config_dir()?))
    }

    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let config_path = config_dir.join(GLOBAL_CONFIG_FILE);

        Self {
            config_dir,
            config_path,
        }
    }

    fn get_config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        if let Some(proj_dirs) = ProjectDirs::from("com", "zap", "zap") {
            Ok(proj_dirs.config_dir().to_path_buf())
        } else {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            Ok(PathBuf::from(home).join(".zap"))
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub async fn load(&self) -> Result<GlobalConfig> {
        if !self.config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&self.config_path).await?;
        let config: GlobalConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub async fn save(&self, config: &GlobalConfig) -> Result<()> {
        fs::create_dir_all(&self.config_dir).await?;
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await?;
        Ok(())
    }

    pub async fn set_default_version(&self, version: &str) -> Result<GlobalConfig> {
        let mut config = self.load().await?;
        config.defaults.python_version = Some(version.to_string());
        self.save(&config).await?;
        Ok(config)
    }
}
