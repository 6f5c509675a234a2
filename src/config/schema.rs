use serde::{Deserialize, Serialize};

/// Contents of the global `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GlobalConfig {
    /// Overrides the platform default root; `ENV_ROOT` still wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct DefaultsConfig {
    /// Interpreter tag used by `create` when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_version: Option<String>,
}
