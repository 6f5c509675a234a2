pub mod global;
pub mod schema;
pub mod settings;
pub mod validation;

pub use global::GlobalConfigManager;
pub use schema::{DefaultsConfig, GlobalConfig};
pub use settings::{RootSource, Settings, ROOT_ENV_VAR};
pub use validation::{validate_env_name, validate_version_tag};
