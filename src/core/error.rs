use thiserror::Error;

/// Process exit codes. Stable; scripts may branch on them.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const OPERATION_FAILED: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 3;
    pub const INVALID_SELECTION: i32 = 4;
    pub const CANCELLED: i32 = 5;
    pub const INTERNAL: i32 = 70;
}

#[derive(Error, Debug)]
pub enum ZapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("{}", not_found_message(.name, .version.as_deref()))]
    EnvironmentNotFound {
        name: String,
        version: Option<String>,
    },

    #[error("Python {0} not found. Run 'zap list' to see available interpreters")]
    InterpreterNotFound(String),

    #[error("No Python version specified and no default set. Use 'zap set-default <version>' or pass a version")]
    NoDefaultVersion,

    #[error("Internal error: environment '{name}' appears more than once for Python {version}; this is a bug in the environment store")]
    DuplicateEnvironment { name: String, version: String },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Multiple environments named '{name}' exist (Python {}); pass --version to pick one", .versions.join(", "))]
    Ambiguous { name: String, versions: Vec<String> },

    #[error("Failed to create environment: {0}")]
    Creation(String),

    #[error("Failed to delete environment: {0}")]
    Deletion(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn not_found_message(name: &str, version: Option<&str>) -> String {
    match version {
        Some(v) => format!("No environment named '{}' with Python {}", name, v),
        None => format!("No environment named '{}'", name),
    }
}

impl ZapError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ZapError::EnvironmentNotFound { .. }
            | ZapError::InterpreterNotFound(_)
            | ZapError::NoDefaultVersion => exit_code::NOT_FOUND,
            ZapError::InvalidSelection(_) | ZapError::Ambiguous { .. } => {
                exit_code::INVALID_SELECTION
            }
            ZapError::Cancelled => exit_code::CANCELLED,
            ZapError::DuplicateEnvironment { .. } => exit_code::INTERNAL,
            ZapError::Config(_)
            | ZapError::InvalidName(_)
            | ZapError::Creation(_)
            | ZapError::Deletion(_)
            | ZapError::CommandFailed(_)
            | ZapError::Io(_)
            | ZapError::Toml(_)
            | ZapError::TomlSerialize(_)
            | ZapError::Other(_) => exit_code::OPERATION_FAILED,
        }
    }
}

pub type Result<T> = std::result::Result<T, ZapError>;
