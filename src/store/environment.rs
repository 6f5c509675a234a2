use std::path::{Path, PathBuf};

/// A virtual environment on disk at `{root}/{version}/{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub name: String,
    pub version: String,
    pub path: PathBuf,
}

impl Environment {
    pub fn new(name: impl Into<String>, version: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            path: path.into(),
        }
    }
}

/// Storage location of `(version, name)` under `root`. Pure; touches no filesystem.
pub fn path_for(root: &Path, version: &str, name: &str) -> PathBuf {
    root.join(version).join(name)
}
