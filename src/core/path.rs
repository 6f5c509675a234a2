use std::path::{Path, PathBuf};

pub fn resolve_path(base_dir: &Path, configured: &str) -> PathBuf {
    let path = PathBuf::from(configured);
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

/// Expands a leading `~` against `home`, then resolves relative paths against `base_dir`.
pub fn expand_path(configured: &str, home: Option<&Path>, base_dir: &Path) -> PathBuf {
    if let Some(home) = home {
        if configured == "~" {
            return home.to_path_buf();
        }
        if let Some(rest) = configured
            .strip_prefix("~/")
            .or_else(|| configured.strip_prefix("~\\"))
        {
            return home.join(rest);
        }
    }
    resolve_path(base_dir, configured)
}
