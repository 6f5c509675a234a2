use crate::core::error::{Result, ZapError};

/// Environment names and version tags each become one directory level under the root,
/// so both must be a plain file name.
pub fn validate_path_component(kind: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ZapError::InvalidName(format!("{} cannot be empty", kind)));
    }

    if value == "." || value == ".." {
        return Err(ZapError::InvalidName(format!(
            "{} cannot be '{}'",
            kind, value
        )));
    }

    if value.starts_with('-') {
        return Err(ZapError::InvalidName(format!(
            "{} cannot start with '-'",
            kind
        )));
    }

    if value.chars().any(|c| c == '/' || c == '\\') {
        return Err(ZapError::InvalidName(format!(
            "{} must be a plain name (no path separators): '{}'",
            kind, value
        )));
    }

    let valid = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' || c == '+');
    if !valid {
        return Err(ZapError::InvalidName(format!(
            "{} may only contain ASCII letters/digits and . _ - +: '{}'",
            kind, value
        )));
    }

    Ok(())
}

pub fn validate_env_name(name: &str) -> Result<()> {
    validate_path_component("environment name", name)
}

pub fn validate_version_tag(version: &str) -> Result<()> {
    validate_path_component("Python version", version)
}
