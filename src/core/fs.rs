use crate::core::error::Result;
use std::io::ErrorKind;
use std::path::Path;

pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}

/// Follows symlinks; any error reads as "not a directory".
pub async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

pub async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Removes a directory tree, treating an already-missing path as success.
pub async fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn remove_dir_if_exists_tolerates_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");

        remove_dir_if_exists(&gone).await.unwrap();

        tokio::fs::create_dir_all(gone.join("nested")).await.unwrap();
        remove_dir_if_exists(&gone).await.unwrap();
        assert!(!gone.exists());
    }

    #[tokio::test]
    async fn is_dir_distinguishes_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("marker");
        tokio::fs::write(&file, "x").await.unwrap();

        assert!(is_dir(dir.path()).await);
        assert!(!is_dir(&file).await);
        assert!(is_file(&file).await);
        assert!(!is_dir(&dir.path().join("missing")).await);
    }
}
