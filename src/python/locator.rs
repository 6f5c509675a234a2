use crate::core::error::{Result, ZapError};
use crate::core::ProcessExecutor;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `py -0p` lines: ` -V:3.12-arm64 *        C:\Python312-arm64\python.exe`.
/// Older launchers print ` -3.11-64 *  C:\...` instead.
static LAUNCHER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-(?:V:)?(?P<tag>[^\s*]+)\s+\*?\s*(?P<path>\S.*?)\s*$")
        .expect("launcher pattern is valid")
});

static VERSIONED_PYTHON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^python3\.\d+$").expect("python name pattern is valid"));

const PROBE_SCRIPT: &str = "import sys, json; print(json.dumps(list(sys.version_info[:2])))";

/// A Python runtime found on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    pub version: String,
    pub executable: PathBuf,
}

impl Interpreter {
    pub fn new(version: impl Into<String>, executable: impl Into<PathBuf>) -> Self {
        Self {
            version: version.into(),
            executable: executable.into(),
        }
    }
}

pub struct InterpreterLocator {
    search_path: Option<OsString>,
}

impl InterpreterLocator {
    pub fn new() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
        }
    }

    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    /// Interpreters in discovery order. An empty result is not an error.
    pub async fn discover(&self) -> Result<Vec<Interpreter>> {
        let found = if cfg!(windows) {
            self.discover_with_launcher().await
        } else {
            self.discover_on_path().await
        };

        Ok(dedupe(found).await)
    }

    async fn discover_with_launcher(&self) -> Vec<Interpreter> {
        match ProcessExecutor::execute_with_output("py", &["-0p"]).await {
            Ok(listing) => parse_launcher_listing(&listing),
            Err(e) => {
                debug!("Python launcher unavailable: {}", e);
                Vec::new()
            }
        }
    }

    async fn discover_on_path(&self) -> Vec<Interpreter> {
        let Some(search_path) = &self.search_path else {
            return Vec::new();
        };

        let mut found = Vec::new();
        for dir in std::env::split_paths(search_path) {
            for candidate in versioned_pythons_in(&dir).await {
                match probe(&candidate).await {
                    Ok(version) => found.push(Interpreter::new(version, candidate)),
                    Err(e) => debug!("Skipping {}: {}", candidate.display(), e),
                }
            }
        }
        found
    }
}

impl Default for InterpreterLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// First interpreter whose tag equals `version` exactly.
pub fn select<'a>(interpreters: &'a [Interpreter], version: &str) -> Result<&'a Interpreter> {
    interpreters
        .iter()
        .find(|i| i.version == version)
        .ok_or_else(|| ZapError::InterpreterNotFound(version.to_string()))
}

pub fn parse_launcher_listing(listing: &str) -> Vec<Interpreter> {
    listing
        .lines()
        .filter_map(|line| LAUNCHER_LINE.captures(line))
        .map(|caps| Interpreter::new(&caps["tag"], caps["path"].trim()))
        .collect()
}

pub fn is_versioned_python(file_name: &str) -> bool {
    VERSIONED_PYTHON.is_match(file_name)
}

async fn versioned_pythons_in(dir: &Path) -> Vec<PathBuf> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot read {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut candidates = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_versioned_python);
        if matches && crate::core::is_file(&path).await {
            candidates.push(path);
        }
    }
    candidates.sort();
    candidates
}

async fn probe(executable: &Path) -> Result<String> {
    let output = ProcessExecutor::execute_with_output(executable, &["-c", PROBE_SCRIPT]).await?;
    let (major, minor): (u32, u32) = serde_json::from_str(output.trim()).map_err(|e| {
        ZapError::CommandFailed(format!(
            "unexpected version output from {}: {}",
            executable.display(),
            e
        ))
    })?;
    Ok(format!("{}.{}", major, minor))
}

/// Drops repeated `(version, executable)` pairs, comparing canonical paths.
async fn dedupe(found: Vec<Interpreter>) -> Vec<Interpreter> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(found.len());

    for interpreter in found {
        let canonical = tokio::fs::canonicalize(&interpreter.executable)
            .await
            .unwrap_or_else(|_| interpreter.executable.clone());
        if seen.insert((interpreter.version.clone(), canonical)) {
            unique.push(interpreter);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modern_launcher_listing() {
        let listing = " -V:3.12-arm64 *        C:\\Python312-arm64\\python.exe\n -V:3.11          C:\\Program Files\\Python311\\python.exe\n";

        let found = parse_launcher_listing(listing);

        assert_eq!(
            found,
            vec![
                Interpreter::new("3.12-arm64", "C:\\Python312-arm64\\python.exe"),
                Interpreter::new("3.11", "C:\\Program Files\\Python311\\python.exe"),
            ]
        );
    }

    #[test]
    fn parses_legacy_launcher_listing() {
        let found = parse_launcher_listing(" -3.10-64 *      C:\\Python310\\python.exe\n\nInstalled Pythons found by py Launcher for Windows\n");
        assert_eq!(
            found,
            vec![Interpreter::new("3.10-64", "C:\\Python310\\python.exe")]
        );
    }

    #[test]
    fn recognises_versioned_python_names() {
        assert!(is_versioned_python("python3.9"));
        assert!(is_versioned_python("python3.13"));
        assert!(!is_versioned_python("python3"));
        assert!(!is_versioned_python("python3.11-config"));
        assert!(!is_versioned_python("python3.12m"));
    }

    #[test]
    fn select_requires_exact_tag() {
        let interpreters = vec![
            Interpreter::new("3.12", "/usr/bin/python3.12"),
            Interpreter::new("3.12-arm64", "/opt/arm/python3.12"),
        ];

        assert_eq!(
            select(&interpreters, "3.12-arm64").unwrap().executable,
            PathBuf::from("/opt/arm/python3.12")
        );
        assert!(matches!(
            select(&interpreters, "3.1"),
            Err(ZapError::InterpreterNotFound(v)) if v == "3.1"
        ));
    }

    #[tokio::test]
    async fn dedupe_keeps_same_version_at_different_paths() {
        let found = vec![
            Interpreter::new("3.11", "/nonexistent/a/python3.11"),
            Interpreter::new("3.11", "/nonexistent/b/python3.11"),
            Interpreter::new("3.11", "/nonexistent/a/python3.11"),
        ];

        let unique = dedupe(found).await;

        assert_eq!(
            unique,
            vec![
                Interpreter::new("3.11", "/nonexistent/a/python3.11"),
                Interpreter::new("3.11", "/nonexistent/b/python3.11"),
            ]
        );
    }

    #[tokio::test]
    async fn empty_search_path_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let locator = InterpreterLocator::with_search_path(dir.path().as_os_str());

        if cfg!(not(windows)) {
            assert!(locator.discover().await.unwrap().is_empty());
        }
    }
}
