//! Turning a user-supplied name (and optional version) into exactly one environment.
//!
//! The decision itself is pure ([`narrow`], [`choose`]); [`resolve`] wires it to the
//! store and to a [`Prompter`] for the one case that needs a human.

pub mod prompt;

pub use prompt::{confirm, Prompter, TerminalPrompter};

use crate::core::error::{Result, ZapError};
use crate::store::{Environment, EnvironmentStore};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(Environment),
    /// Two or more candidates, sorted by version string.
    Ambiguous(Vec<Environment>),
}

/// Applies the name filter and the optional version hint to `environments`.
pub fn narrow(
    environments: Vec<Environment>,
    name: &str,
    version_hint: Option<&str>,
) -> Result<Resolution> {
    let mut candidates: Vec<Environment> = environments
        .into_iter()
        .filter(|env| env.name == name)
        .collect();

    if candidates.is_empty() {
        return Err(ZapError::EnvironmentNotFound {
            name: name.to_string(),
            version: None,
        });
    }

    if let Some(version) = version_hint {
        candidates.retain(|env| env.version == version);
        return match candidates.len() {
            0 => Err(ZapError::EnvironmentNotFound {
                name: name.to_string(),
                version: Some(version.to_string()),
            }),
            1 => Ok(Resolution::Resolved(candidates.remove(0))),
            _ => Err(ZapError::DuplicateEnvironment {
                name: name.to_string(),
                version: version.to_string(),
            }),
        };
    }

    if candidates.len() == 1 {
        return Ok(Resolution::Resolved(candidates.remove(0)));
    }

    candidates.sort_by(|a, b| a.version.cmp(&b.version));
    Ok(Resolution::Ambiguous(candidates))
}

/// The numbered menu shown for ambiguous names; numbering starts at 1.
pub fn candidate_lines(candidates: &[Environment]) -> Vec<String> {
    let width = candidates
        .iter()
        .map(|env| env.version.len())
        .max()
        .unwrap_or(0);

    candidates
        .iter()
        .enumerate()
        .map(|(i, env)| {
            format!(
                "  {}. {:<width$}  {}",
                i + 1,
                env.version,
                env.path.display(),
                width = width
            )
        })
        .collect()
}

/// Maps a raw 1-based selection onto `candidates`. Anything else is an invalid selection.
pub fn choose(candidates: &[Environment], input: &str) -> Result<Environment> {
    let input = input.trim();
    let index = input
        .parse::<usize>()
        .ok()
        .filter(|i| (1..=candidates.len()).contains(i))
        .ok_or_else(|| {
            ZapError::InvalidSelection(format!(
                "'{}' is not a number between 1 and {}",
                input,
                candidates.len()
            ))
        })?;

    Ok(candidates[index - 1].clone())
}

/// Resolves `name` against the store, asking `prompter` only when the name is ambiguous.
/// `action` names the command in the question ("activate", "delete").
pub async fn resolve<P: Prompter>(
    store: &EnvironmentStore,
    name: &str,
    version_hint: Option<&str>,
    prompter: &mut P,
    action: &str,
) -> Result<Environment> {
    let environments = store.enumerate().await?;

    let candidates = match narrow(environments, name, version_hint)? {
        Resolution::Resolved(env) => {
            debug!("Resolved '{}' to {}", name, env.path.display());
            return Ok(env);
        }
        Resolution::Ambiguous(candidates) => candidates,
    };

    if !prompter.is_interactive() {
        return Err(ZapError::Ambiguous {
            name: name.to_string(),
            versions: candidates.into_iter().map(|env| env.version).collect(),
        });
    }

    prompter.show(&format!("Multiple environments named '{}' found:", name));
    for line in candidate_lines(&candidates) {
        prompter.show(&line);
    }

    let question = format!(
        "Select an environment to {} [1-{}] (Ctrl+C to cancel):",
        action,
        candidates.len()
    );
    match prompter.ask(&question).await? {
        Some(answer) => choose(&candidates, &answer),
        None => Err(ZapError::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::prompt::testing::ScriptedPrompter;
    use super::*;
    use crate::store::testing::{seed, FakeVenv};
    use crate::python::Interpreter;
    use std::path::Path;

    fn env(version: &str, name: &str) -> Environment {
        Environment::new(name, version, Path::new("/venvs").join(version).join(name))
    }

    async fn scenario_store(root: &Path) -> EnvironmentStore {
        seed(root, "3.11", "app").await;
        seed(root, "3.12-arm64", "app").await;
        seed(root, "3.12-arm64", "other").await;
        EnvironmentStore::new(root)
    }

    #[test]
    fn narrow_without_candidates_is_not_found() {
        let err = narrow(vec![env("3.11", "web")], "app", None).unwrap_err();
        assert!(matches!(
            err,
            ZapError::EnvironmentNotFound { ref name, version: None } if name == "app"
        ));
    }

    #[test]
    fn narrow_single_candidate_ignores_other_names() {
        let resolution = narrow(
            vec![env("3.11", "web"), env("3.12", "app"), env("3.13", "cli")],
            "app",
            None,
        )
        .unwrap();
        assert_eq!(resolution, Resolution::Resolved(env("3.12", "app")));
    }

    #[test]
    fn narrow_hint_is_exact_match() {
        let all = vec![env("3.12", "app"), env("3.12-arm64", "app")];

        assert_eq!(
            narrow(all.clone(), "app", Some("3.12")).unwrap(),
            Resolution::Resolved(env("3.12", "app"))
        );

        let err = narrow(all, "app", Some("3.1")).unwrap_err();
        assert!(matches!(
            err,
            ZapError::EnvironmentNotFound { version: Some(ref v), .. } if v == "3.1"
        ));
    }

    #[test]
    fn narrow_duplicate_pair_is_an_invariant_violation() {
        let err = narrow(vec![env("3.11", "app"), env("3.11", "app")], "app", Some("3.11"))
            .unwrap_err();
        assert!(matches!(err, ZapError::DuplicateEnvironment { .. }));
    }

    #[test]
    fn ambiguous_candidates_sort_by_version_string() {
        let resolution = narrow(
            vec![env("3.9", "app"), env("3.12-arm64", "app"), env("3.11", "app")],
            "app",
            None,
        )
        .unwrap();

        let Resolution::Ambiguous(candidates) = resolution else {
            panic!("expected ambiguity");
        };
        let versions: Vec<&str> = candidates.iter().map(|e| e.version.as_str()).collect();
        assert_eq!(versions, vec!["3.11", "3.12-arm64", "3.9"]);
    }

    #[test]
    fn choose_accepts_one_based_index() {
        let candidates = vec![env("3.11", "app"), env("3.12-arm64", "app")];
        assert_eq!(choose(&candidates, " 2\n").unwrap(), env("3.12-arm64", "app"));
        assert_eq!(choose(&candidates, "1").unwrap(), env("3.11", "app"));
    }

    #[test]
    fn choose_rejects_out_of_range_and_garbage_alike() {
        let candidates = vec![env("3.11", "app"), env("3.12-arm64", "app")];
        for input in ["0", "3", "-1", "abc", "", "1.5"] {
            assert!(
                matches!(choose(&candidates, input), Err(ZapError::InvalidSelection(_))),
                "input {:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn candidate_lines_are_numbered_from_one() {
        let lines = candidate_lines(&[env("3.11", "app"), env("3.12-arm64", "app")]);
        assert!(lines[0].starts_with("  1. 3.11 "));
        assert!(lines[1].starts_with("  2. 3.12-arm64 "));
    }

    #[tokio::test]
    async fn ambiguous_name_prompts_and_selects() {
        let dir = tempfile::tempdir().unwrap();
        let store = scenario_store(dir.path()).await;
        let mut prompter = ScriptedPrompter::answering(&["2"]);

        let env = resolve(&store, "app", None, &mut prompter, "activate")
            .await
            .unwrap();

        assert_eq!(env.version, "3.12-arm64");
        assert_eq!(env.path, dir.path().join("3.12-arm64").join("app"));
        assert_eq!(prompter.asked.len(), 1);
        assert!(prompter.shown[1].starts_with("  1. 3.11"));
        assert!(prompter.shown[2].starts_with("  2. 3.12-arm64"));
    }

    #[tokio::test]
    async fn version_hint_resolves_without_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let store = scenario_store(dir.path()).await;
        let mut prompter = ScriptedPrompter::answering(&[]);

        let env = resolve(&store, "app", Some("3.11"), &mut prompter, "activate")
            .await
            .unwrap();

        assert_eq!(env.path, dir.path().join("3.11").join("app"));
        assert!(prompter.asked.is_empty());
        assert!(prompter.shown.is_empty());
    }

    #[tokio::test]
    async fn missing_name_fails_without_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let store = scenario_store(dir.path()).await;
        let mut prompter = ScriptedPrompter::answering(&["1"]);

        let err = resolve(&store, "missing", None, &mut prompter, "activate")
            .await
            .unwrap_err();

        assert!(matches!(err, ZapError::EnvironmentNotFound { .. }));
        assert!(prompter.asked.is_empty());
    }

    #[tokio::test]
    async fn unmatched_hint_never_falls_back_to_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let store = scenario_store(dir.path()).await;
        let mut prompter = ScriptedPrompter::answering(&["1"]);

        let err = resolve(&store, "app", Some("3.13"), &mut prompter, "delete")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ZapError::EnvironmentNotFound { version: Some(ref v), .. } if v == "3.13"
        ));
        assert!(prompter.asked.is_empty());
    }

    #[tokio::test]
    async fn unique_name_resolves_without_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let store = scenario_store(dir.path()).await;
        let mut prompter = ScriptedPrompter::answering(&[]);

        let env = resolve(&store, "other", None, &mut prompter, "activate")
            .await
            .unwrap();

        assert_eq!(env.version, "3.12-arm64");
        assert!(prompter.asked.is_empty());
    }

    #[tokio::test]
    async fn menu_is_identical_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let store = scenario_store(dir.path()).await;
        seed(dir.path(), "3.10", "app").await;

        let mut first = ScriptedPrompter::answering(&["1"]);
        let mut second = ScriptedPrompter::answering(&["1"]);
        resolve(&store, "app", None, &mut first, "activate").await.unwrap();
        resolve(&store, "app", None, &mut second, "activate").await.unwrap();

        assert_eq!(first.shown, second.shown);
        assert_eq!(first.shown.len(), 4);
    }

    #[tokio::test]
    async fn invalid_selection_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let store = scenario_store(dir.path()).await;
        let mut prompter = ScriptedPrompter::answering(&["7"]);

        let err = resolve(&store, "app", None, &mut prompter, "delete")
            .await
            .unwrap_err();

        assert!(matches!(err, ZapError::InvalidSelection(_)));
        assert_eq!(prompter.asked.len(), 1);
    }

    #[tokio::test]
    async fn end_of_input_cancels() {
        let dir = tempfile::tempdir().unwrap();
        let store = scenario_store(dir.path()).await;
        let mut prompter = ScriptedPrompter::answering(&[]);

        let err = resolve(&store, "app", None, &mut prompter, "delete")
            .await
            .unwrap_err();

        assert!(matches!(err, ZapError::Cancelled));
    }

    #[tokio::test]
    async fn ambiguity_without_terminal_lists_versions() {
        let dir = tempfile::tempdir().unwrap();
        let store = scenario_store(dir.path()).await;
        let mut prompter = ScriptedPrompter::non_interactive();

        let err = resolve(&store, "app", None, &mut prompter, "activate")
            .await
            .unwrap_err();

        match err {
            ZapError::Ambiguous { versions, .. } => {
                assert_eq!(versions, vec!["3.11".to_string(), "3.12-arm64".to_string()])
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(prompter.asked.is_empty());
    }

    #[tokio::test]
    async fn created_environment_resolves_by_name_and_version() {
        let dir = tempfile::tempdir().unwrap();
        let store = scenario_store(dir.path()).await;
        let interpreter = Interpreter::new("3.13", "/usr/bin/python3.13");

        let created = store
            .create(&FakeVenv, &interpreter, "3.13", "app")
            .await
            .unwrap();
        let mut prompter = ScriptedPrompter::answering(&[]);
        let resolved = resolve(&store, "app", Some("3.13"), &mut prompter, "activate")
            .await
            .unwrap();

        assert_eq!(resolved, created);
    }

    #[tokio::test]
    async fn deleted_environment_no_longer_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let store = scenario_store(dir.path()).await;
        let mut prompter = ScriptedPrompter::answering(&[]);

        let env = resolve(&store, "other", None, &mut prompter, "delete")
            .await
            .unwrap();
        store.delete(&env).await.unwrap();

        let err = resolve(&store, "other", None, &mut prompter, "delete")
            .await
            .unwrap_err();
        assert!(matches!(err, ZapError::EnvironmentNotFound { .. }));
    }
}
