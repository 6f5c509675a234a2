use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    /// sh, bash, zsh and anything unrecognised.
    Posix,
    Fish,
    Csh,
    PowerShell,
    Cmd,
}

impl ShellKind {
    pub fn detect() -> Self {
        if cfg!(windows) {
            return match std::env::var("SHELL") {
                Ok(shell) if Self::from_program(&shell) == ShellKind::Cmd => ShellKind::Cmd,
                _ => ShellKind::PowerShell,
            };
        }

        std::env::var("SHELL")
            .map(|shell| Self::from_program(&shell))
            .unwrap_or(ShellKind::Posix)
    }

    /// Classifies a shell by the file name of its program path.
    pub fn from_program(program: &str) -> Self {
        let name = program
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(program)
            .to_ascii_lowercase();
        let name = name.strip_suffix(".exe").unwrap_or(&name);

        match name {
            "fish" => ShellKind::Fish,
            "csh" | "tcsh" => ShellKind::Csh,
            "pwsh" | "powershell" => ShellKind::PowerShell,
            "cmd" => ShellKind::Cmd,
            _ => ShellKind::Posix,
        }
    }

    fn script_name(self) -> &'static str {
        match self {
            ShellKind::Posix => "activate",
            ShellKind::Fish => "activate.fish",
            ShellKind::Csh => "activate.csh",
            ShellKind::PowerShell => "Activate.ps1",
            ShellKind::Cmd => "activate.bat",
        }
    }

    pub fn script_path(self, env_dir: &Path) -> PathBuf {
        bin_dir(env_dir).join(self.script_name())
    }

    /// The line a user pastes (or `eval`s) to activate `env_dir` in this shell.
    pub fn activation_command(self, env_dir: &Path) -> String {
        let script = self.script_path(env_dir).display().to_string();
        match self {
            ShellKind::Posix | ShellKind::Fish | ShellKind::Csh => {
                format!("source {}", quote_posix(&script))
            }
            ShellKind::PowerShell => format!("& {}", quote_powershell(&script)),
            ShellKind::Cmd => quote_cmd(&script),
        }
    }

    pub fn deactivation_command(self) -> &'static str {
        "deactivate"
    }
}

/// `Scripts` on Windows, `bin` elsewhere.
pub fn bin_dir(env_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        env_dir.join("Scripts")
    } else {
        env_dir.join("bin")
    }
}

fn needs_quoting(s: &str) -> bool {
    s.chars()
        .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '$' | '`' | '&' | ';' | '(' | ')'))
}

fn quote_posix(s: &str) -> String {
    if needs_quoting(s) {
        format!("'{}'", s.replace('\'', r"'\''"))
    } else {
        s.to_string()
    }
}

fn quote_powershell(s: &str) -> String {
    if needs_quoting(s) {
        format!("'{}'", s.replace('\'', "''"))
    } else {
        s.to_string()
    }
}

fn quote_cmd(s: &str) -> String {
    if needs_quoting(s) {
        format!("\"{}\"", s)
    } else {
        s.to_string()
    }
}
