use crate::core::error::{Result, ZapError};
use std::future::Future;
use std::io::{self, BufRead, IsTerminal, Write};

/// Where questions go and answers come from.
pub trait Prompter {
    /// Whether a human can answer. Disambiguation is only attempted when this is true.
    fn is_interactive(&self) -> bool;

    fn show(&mut self, line: &str);

    /// One trimmed line of input, or `None` at end of input.
    fn ask(&mut self, question: &str) -> impl Future<Output = Result<Option<String>>>;
}

/// Asks on stderr and reads stdin. Ctrl+C while waiting yields [`ZapError::Cancelled`].
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn show(&mut self, line: &str) {
        eprintln!("{}", line);
    }

    async fn ask(&mut self, question: &str) -> Result<Option<String>> {
        eprint!("{} ", question);
        io::stderr().flush()?;

        let read = tokio::task::spawn_blocking(|| read_answer(&mut io::stdin().lock()));

        tokio::select! {
            joined = read => {
                let line = joined.map_err(anyhow::Error::from)??;
                Ok(line.map(|l| l.trim().to_string()))
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!();
                Err(ZapError::Cancelled)
            }
        }
    }
}

/// Reads one line as raw bytes. Invalid UTF-8 is replaced rather than rejected, so a
/// garbled answer reaches the caller as an ordinary non-matching string.
pub fn read_answer<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf)?;
    Ok((n > 0).then(|| String::from_utf8_lossy(&buf).into_owned()))
}

/// `true` only for `y`/`yes`. End of input cancels.
pub async fn confirm<P: Prompter>(prompter: &mut P, question: &str) -> Result<bool> {
    match prompter.ask(question).await? {
        Some(answer) => Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes")),
        None => Err(ZapError::Cancelled),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedPrompter;
    use super::*;

    #[tokio::test]
    async fn confirm_accepts_only_yes() {
        for (answer, expected) in [("y", true), ("YES", true), ("n", false), ("", false), ("yep", false)] {
            let mut prompter = ScriptedPrompter::answering(&[answer]);
            assert_eq!(
                confirm(&mut prompter, "Delete?").await.unwrap(),
                expected,
                "answer {:?}",
                answer
            );
        }
    }

    #[test]
    fn read_answer_tolerates_invalid_utf8() {
        let mut input = io::Cursor::new(b"\xff\n3\n".to_vec());

        let first = read_answer(&mut input).unwrap().unwrap();
        assert_eq!(first.trim(), "\u{FFFD}");
        assert_eq!(read_answer(&mut input).unwrap().as_deref(), Some("3\n"));
        assert_eq!(read_answer(&mut input).unwrap(), None);
    }

    #[test]
    fn garbled_selection_is_invalid_not_io() {
        use crate::resolve::choose;
        use crate::store::Environment;

        let candidates = vec![
            Environment::new("app", "3.11", "/venvs/3.11/app"),
            Environment::new("app", "3.12-arm64", "/venvs/3.12-arm64/app"),
        ];
        let answer = read_answer(&mut io::Cursor::new(b"\xff\n".to_vec()))
            .unwrap()
            .unwrap();

        let err = choose(&candidates, &answer).unwrap_err();
        assert!(matches!(err, ZapError::InvalidSelection(_)));
        assert_eq!(err.exit_code(), crate::core::exit_code::INVALID_SELECTION);
    }

    #[tokio::test]
    async fn confirm_at_end_of_input_cancels() {
        let mut prompter = ScriptedPrompter::answering(&[]);
        let err = confirm(&mut prompter, "Delete?").await.unwrap_err();
        assert!(matches!(err, ZapError::Cancelled));
    }
}
