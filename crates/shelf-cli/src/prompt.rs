//! Line-oriented prompting
//!
//! Wraps an input reader and an output writer so the menu can run against
//! stdin/stdout or against in-memory buffers.

use std::io::{self, BufRead, Write};

use anyhow::Result;

/// Prompt helper over a reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process terminal
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer for free-form output between prompts
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the prompter and return the writer
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask for one line of text
    ///
    /// Returns `None` at end of input. The answer is trimmed.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", prompt)?;
        self.output.flush()?;

        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Ok(None);
        }

        Ok(Some(input.trim().to_string()))
    }

    /// Ask a yes/no question
    ///
    /// Only `y` or `yes` (any case) count as yes. Returns `None` at end of
    /// input.
    pub fn confirm(&mut self, prompt: &str) -> Result<Option<bool>> {
        Ok(self
            .ask(&format!("{} (yes/no)", prompt))?
            .map(|answer| is_yes(&answer)))
    }
}

/// Whether an answer means yes
fn is_yes(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_trims_answer() {
        let mut p = prompter("  Dune  \n");
        assert_eq!(p.ask("Title").unwrap(), Some("Dune".to_string()));

        let written = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(written, "Title: ");
    }

    #[test]
    fn test_ask_eof() {
        let mut p = prompter("");
        assert_eq!(p.ask("Title").unwrap(), None);
    }

    #[test]
    fn test_ask_empty_line_is_empty_answer() {
        let mut p = prompter("\n");
        assert_eq!(p.ask("Title").unwrap(), Some(String::new()));
    }

    #[test]
    fn test_confirm() {
        let mut p = prompter("yes\nY\nno\nmaybe\n");
        assert_eq!(p.confirm("Read?").unwrap(), Some(true));
        assert_eq!(p.confirm("Read?").unwrap(), Some(true));
        assert_eq!(p.confirm("Read?").unwrap(), Some(false));
        assert_eq!(p.confirm("Read?").unwrap(), Some(false));
        assert_eq!(p.confirm("Read?").unwrap(), None);
    }
}
