//! Operator interaction seam.

use std::collections::VecDeque;
use std::io;

/// Line-based operator console.
///
/// Every call blocks until the operator answers; the reconciliation loop
/// makes no progress in the meantime.
pub trait Prompter {
    /// Show `question` and return the answer without its line terminator.
    fn ask(&mut self, question: &str) -> io::Result<String>;

    /// Show one informational line.
    fn say(&mut self, line: &str) -> io::Result<()>;
}

/// [`Prompter`] that replays canned answers and records the dialogue.
///
/// Running out of answers is an [`io::ErrorKind::UnexpectedEof`] error, so a
/// test fails loudly when the code under test asks more than expected.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Questions and lines shown so far, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Number of questions asked so far.
    pub fn questions_asked(&self) -> usize {
        self.transcript.iter().filter(|l| l.starts_with("? ")).count()
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.transcript.push(format!("? {question}"));
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no scripted answer for {question:?}"),
            )
        })
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        self.transcript.push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_answers_in_order() {
        let mut p = ScriptedPrompter::new(["1", ""]);
        assert_eq!(p.ask("first?").unwrap(), "1");
        assert_eq!(p.ask("second?").unwrap(), "");
        assert_eq!(p.questions_asked(), 2);
        assert_eq!(p.remaining(), 0);
    }

    #[test]
    fn exhausted_script_is_eof() {
        let mut p = ScriptedPrompter::new(Vec::<String>::new());
        let err = p.ask("anything?").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn transcript_interleaves_lines_and_questions() {
        let mut p = ScriptedPrompter::new(["y"]);
        p.say("hello").unwrap();
        p.ask("ok?").unwrap();
        assert_eq!(p.transcript(), ["hello", "? ok?"]);
    }
}
