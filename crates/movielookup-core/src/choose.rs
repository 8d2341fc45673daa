//! Operator disambiguation between search candidates.

use std::io;

use thiserror::Error;
use tracing::warn;

use crate::{Candidate, Prompter};

const SELECT_PROMPT: &str =
    "Select a result from the list (choose the corresponding number or press ENTER to skip): ";

/// Outcome of a disambiguation round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Chosen(Candidate),
    Skip,
}

/// The operator typed something other than a listed position.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid selection: {0}")]
pub struct InvalidSelection(pub String);

/// Interpret a selection answer against `count` listed candidates.
///
/// Empty means skip; otherwise the answer must be a 1-based position.
/// Returns the 0-based index.
pub fn parse_selection(answer: &str, count: usize) -> Result<Option<usize>, InvalidSelection> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    match answer.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Ok(Some(n - 1)),
        _ => Err(InvalidSelection(answer.to_string())),
    }
}

/// Let the operator pick one of `candidates` for `query`.
///
/// With no candidates a warning is shown and nothing is asked. Otherwise
/// the candidates are listed by 1-based position and the question repeats
/// until the answer is empty or a valid position.
pub fn choose(
    candidates: Vec<Candidate>,
    query: &str,
    prompter: &mut dyn Prompter,
) -> io::Result<Choice> {
    if candidates.is_empty() {
        warn!(title = %query, "no results");
        prompter.say(&format!("WARNING: No results for \"{query}\""))?;
        return Ok(Choice::Skip);
    }

    for (i, candidate) in candidates.iter().enumerate() {
        prompter.say(&format!("{}: {}", i + 1, candidate.display_label))?;
    }

    loop {
        let answer = prompter.ask(SELECT_PROMPT)?;
        match parse_selection(&answer, candidates.len()) {
            Ok(None) => return Ok(Choice::Skip),
            Ok(Some(index)) => {
                let chosen = candidates.into_iter().nth(index);
                return Ok(chosen.map_or(Choice::Skip, Choice::Chosen));
            }
            Err(e) => prompter.say(&format!("ERROR: {e}"))?,
        }
    }
}
