//! Yes/no confirmation before a batch changes anything.

use crate::error::{DeskError, Result};
use std::collections::VecDeque;

/// Source of answers for batch confirmations.
pub trait Confirm {
    /// Asks `question`; `Ok(true)` means go ahead.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Asks on the terminal. Defaults to "no" on a bare Enter.
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        dialoguer::Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|e| DeskError::Prompt(e.to_string()))
    }
}

/// Answers from a fixed script, for `--yes` and for tests.
///
/// Queued answers are used first; once they run out every question gets
/// the fallback answer.
#[derive(Debug)]
pub struct ScriptedConfirm {
    answers: VecDeque<bool>,
    fallback: bool,
    asked: Vec<String>,
}

impl ScriptedConfirm {
    /// Answers every question with `answer`.
    pub fn always(answer: bool) -> Self {
        Self {
            answers: VecDeque::new(),
            fallback: answer,
            asked: Vec::new(),
        }
    }

    /// Answers with `answers` in order, then "no".
    pub fn sequence(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            fallback: false,
            asked: Vec::new(),
        }
    }

    /// Every question asked so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(self.fallback))
    }
}
