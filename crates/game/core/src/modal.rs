//! Suspend-and-resume question flow.
//!
//! A modal pauses the turn clock and walks through its questions one answer
//! at a time. Each question's continuation decides whether the flow goes on
//! (`true`) or stops (`false`). When the flow closes the clock resumes, and
//! the turn that opened the modal finishes with a tick, unless the game
//! ended in the meantime.
//!
//! Queued answers ([`Game::push_mock_answers`]) are consumed the moment a
//! modal opens, so scripted runs never actually suspend.

use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, warn};

use crate::engine::{Game, TurnOutcome};
use crate::error::{ExecuteError, GameResult, InvariantError};
use crate::state::GameStatus;

/// Continuation run with the player's answer. `Ok(true)` moves on to the
/// next question.
pub type Continuation = Box<dyn FnOnce(&mut Game, &str) -> GameResult<bool>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionKind {
    /// Free-form answer.
    Text,
    /// One of the listed answers.
    MultipleChoice(Vec<String>),
}

/// One prompt of a modal run.
pub struct Question {
    pub kind: QuestionKind,
    pub prompt: String,
    pub answer: Option<String>,
    continuation: Option<Continuation>,
}

impl Question {
    pub fn text(
        prompt: impl Into<String>,
        continuation: impl FnOnce(&mut Game, &str) -> GameResult<bool> + 'static,
    ) -> Self {
        Self {
            kind: QuestionKind::Text,
            prompt: prompt.into(),
            answer: None,
            continuation: Some(Box::new(continuation)),
        }
    }

    pub fn choice<I, S>(
        prompt: impl Into<String>,
        choices: I,
        continuation: impl FnOnce(&mut Game, &str) -> GameResult<bool> + 'static,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: QuestionKind::MultipleChoice(choices.into_iter().map(Into::into).collect()),
            prompt: prompt.into(),
            answer: None,
            continuation: Some(Box::new(continuation)),
        }
    }

    pub fn choices(&self) -> &[String] {
        match &self.kind {
            QuestionKind::Text => &[],
            QuestionKind::MultipleChoice(choices) => choices,
        }
    }

    /// Canonical form of `answer`: the matching choice for multiple choice
    /// questions, the trimmed text otherwise.
    fn normalize(&self, answer: &str) -> Option<String> {
        let answer = answer.trim();
        match &self.kind {
            QuestionKind::Text => Some(answer.to_owned()),
            QuestionKind::MultipleChoice(choices) => choices
                .iter()
                .find(|choice| choice.eq_ignore_ascii_case(answer))
                .cloned(),
        }
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("kind", &self.kind)
            .field("prompt", &self.prompt)
            .field("answer", &self.answer)
            .finish_non_exhaustive()
    }
}

/// State of the question flow.
#[derive(Debug, Default)]
pub struct Modal {
    questions: Vec<Question>,
    current: usize,
    visible: bool,
    /// The flow is waiting for real input, so closing it finishes the turn.
    suspended: bool,
    mock_answers: VecDeque<String>,
}

impl Modal {
    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Question awaiting an answer.
    pub fn current_question(&self) -> Option<&Question> {
        self.visible
            .then(|| self.questions.get(self.current))
            .flatten()
    }

    /// Questions of the open (or last closed) run, with recorded answers.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl Game {
    /// Opens a modal run and pauses the clock.
    ///
    /// Queued mock answers are submitted immediately; one the open question
    /// would reject is skipped. Without them the modal stays open until
    /// [`Game::submit_answer`] is called.
    pub fn run_modal(&mut self, questions: Vec<Question>) -> GameResult<()> {
        if questions.is_empty() {
            return Err(InvariantError::EmptyModal.into());
        }
        debug!(target: "core::modal", questions = questions.len(), "modal opened");
        self.state.turn.running = false;
        self.modal.questions = questions;
        self.modal.current = 0;
        self.modal.visible = true;
        self.modal.suspended = false;

        while self.modal.visible {
            let Some(answer) = self.modal.mock_answers.pop_front() else {
                self.modal.suspended = true;
                debug!(target: "core::modal", "waiting for an answer");
                break;
            };
            let accepted = self
                .modal
                .questions
                .get(self.modal.current)
                .is_some_and(|question| question.normalize(&answer).is_some());
            if !accepted {
                warn!(target: "core::modal", answer = %answer, "queued answer skipped");
                continue;
            }
            self.answer_question(&answer)?;
        }
        Ok(())
    }

    /// Asks a yes/no question.
    pub fn confirm(
        &mut self,
        prompt: impl Into<String>,
        continuation: impl FnOnce(&mut Game, &str) -> GameResult<bool> + 'static,
    ) -> GameResult<()> {
        self.run_modal(vec![Question::choice(prompt, ["Yes", "No"], continuation)])
    }

    /// Asks a single free-text question.
    pub fn show_prompt(
        &mut self,
        prompt: impl Into<String>,
        continuation: impl FnOnce(&mut Game, &str) -> GameResult<bool> + 'static,
    ) -> GameResult<()> {
        self.run_modal(vec![Question::text(prompt, continuation)])
    }

    /// Queues answers for the next modal questions.
    pub fn push_mock_answers<I, S>(&mut self, answers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modal
            .mock_answers
            .extend(answers.into_iter().map(Into::into));
    }

    /// Answers the open question from outside, like a command.
    ///
    /// A rejected answer leaves the question open and is reported as
    /// [`TurnOutcome::Rejected`].
    pub fn submit_answer(&mut self, answer: &str) -> Result<TurnOutcome, InvariantError> {
        if !self.modal.visible {
            return Err(InvariantError::NoPendingQuestion);
        }
        self.state.history.push(answer);
        let result = self.answer_question(answer);
        self.settle(result)
    }

    fn answer_question(&mut self, answer: &str) -> GameResult<()> {
        let index = self.modal.current;
        let question = self
            .modal
            .questions
            .get_mut(index)
            .ok_or(InvariantError::NoPendingQuestion)?;
        let Some(answer) = question.normalize(answer) else {
            let choices = question.choices().join(", ");
            return Err(ExecuteError::reject(format!("Please choose one of: {choices}.")));
        };
        question.answer = Some(answer.clone());
        let continuation = question.continuation.take();
        debug!(target: "core::modal", question = index, answer = %answer, "answer submitted");

        let proceed = match continuation {
            Some(continuation) => match continuation(self, &answer) {
                Ok(proceed) => proceed,
                Err(err) => {
                    self.close_modal(false)?;
                    return Err(err);
                }
            },
            None => true,
        };
        self.modal.current += 1;
        if !proceed || self.modal.current >= self.modal.questions.len() {
            let finish_turn = self.modal.suspended;
            self.close_modal(finish_turn)?;
        }
        Ok(())
    }

    /// Hides the modal and restarts the clock while the game is still on.
    fn close_modal(&mut self, finish_turn: bool) -> GameResult<()> {
        self.modal.visible = false;
        self.modal.suspended = false;
        debug!(target: "core::modal", finish_turn, "modal closed");
        if self.state.status == GameStatus::Active {
            self.state.turn.running = true;
            if finish_turn {
                self.tick()?;
            }
        }
        Ok(())
    }
}
