// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::Fallible;
use crate::error::fail;
use crate::timer::Countdown;
use crate::timer::Tick;
use crate::types::letter::Letter;
use crate::types::question::Question;

/// One run through an ordered question list.
///
/// A question is presented, then locked by either an explicit submission or
/// a timeout (whichever happens first; the other becomes a no-op), then the
/// session advances. After the last question the session is complete and can
/// produce a fresh sub-session over the questions answered incorrectly.
pub struct QuizSession {
    questions: Vec<Question>,
    /// Index of the current question. Equal to `questions.len()` once the
    /// session is complete.
    position: usize,
    /// One recorded answer per completed question, in question order. `None`
    /// is a timeout with nothing selected.
    answers: Vec<Option<Letter>>,
    /// Questions answered incorrectly this attempt, in their original
    /// relative order.
    incorrect: Vec<Question>,
    correct_count: usize,
    /// The selection staged for the current question, if any.
    staged: Option<Letter>,
    /// Per-question time budget in seconds.
    budget: u32,
    countdown: Countdown,
    phase: Phase,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    Presenting,
    Locked,
    Complete,
}

/// What the caller renders after a question locks.
#[derive(Clone, Debug)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    /// The recorded answer. `None` is a timeout with nothing selected.
    pub chosen: Option<Letter>,
    pub correct: Letter,
    /// The correct choice's text, label stripped.
    pub correct_text: String,
    pub explanation: String,
}

/// The result of advancing past a locked question.
pub enum Progress {
    Next,
    Complete(SessionSummary),
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SessionSummary {
    pub correct_count: usize,
    pub total: usize,
    pub percentage: f64,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>, budget: u32) -> Self {
        let phase = if questions.is_empty() {
            Phase::Complete
        } else {
            Phase::Presenting
        };
        Self {
            questions,
            position: 0,
            answers: Vec::new(),
            incorrect: Vec::new(),
            correct_count: 0,
            staged: None,
            budget,
            countdown: Countdown::new(),
            phase,
        }
    }

    /// Present the current question, (re)starting its countdown. Only one
    /// countdown is ever live; presenting replaces the previous one.
    pub fn present(&mut self) -> Fallible<&Question> {
        if self.phase != Phase::Presenting {
            return fail("no question to present.");
        }
        self.countdown.start(self.budget);
        Ok(&self.questions[self.position])
    }

    /// Stage a choice for the current question. Staging again overwrites.
    pub fn select(&mut self, letter: Letter) -> Fallible<()> {
        if self.phase != Phase::Presenting {
            return fail("no question is being presented.");
        }
        self.staged = Some(letter);
        Ok(())
    }

    pub fn staged(&self) -> Option<Letter> {
        self.staged
    }

    /// Submit the staged selection. With nothing staged the answer is
    /// recorded as no-answer, which is always incorrect.
    pub fn submit(&mut self) -> Fallible<AnswerOutcome> {
        if self.phase != Phase::Presenting {
            return fail("the current question is already locked.");
        }
        let chosen = self.staged.take();
        Ok(self.lock(chosen))
    }

    /// The countdown expired. Equivalent to submitting whatever is staged
    /// (or nothing). Returns `None` if the question was already locked by an
    /// explicit submission.
    pub fn timeout(&mut self) -> Option<AnswerOutcome> {
        if self.phase != Phase::Presenting {
            return None;
        }
        let chosen = self.staged.take();
        Some(self.lock(chosen))
    }

    fn lock(&mut self, chosen: Option<Letter>) -> AnswerOutcome {
        let question = &self.questions[self.position];
        let is_correct = chosen == Some(question.correct());
        self.answers.push(chosen);
        if is_correct {
            self.correct_count += 1;
        } else {
            self.incorrect.push(question.clone());
        }
        let outcome = AnswerOutcome {
            is_correct,
            chosen,
            correct: question.correct(),
            correct_text: extract_answer_text(question.correct().as_char(), question.choices()),
            explanation: question.explanation().to_string(),
        };
        self.countdown.cancel();
        self.phase = Phase::Locked;
        outcome
    }

    /// Move past a locked question.
    pub fn advance(&mut self) -> Fallible<Progress> {
        if self.phase != Phase::Locked {
            return fail("the current question is not locked.");
        }
        self.position += 1;
        if self.position == self.questions.len() {
            self.phase = Phase::Complete;
            Ok(Progress::Complete(self.summary()))
        } else {
            self.phase = Phase::Presenting;
            Ok(Progress::Next)
        }
    }

    /// Build a fresh session over this attempt's incorrect questions, in
    /// their original relative order. The full-attempt list is left alone.
    pub fn retry_incorrect(&self) -> Fallible<QuizSession> {
        if self.phase != Phase::Complete {
            return fail("the session is not complete.");
        }
        if self.incorrect.is_empty() {
            return fail("there are no incorrect questions to retry.");
        }
        Ok(QuizSession::new(self.incorrect.clone(), self.budget))
    }

    /// Tick the countdown by one second. The caller decides when a second
    /// has passed.
    pub fn tick(&mut self) -> Tick {
        self.countdown.tick()
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.countdown.remaining()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<Letter>] {
        &self.answers
    }

    pub fn incorrect(&self) -> &[Question] {
        &self.incorrect
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// Score of this attempt, against this attempt's question list.
    pub fn percentage(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.correct_count as f64 / self.questions.len() as f64 * 100.0
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct_count: self.correct_count,
            total: self.questions.len(),
            percentage: self.percentage(),
        }
    }
}

/// A choice's text with its leading label (`"X) "`, three characters)
/// stripped. An unknown letter yields an empty string.
pub fn extract_answer_text(letter: char, choices: &[String; 4]) -> String {
    match Letter::from_char(letter) {
        Some(letter) => {
            let choice = &choices[letter.index()];
            choice.get(3..).unwrap_or("").to_string()
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn question(text: &str, correct: Letter) -> Question {
        Question::new(
            text.to_string(),
            [
                "A) 3".to_string(),
                "B) 4".to_string(),
                "C) 5".to_string(),
                "D) 6".to_string(),
            ],
            correct,
            format!("because of {text}"),
            PathBuf::from("q.wav"),
            PathBuf::from("e.wav"),
        )
    }

    fn two_question_session() -> QuizSession {
        QuizSession::new(
            vec![question("first", Letter::B), question("second", Letter::C)],
            15,
        )
    }

    #[test]
    fn test_present_starts_the_countdown() {
        let mut session = two_question_session();
        assert_eq!(session.remaining_seconds(), None);
        let q = session.present().unwrap();
        assert_eq!(q.text(), "first");
        assert_eq!(session.remaining_seconds(), Some(15));
    }

    #[test]
    fn test_submit_correct_answer() {
        let mut session = two_question_session();
        session.present().unwrap();
        session.select(Letter::B).unwrap();
        let outcome = session.submit().unwrap();
        assert!(outcome.is_correct);
        assert_eq!(outcome.chosen, Some(Letter::B));
        assert_eq!(outcome.correct, Letter::B);
        assert_eq!(outcome.correct_text, "4");
        assert_eq!(outcome.explanation, "because of first");
        assert_eq!(session.correct_count(), 1);
        assert!(session.incorrect().is_empty());
    }

    #[test]
    fn test_submit_incorrect_answer() {
        let mut session = two_question_session();
        session.present().unwrap();
        session.select(Letter::A).unwrap();
        let outcome = session.submit().unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.incorrect().len(), 1);
        assert_eq!(session.incorrect()[0].text(), "first");
    }

    #[test]
    fn test_submit_with_nothing_staged_is_incorrect() {
        let mut session = two_question_session();
        session.present().unwrap();
        let outcome = session.submit().unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.chosen, None);
        assert_eq!(session.answers(), &[None]);
        assert_eq!(session.incorrect().len(), 1);
    }

    #[test]
    fn test_reselection_overwrites() {
        let mut session = two_question_session();
        session.present().unwrap();
        session.select(Letter::A).unwrap();
        session.select(Letter::B).unwrap();
        let outcome = session.submit().unwrap();
        assert!(outcome.is_correct);
    }

    #[test]
    fn test_timeout_uses_the_staged_selection() {
        let mut session = two_question_session();
        session.present().unwrap();
        session.select(Letter::B).unwrap();
        let outcome = session.timeout().unwrap();
        assert!(outcome.is_correct);
        assert_eq!(session.answers(), &[Some(Letter::B)]);
    }

    #[test]
    fn test_timeout_after_submission_is_a_noop() {
        let mut session = two_question_session();
        session.present().unwrap();
        session.select(Letter::B).unwrap();
        session.submit().unwrap();
        assert!(session.timeout().is_none());
        assert_eq!(session.answers().len(), 1);
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn test_submission_after_lock_is_an_error() {
        let mut session = two_question_session();
        session.present().unwrap();
        session.submit().unwrap();
        assert!(session.submit().is_err());
    }

    #[test]
    fn test_submission_cancels_the_countdown() {
        let mut session = two_question_session();
        session.present().unwrap();
        session.submit().unwrap();
        assert_eq!(session.remaining_seconds(), None);
        assert_eq!(session.tick(), Tick::Idle);
    }

    #[test]
    fn test_countdown_expiry_locks_the_question() {
        let mut session = QuizSession::new(vec![question("first", Letter::B)], 2);
        session.present().unwrap();
        assert_eq!(session.tick(), Tick::Running(1));
        assert_eq!(session.tick(), Tick::Expired);
        let outcome = session.timeout().unwrap();
        assert!(!outcome.is_correct);
    }

    #[test]
    fn test_advance_before_lock_is_an_error() {
        let mut session = two_question_session();
        session.present().unwrap();
        assert!(session.advance().is_err());
    }

    #[test]
    fn test_advance_through_to_completion() {
        let mut session = two_question_session();
        session.present().unwrap();
        session.select(Letter::B).unwrap();
        session.submit().unwrap();
        assert!(matches!(session.advance().unwrap(), Progress::Next));
        session.present().unwrap();
        session.timeout().unwrap();
        match session.advance().unwrap() {
            Progress::Complete(summary) => {
                assert_eq!(summary.correct_count, 1);
                assert_eq!(summary.total, 2);
                assert_eq!(summary.percentage, 50.0);
            }
            Progress::Next => panic!("expected completion"),
        }
        assert!(session.is_complete());
        assert_eq!(session.incorrect().len(), 1);
        assert_eq!(session.incorrect()[0].text(), "second");
    }

    #[test]
    fn test_correct_count_matches_matching_submissions() {
        let questions = vec![
            question("q1", Letter::A),
            question("q2", Letter::B),
            question("q3", Letter::C),
        ];
        let picks = [Letter::A, Letter::D, Letter::C];
        let mut session = QuizSession::new(questions, 15);
        for pick in picks {
            session.present().unwrap();
            session.select(pick).unwrap();
            session.submit().unwrap();
            session.advance().unwrap();
        }
        assert_eq!(session.correct_count(), 2);
        assert_eq!(session.answers().len(), 3);
    }

    #[test]
    fn test_empty_question_list_is_complete_with_zero_percentage() {
        let session = QuizSession::new(Vec::new(), 15);
        assert!(session.is_complete());
        assert_eq!(session.percentage(), 0.0);
    }

    #[test]
    fn test_present_when_complete_is_an_error() {
        let mut session = QuizSession::new(Vec::new(), 15);
        assert!(session.present().is_err());
    }

    #[test]
    fn test_retry_before_completion_is_an_error() {
        let session = two_question_session();
        assert!(session.retry_incorrect().is_err());
    }

    #[test]
    fn test_retry_with_nothing_incorrect_is_an_error() {
        let mut session = QuizSession::new(vec![question("only", Letter::B)], 15);
        session.present().unwrap();
        session.select(Letter::B).unwrap();
        session.submit().unwrap();
        session.advance().unwrap();
        assert!(session.retry_incorrect().is_err());
    }

    #[test]
    fn test_retry_holds_incorrect_questions_in_original_order() {
        let questions = vec![
            question("q1", Letter::A),
            question("q2", Letter::B),
            question("q3", Letter::C),
        ];
        let mut session = QuizSession::new(questions, 15);
        // Miss q1 and q3, get q2 right.
        let picks = [Letter::B, Letter::B, Letter::A];
        for pick in picks {
            session.present().unwrap();
            session.select(pick).unwrap();
            session.submit().unwrap();
            session.advance().unwrap();
        }
        let retry = session.retry_incorrect().unwrap();
        assert_eq!(retry.questions().len(), 2);
        assert_eq!(retry.questions()[0].text(), "q1");
        assert_eq!(retry.questions()[1].text(), "q3");
        assert_eq!(retry.correct_count(), 0);
        assert!(retry.answers().is_empty());
        assert!(retry.incorrect().is_empty());
    }

    #[test]
    fn test_retry_completed_perfectly_leaves_incorrect_empty() {
        let mut session = two_question_session();
        // Miss both.
        for _ in 0..2 {
            session.present().unwrap();
            session.select(Letter::D).unwrap();
            session.submit().unwrap();
            session.advance().unwrap();
        }
        let mut retry = session.retry_incorrect().unwrap();
        let corrects = [Letter::B, Letter::C];
        for correct in corrects {
            retry.present().unwrap();
            retry.select(correct).unwrap();
            retry.submit().unwrap();
            retry.advance().unwrap();
        }
        assert!(retry.is_complete());
        assert!(retry.incorrect().is_empty());
        // Score is relative to the retried subset.
        assert_eq!(retry.percentage(), 100.0);
    }

    #[test]
    fn test_extract_answer_text() {
        let choices = [
            "A) 3".to_string(),
            "B) 4".to_string(),
            "C) 5".to_string(),
            "D) 6".to_string(),
        ];
        assert_eq!(extract_answer_text('B', &choices), "4");
        assert_eq!(extract_answer_text('b', &choices), "4");
        assert_eq!(extract_answer_text('X', &choices), "");
    }

    #[test]
    fn test_extract_answer_text_with_short_choice() {
        let choices = [
            "A)".to_string(),
            "B) 4".to_string(),
            "C) 5".to_string(),
            "D) 6".to_string(),
        ];
        assert_eq!(extract_answer_text('A', &choices), "");
    }
}
