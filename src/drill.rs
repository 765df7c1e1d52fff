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

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use blake3::Hash;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::io::Lines;
use tokio::io::Stdin;
use tokio::time::interval;

use crate::audio::AudioPlayer;
use crate::collection::Collection;
use crate::collection::shuffle;
use crate::config::Config;
use crate::error::Fallible;
use crate::history::HistoryStore;
use crate::session::AnswerOutcome;
use crate::session::Progress;
use crate::session::QuizSession;
use crate::session::SessionSummary;
use crate::session::extract_answer_text;
use crate::timer::Tick;
use crate::types::letter::Letter;

type Input = Lines<BufReader<Stdin>>;

/// Run a quiz from the selected files: one cooperative loop over stdin
/// lines and a one-second tick. Typing a letter stages a choice; an empty
/// line submits it; the countdown submits on expiry. After the attempt the
/// score goes into the history and the incorrect questions can be retried.
pub async fn drill(paths: Vec<PathBuf>, config: Config) -> Fallible<()> {
    let collection = Collection::load(&paths)?;
    for warning in &collection.warnings {
        log::warn!("{warning}");
    }
    let quiz_name = collection.quiz_name;
    let mut questions = collection.questions;
    if questions.is_empty() {
        println!("No questions found.");
        return Ok(());
    }
    if config.shuffle {
        shuffle(&mut questions);
    }
    println!("Drilling {} ({} questions).", quiz_name, questions.len());

    let mut audio = AudioPlayer::new(config.audio_player.clone());
    let mut history = HistoryStore::load(&config.history_path);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let mut session = QuizSession::new(questions, config.seconds_per_question);
    loop {
        let summary = run_attempt(&mut session, &mut input, &mut audio).await?;
        audio.stop();

        log::debug!(
            "attempt finished: {} correct of {}.",
            session.correct_count(),
            session.questions().len()
        );
        println!();
        println!("Quiz complete!");
        println!("Correct answers: {} of {}", summary.correct_count, summary.total);
        println!("Your score: {:.2}%", summary.percentage);

        history.record(&quiz_name, summary.percentage);
        if let Err(e) = history.save(&config.history_path) {
            log::warn!("could not save quiz history: {e}");
        }
        println!();
        print_trend(&history, &quiz_name);

        if session.incorrect().is_empty() {
            break;
        }
        if !confirm_retry(&mut input).await? {
            break;
        }
        session = session.retry_incorrect()?;
    }

    if session.is_complete() {
        print_review(&session);
    }
    Ok(())
}

/// Drive one attempt from its first question to completion.
async fn run_attempt(
    session: &mut QuizSession,
    input: &mut Input,
    audio: &mut AudioPlayer,
) -> Fallible<SessionSummary> {
    loop {
        let question = session.present()?.clone();
        println!();
        println!(
            "Question {} of {} ({} seconds):",
            session.answers().len() + 1,
            session.questions().len(),
            session.remaining_seconds().unwrap_or(0),
        );
        println!("{}", question.text());
        for choice in question.choices() {
            println!("  {choice}");
        }
        audio.play(question.question_audio());

        let outcome = wait_for_lock(session, input).await?;
        audio.play(question.explanation_audio());
        render_outcome(&outcome);

        wait_for_enter(input).await?;
        audio.stop();
        match session.advance()? {
            Progress::Next => {}
            Progress::Complete(summary) => return Ok(summary),
        }
    }
}

/// Read input until the current question locks, ticking the countdown once
/// per second. The first lock wins: an explicit submission cancels the
/// countdown, an expiry submits whatever is staged.
async fn wait_for_lock(session: &mut QuizSession, input: &mut Input) -> Fallible<AnswerOutcome> {
    let mut ticker = interval(Duration::from_secs(1));
    // The first tick completes immediately; a second has not passed yet.
    ticker.tick().await;
    loop {
        tokio::select! {
            line = input.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    // Stdin is gone; submit what we have.
                    None => return session.submit(),
                };
                let line = line.trim();
                if line.is_empty() {
                    if session.staged().is_none() {
                        println!("Select an answer first.");
                    } else {
                        return session.submit();
                    }
                } else {
                    match parse_letter(line) {
                        Some(letter) => {
                            session.select(letter)?;
                            println!("Selected {letter}. Press Enter to submit.");
                        }
                        None => {
                            println!("Type A, B, C or D.");
                        }
                    }
                }
            }
            _ = ticker.tick() => {
                match session.tick() {
                    Tick::Expired => {
                        println!("Time's up!");
                        if let Some(outcome) = session.timeout() {
                            return Ok(outcome);
                        }
                    }
                    Tick::Running(remaining) => {
                        if remaining <= 5 {
                            println!("{remaining} seconds left.");
                        }
                    }
                    Tick::Idle => {}
                }
            }
        }
    }
}

fn parse_letter(input: &str) -> Option<Letter> {
    let mut chars = input.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Letter::from_char(c)
}

fn render_outcome(outcome: &AnswerOutcome) {
    println!();
    if outcome.is_correct {
        println!("Correct!");
    } else {
        match outcome.chosen {
            Some(letter) => println!("Incorrect! You answered {letter}."),
            None => println!("Incorrect! No answer was given."),
        }
        println!(
            "The correct answer was: {}) {}",
            outcome.correct, outcome.correct_text
        );
    }
    println!("Explanation: {}", outcome.explanation);
}

async fn wait_for_enter(input: &mut Input) -> Fallible<()> {
    println!("Press Enter to continue.");
    let _ = input.next_line().await?;
    Ok(())
}

async fn confirm_retry(input: &mut Input) -> Fallible<bool> {
    println!();
    println!("Retry the incorrect questions? [y/N]");
    match input.next_line().await? {
        Some(line) => Ok(matches!(line.trim(), "y" | "Y" | "yes" | "Yes")),
        None => Ok(false),
    }
}

/// Print a quiz's stored scores, oldest first, each with its change
/// relative to the previous attempt.
pub fn print_trend(history: &HistoryStore, quiz_name: &str) {
    let trend = history.trend(quiz_name);
    if trend.is_empty() {
        println!("No performance history available.");
        return;
    }
    println!("Performance history for {quiz_name}:");
    for entry in trend {
        match entry.delta {
            Some(delta) => println!(
                "  {}  {:6.2}%  ({:.2}% {})",
                entry.recorded_at, entry.score, delta.percent, delta.direction
            ),
            None => println!("  {}  {:6.2}%", entry.recorded_at, entry.score),
        }
    }
}

/// The last attempt, question by question: the correct answer, the
/// recorded answer, the explanation.
fn print_review(session: &QuizSession) {
    let incorrect: HashSet<Hash> = session.incorrect().iter().map(|q| q.hash()).collect();
    println!();
    println!("Review:");
    for (i, question) in session.questions().iter().enumerate() {
        println!();
        println!("Question {}: {}", i + 1, question.text());
        println!(
            "  Correct answer: {}) {}",
            question.correct(),
            extract_answer_text(question.correct().as_char(), question.choices())
        );
        let answer = session.answers().get(i).copied().flatten();
        match answer {
            Some(letter) => {
                let verdict = if incorrect.contains(&question.hash()) {
                    "incorrect"
                } else {
                    "correct"
                };
                println!(
                    "  Your answer: {}) {} ({verdict})",
                    letter,
                    extract_answer_text(letter.as_char(), question.choices())
                );
            }
            None => {
                println!("  Your answer: none (timed out)");
            }
        }
        println!("  Explanation: {}", question.explanation());
    }
}
