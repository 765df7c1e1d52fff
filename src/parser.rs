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

use std::path::Path;
use std::path::PathBuf;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::letter::Letter;
use crate::types::question::Question;

/// Parse one quiz file into its questions.
///
/// The format is line-oriented. A line starting with `Question` begins a
/// record, and the following line is the prompt. Lines starting with `A)`
/// through `D)` fill the four choice slots in order of appearance; the label
/// characters themselves are not consulted, so a file with out-of-order
/// labels gets exactly the slot assignment it wrote. `Answer:` carries the
/// correct letter and `Explanation:` closes the record. Anything else is
/// ignored. A trailing record that is never closed is dropped.
///
/// Audio clip paths are derived from the question's 1-based position within
/// the file, under `base_directory`.
pub fn parse_quiz(content: &str, base_directory: &Path) -> Fallible<Vec<Question>> {
    let mut questions = Vec::new();

    let mut lines = content.lines();
    let mut text: Option<String> = None;
    let mut choices: [Option<String>; 4] = [const { None }; 4];
    let mut choice_index: usize = 0;
    let mut answer: Option<Letter> = None;
    let mut ordinal: usize = 0;

    while let Some(line) = lines.next() {
        if line.starts_with("Question") {
            let prompt = match lines.next() {
                Some(prompt) => prompt.trim().to_string(),
                None => {
                    return Err(ErrorReport::new(
                        "file ends after a \"Question\" marker with no prompt line.",
                    ));
                }
            };
            text = Some(prompt);
            choices = [const { None }; 4];
            choice_index = 0;
            answer = None;
            ordinal += 1;
        } else if line.starts_with("A)")
            || line.starts_with("B)")
            || line.starts_with("C)")
            || line.starts_with("D)")
        {
            if choice_index >= 4 {
                return Err(ErrorReport::new(format!(
                    "question {ordinal}: more than four choice lines."
                )));
            }
            choices[choice_index] = Some(line.trim().to_string());
            choice_index += 1;
        } else if line.starts_with("Answer:") {
            let rest = split_marker(line);
            let letter = rest.chars().next().ok_or_else(|| {
                ErrorReport::new(format!("question {ordinal}: \"Answer:\" line has no letter."))
            })?;
            let letter = Letter::from_char(letter).ok_or_else(|| {
                ErrorReport::new(format!(
                    "question {ordinal}: answer {letter:?} is not one of A, B, C, D."
                ))
            })?;
            answer = Some(letter);
        } else if line.starts_with("Explanation:") {
            let explanation = split_marker(line).to_string();
            let question = close_record(
                text.take(),
                &mut choices,
                answer.take(),
                explanation,
                base_directory,
                ordinal,
            )?;
            questions.push(question);
        }
    }

    Ok(questions)
}

/// The remainder of a `Marker: value` line, split on the first colon.
fn split_marker(line: &str) -> &str {
    match line.split_once(':') {
        Some((_, rest)) => rest.trim(),
        None => "",
    }
}

fn close_record(
    text: Option<String>,
    choices: &mut [Option<String>; 4],
    answer: Option<Letter>,
    explanation: String,
    base_directory: &Path,
    ordinal: usize,
) -> Fallible<Question> {
    let text = text.ok_or_else(|| {
        ErrorReport::new(format!(
            "question {ordinal}: \"Explanation:\" line outside a question record."
        ))
    })?;
    let answer = answer.ok_or_else(|| {
        ErrorReport::new(format!("question {ordinal}: no \"Answer:\" line."))
    })?;
    let count = choices.iter().filter(|c| c.is_some()).count();
    if count != 4 {
        return Err(ErrorReport::new(format!(
            "question {ordinal}: expected 4 choices, found {count}."
        )));
    }
    let choices = std::mem::replace(choices, [const { None }; 4]);
    let choices = choices.map(|c| c.unwrap_or_default());
    Ok(Question::new(
        text,
        choices,
        answer,
        explanation,
        question_audio_path(base_directory, ordinal),
        explanation_audio_path(base_directory, ordinal),
    ))
}

fn question_audio_path(base_directory: &Path, ordinal: usize) -> PathBuf {
    base_directory
        .join("audio")
        .join("complete")
        .join(format!("question{ordinal}"))
        .join(format!("question {ordinal}.wav"))
}

fn explanation_audio_path(base_directory: &Path, ordinal: usize) -> PathBuf {
    base_directory
        .join("audio")
        .join("complete")
        .join(format!("question{ordinal}"))
        .join(format!("question {ordinal}(explanation).wav"))
}
