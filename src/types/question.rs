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

use std::path::PathBuf;

use blake3::Hash;
use blake3::Hasher;

use crate::types::letter::Letter;

/// One multiple-choice question, immutable once parsed.
#[derive(Clone)]
pub struct Question {
    /// The prompt.
    text: String,
    /// The four choices, each stored verbatim with its leading label
    /// (e.g. "A) 4"). Order is fixed at parse time.
    choices: [String; 4],
    /// The correct choice.
    correct: Letter,
    /// The explanation shown after the question is answered.
    explanation: String,
    /// Path to the question's audio clip. Never dereferenced here; the
    /// audio player owns playback.
    question_audio: PathBuf,
    /// Path to the explanation's audio clip.
    explanation_audio: PathBuf,
    /// The cached hash of the question's content.
    hash: Hash,
}

impl Question {
    pub fn new(
        text: String,
        choices: [String; 4],
        correct: Letter,
        explanation: String,
        question_audio: PathBuf,
        explanation_audio: PathBuf,
    ) -> Self {
        let hash = content_hash(&text, &choices, correct, &explanation);
        Self {
            text,
            choices,
            correct,
            explanation,
            question_audio,
            explanation_audio,
            hash,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn choices(&self) -> &[String; 4] {
        &self.choices
    }

    pub fn correct(&self) -> Letter {
        self.correct
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn question_audio(&self) -> &PathBuf {
        &self.question_audio
    }

    pub fn explanation_audio(&self) -> &PathBuf {
        &self.explanation_audio
    }

    /// The question's identity: a hash of its content.
    pub fn hash(&self) -> Hash {
        self.hash
    }
}

fn content_hash(text: &str, choices: &[String; 4], correct: Letter, explanation: &str) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(text.as_bytes());
    for choice in choices {
        hasher.update(choice.as_bytes());
    }
    hasher.update(&[correct.as_char() as u8]);
    hasher.update(explanation.as_bytes());
    hasher.finalize()
}
