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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use rand::seq::SliceRandom;
use rand::thread_rng;
use walkdir::WalkDir;

use crate::error::Fallible;
use crate::error::fail;
use crate::parser::parse_quiz;
use crate::types::question::Question;

/// A quiz assembled from the user's selection: one or more files, parsed
/// independently and concatenated in selection order.
pub struct Collection {
    /// The quiz's history identity: the file name of the first selected
    /// file. Selections sharing a first file name share history.
    pub quiz_name: String,
    pub questions: Vec<Question>,
    /// One warning per file that was skipped.
    pub warnings: Vec<String>,
}

impl Collection {
    /// Load a quiz from the selected paths. Directories are walked for
    /// `.txt` files in sorted order. A file that cannot be read or parsed
    /// is skipped with a warning; the rest of the selection proceeds. Audio
    /// paths for every file derive from the first file's parent directory.
    pub fn load(paths: &[PathBuf]) -> Fallible<Self> {
        let files = resolve_selection(paths)?;
        let first = match files.first() {
            Some(first) => first,
            None => return fail("no quiz files selected."),
        };
        let quiz_name = match first.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => return fail("first selected path has no file name."),
        };
        let base_directory = first
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();

        let mut questions = Vec::new();
        let mut warnings = Vec::new();
        for file in &files {
            let content = match read_to_string(file) {
                Ok(content) => content,
                Err(e) => {
                    warnings.push(format!("skipping {}: {e}", file.display()));
                    continue;
                }
            };
            // Question ordinals (and audio paths) restart at 1 per file.
            match parse_quiz(&content, &base_directory) {
                Ok(parsed) => {
                    log::debug!("{}: {} questions.", file.display(), parsed.len());
                    questions.extend(parsed);
                }
                Err(e) => {
                    warnings.push(format!("skipping {}: {e}", file.display()));
                }
            }
        }

        Ok(Self {
            quiz_name,
            questions,
            warnings,
        })
    }
}

/// Expand the selection: files stand as given, directories are walked for
/// `.txt` files, sorted so the order is stable.
fn resolve_selection(paths: &[PathBuf]) -> Fallible<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(path) {
                let entry = entry?;
                let entry_path = entry.path();
                if entry_path.is_file() && entry_path.extension().is_some_and(|ext| ext == "txt") {
                    found.push(entry_path.to_path_buf());
                }
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// Shuffle the question order in place. Fresh ordering per call, no
/// determinism guarantee.
pub fn shuffle(questions: &mut [Question]) {
    questions.shuffle(&mut thread_rng());
}
