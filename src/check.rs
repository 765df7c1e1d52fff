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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;

/// Parse the selection and report what it contains, without drilling.
pub fn check_quiz(paths: &[PathBuf]) -> Fallible<()> {
    let collection = Collection::load(paths)?;
    for warning in &collection.warnings {
        log::warn!("{warning}");
    }
    println!("ok: {} questions.", collection.questions.len());
    if !collection.warnings.is_empty() {
        return fail("some files were skipped.");
    }
    Ok(())
}
