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

use serde::Deserialize;

use crate::error::Fallible;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "quizdrill.toml";

/// Settings from the optional `quizdrill.toml`. Command-line flags override
/// these; these override the built-in defaults.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Time budget per question, in seconds.
    #[serde(default = "default_seconds_per_question")]
    pub seconds_per_question: u32,
    /// Whether to shuffle the question order before drilling.
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    /// Where the performance history lives.
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,
    /// External command used to play audio clips. No command, no audio.
    #[serde(default)]
    pub audio_player: Option<String>,
}

fn default_seconds_per_question() -> u32 {
    15
}

fn default_shuffle() -> bool {
    true
}

fn default_history_path() -> PathBuf {
    PathBuf::from("quiz_history.db")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seconds_per_question: default_seconds_per_question(),
            shuffle: default_shuffle(),
            history_path: default_history_path(),
            audio_player: None,
        }
    }
}

impl Config {
    /// Load the configuration. An explicitly given path must be readable;
    /// the default file is used only if present.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        let path = match path {
            Some(path) => path,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };
        let content = read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.seconds_per_question, 15);
        assert!(config.shuffle);
        assert_eq!(config.history_path, PathBuf::from("quiz_history.db"));
        assert!(config.audio_player.is_none());
    }

    #[test]
    fn test_full_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quizdrill.toml");
        write(
            &path,
            "seconds_per_question = 30\nshuffle = false\nhistory_path = \"scores.db\"\naudio_player = \"aplay\"\n",
        )
        .unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.seconds_per_question, 30);
        assert!(!config.shuffle);
        assert_eq!(config.history_path, PathBuf::from("scores.db"));
        assert_eq!(config.audio_player.as_deref(), Some("aplay"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quizdrill.toml");
        write(&path, "seconds_per_question = 60\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.seconds_per_question, 60);
        assert!(config.shuffle);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quizdrill.toml");
        write(&path, "seconds_per_question = \"soon\"\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("derpherp.toml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
