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
use std::process::Stdio;

use tokio::process::Child;
use tokio::process::Command;

/// Plays question and explanation clips through an external player command,
/// fire and forget. The engine never waits on playback and never checks
/// whether a clip exists; a clip that fails to start is logged and dropped.
pub struct AudioPlayer {
    /// The player command. With no command, play requests are silently
    /// ignored.
    command: Option<String>,
    current: Option<Child>,
}

impl AudioPlayer {
    pub fn new(command: Option<String>) -> Self {
        Self {
            command,
            current: None,
        }
    }

    /// Start a clip, stopping whatever is still playing.
    pub fn play(&mut self, clip: &Path) {
        self.stop();
        let command = match &self.command {
            Some(command) => command,
            None => return,
        };
        let spawned = Command::new(command)
            .arg(clip)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();
        match spawned {
            Ok(child) => {
                log::debug!("playing {}.", clip.display());
                self.current = Some(child);
            }
            Err(e) => {
                log::warn!("could not play {}: {e}", clip.display());
            }
        }
    }

    /// Stop the clip currently playing, if any.
    pub fn stop(&mut self) {
        if let Some(mut child) = self.current.take() {
            let _ = child.start_kill();
        }
    }
}
