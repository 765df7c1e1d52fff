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

/// A countdown over a per-question time budget. The countdown does not keep
/// time itself: the caller ticks it, once per second, from whatever loop it
/// runs. At most one countdown is live per session; starting it again
/// replaces the previous deadline.
pub struct Countdown {
    remaining: Option<u32>,
}

/// The result of one tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tick {
    /// No countdown is running.
    Idle,
    /// Seconds left until expiry.
    Running(u32),
    /// The budget ran out on this tick. Fires at most once per start.
    Expired,
}

impl Countdown {
    pub fn new() -> Self {
        Self { remaining: None }
    }

    /// Start (or restart) the countdown at the given budget in seconds.
    pub fn start(&mut self, budget: u32) {
        self.remaining = Some(budget);
    }

    /// Stop the countdown without firing.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Count down by one second.
    pub fn tick(&mut self) -> Tick {
        match self.remaining {
            None => Tick::Idle,
            Some(r) => {
                let r = r.saturating_sub(1);
                if r == 0 {
                    self.remaining = None;
                    Tick::Expired
                } else {
                    self.remaining = Some(r);
                    Tick::Running(r)
                }
            }
        }
    }
}
