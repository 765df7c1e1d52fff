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

use std::fmt::Display;
use std::fmt::Formatter;

/// A choice label. Every question has exactly four choices, labelled A
/// through D.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    /// Parse a letter from a character, case-insensitively.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            _ => None,
        }
    }

    /// The position of this letter's choice slot.
    pub fn index(self) -> usize {
        match self {
            Letter::A => 0,
            Letter::B => 1,
            Letter::C => 2,
            Letter::D => 3,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::C => 'C',
            Letter::D => 'D',
        }
    }
}

impl Display for Letter {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char() {
        assert_eq!(Letter::from_char('A'), Some(Letter::A));
        assert_eq!(Letter::from_char('b'), Some(Letter::B));
        assert_eq!(Letter::from_char('d'), Some(Letter::D));
        assert_eq!(Letter::from_char('E'), None);
        assert_eq!(Letter::from_char('1'), None);
    }

    #[test]
    fn test_index() {
        assert_eq!(Letter::A.index(), 0);
        assert_eq!(Letter::B.index(), 1);
        assert_eq!(Letter::C.index(), 2);
        assert_eq!(Letter::D.index(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Letter::C.to_string(), "C");
    }
}
