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
use std::path::Path;

use rusqlite::Connection;
use rusqlite::Transaction;

use crate::error::Fallible;
use crate::types::timestamp::Timestamp;

/// Each quiz keeps at most this many past scores.
const HISTORY_CAP: usize = 5;

/// Performance history: an ordered mapping from quiz name to the last few
/// attempt scores, oldest first. An explicitly owned value; load it at
/// startup, record into it on completion, save it back.
pub struct HistoryStore {
    /// Quiz names in first-recorded order, each with its capped entries.
    quizzes: Vec<(String, Vec<Entry>)>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Entry {
    pub score: f64,
    pub recorded_at: Timestamp,
}

/// One row of a quiz's trend listing.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TrendEntry {
    pub score: f64,
    pub recorded_at: Timestamp,
    /// Change relative to the previous entry. The first entry has none.
    pub delta: Option<Delta>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Delta {
    /// Absolute percentage change relative to the previous score.
    pub percent: f64,
    pub direction: Direction,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Improvement,
    Decline,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Direction::Improvement => write!(f, "improvement"),
            Direction::Decline => write!(f, "decline"),
        }
    }
}

impl HistoryStore {
    pub fn empty() -> Self {
        Self {
            quizzes: Vec::new(),
        }
    }

    /// Load the history from the backing store. A missing or unreadable
    /// store is an empty history, never an error.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("no quiz history at {}.", path.display());
            return Self::empty();
        }
        match read_store(path) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("could not read quiz history ({e}); starting with an empty history.");
                Self::empty()
            }
        }
    }

    /// Write the full mapping back, inside one transaction: either the new
    /// state commits or the previous durable state stays.
    pub fn save(&self, path: &Path) -> Fallible<()> {
        let mut conn = Connection::open(path)?;
        let tx = conn.transaction()?;
        if !probe_schema_exists(&tx)? {
            tx.execute_batch(include_str!("schema.sql"))?;
        }
        tx.execute("delete from history;", [])?;
        for (quiz_name, entries) in &self.quizzes {
            for (seq, entry) in entries.iter().enumerate() {
                tx.execute(
                    "insert into history (quiz_name, seq, score, recorded_at) values (?, ?, ?, ?);",
                    (quiz_name, seq as i64, entry.score, entry.recorded_at),
                )?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Append a score to a quiz's history, evicting the oldest entry once
    /// the quiz already holds five.
    pub fn record(&mut self, quiz_name: &str, percentage: f64) {
        let entry = Entry {
            score: percentage,
            recorded_at: Timestamp::now(),
        };
        let index = match self.quizzes.iter().position(|(name, _)| name == quiz_name) {
            Some(index) => index,
            None => {
                self.quizzes.push((quiz_name.to_string(), Vec::new()));
                self.quizzes.len() - 1
            }
        };
        let entries = &mut self.quizzes[index].1;
        if entries.len() == HISTORY_CAP {
            entries.remove(0);
        }
        entries.push(entry);
    }

    /// A quiz's entries with the change relative to each previous entry.
    pub fn trend(&self, quiz_name: &str) -> Vec<TrendEntry> {
        let entries = match self.quizzes.iter().find(|(name, _)| name == quiz_name) {
            Some((_, entries)) => entries,
            None => return Vec::new(),
        };
        let mut trend = Vec::with_capacity(entries.len());
        let mut prev: Option<f64> = None;
        for entry in entries {
            let delta = prev.map(|prev| Delta {
                percent: ((entry.score - prev) / prev * 100.0).abs(),
                direction: if entry.score >= prev {
                    Direction::Improvement
                } else {
                    Direction::Decline
                },
            });
            trend.push(TrendEntry {
                score: entry.score,
                recorded_at: entry.recorded_at,
                delta,
            });
            prev = Some(entry.score);
        }
        trend
    }

    #[cfg(test)]
    pub fn scores(&self, quiz_name: &str) -> Vec<f64> {
        match self.quizzes.iter().find(|(name, _)| name == quiz_name) {
            Some((_, entries)) => entries.iter().map(|e| e.score).collect(),
            None => Vec::new(),
        }
    }
}

fn read_store(path: &Path) -> Fallible<HistoryStore> {
    let conn = Connection::open(path)?;
    let mut store = HistoryStore::empty();
    {
        let mut stmt =
            conn.prepare("select quiz_name, score, recorded_at from history order by rowid;")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let quiz_name: String = row.get(0)?;
            let score: f64 = row.get(1)?;
            let recorded_at: Timestamp = row.get(2)?;
            let entry = Entry { score, recorded_at };
            match store
                .quizzes
                .iter_mut()
                .find(|(name, _)| *name == quiz_name)
            {
                Some((_, entries)) => entries.push(entry),
                None => store.quizzes.push((quiz_name, vec![entry])),
            }
        }
    }
    Ok(store)
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' and name=?;";
    let count: i64 = tx.query_row(sql, ["history"], |row| row.get(0))?;
    Ok(count > 0)
}
