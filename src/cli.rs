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

use clap::Parser;

use crate::check::check_quiz;
use crate::config::Config;
use crate::drill::drill;
use crate::drill::print_trend;
use crate::error::Fallible;
use crate::history::HistoryStore;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Run a quiz.
    Drill {
        /// Quiz files, or directories to scan for .txt files.
        paths: Vec<PathBuf>,
        /// Seconds allowed per question.
        #[arg(long)]
        time: Option<u32>,
        /// Keep the questions in file order.
        #[arg(long)]
        no_shuffle: bool,
        /// Path to a configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Parse quiz files and report what they contain.
    Check {
        /// Quiz files, or directories to scan for .txt files.
        paths: Vec<PathBuf>,
    },
    /// Show the stored performance trend for a quiz.
    History {
        /// The quiz name: the file name of the quiz's first selected file.
        quiz_name: String,
        /// Path to a configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            paths,
            time,
            no_shuffle,
            config,
        } => {
            let mut config = Config::load(config.as_deref())?;
            if let Some(time) = time {
                config.seconds_per_question = time;
            }
            if no_shuffle {
                config.shuffle = false;
            }
            drill(paths, config).await
        }
        Command::Check { paths } => check_quiz(&paths),
        Command::History { quiz_name, config } => {
            let config = Config::load(config.as_deref())?;
            let history = HistoryStore::load(&config.history_path);
            print_trend(&history, &quiz_name);
            Ok(())
        }
    }
}
