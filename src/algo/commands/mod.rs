//! # Command Layer
//!
//! One module per operation. Each `run` takes its collaborators explicitly
//! (database, transliterator, target directories, renderer) and returns a
//! [`CmdResult`]: the records it touched plus user facing messages. Nothing in
//! here prints.
//!
//! Every mutation runs inside a single [`Database::transaction`]; a failure at
//! any step, including copying or deleting a code file, rolls back all of it.
//!
//! [`Database::transaction`]: crate::store::Database::transaction

use crate::model::{Problem, Tag};
use std::path::PathBuf;

pub mod add;
pub mod contest;
pub mod edit;
pub mod generate;
pub mod helpers;
pub mod list;
pub mod remove;
pub mod tags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_problems: Vec<Problem>,
    pub listed_problems: Vec<Problem>,
    pub tag_counts: Vec<(Tag, usize)>,
    pub written_paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_problems(mut self, problems: Vec<Problem>) -> Self {
        self.affected_problems = problems;
        self
    }

    pub fn with_listed_problems(mut self, problems: Vec<Problem>) -> Self {
        self.listed_problems = problems;
        self
    }

    pub fn with_tag_counts(mut self, counts: Vec<(Tag, usize)>) -> Self {
        self.tag_counts = counts;
        self
    }

    pub fn with_written_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.written_paths = paths;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
