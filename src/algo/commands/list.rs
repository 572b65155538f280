use crate::commands::CmdResult;
use crate::error::{AlgoError, Result};
use crate::model::Difficulty;
use crate::store::problems::{list_problems, ProblemQuery};
use crate::store::Database;
use crate::tags::normalize_tag_names;

pub const MAX_LIMIT: i64 = 100;

/// Raw listing options as typed by the user.
#[derive(Debug, Clone)]
pub struct ListFilter {
    pub title: Option<String>,
    pub difficulty: Option<String>,
    /// Comma separated; a problem matches if it has any of them
    pub tags: Option<String>,
    pub score: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            title: None,
            difficulty: None,
            tags: None,
            score: None,
            limit: MAX_LIMIT,
            offset: 0,
        }
    }
}

impl ListFilter {
    /// Checks paging bounds and normalizes filters. Nothing touches the database here.
    pub fn into_query(self) -> Result<ProblemQuery> {
        if self.limit <= 0 || self.limit > MAX_LIMIT {
            return Err(AlgoError::Validation(format!(
                "limit must be between 1 and {}, got {}",
                MAX_LIMIT, self.limit
            )));
        }
        let offset = u32::try_from(self.offset).map_err(|_| {
            AlgoError::Validation(format!("offset must not be negative, got {}", self.offset))
        })?;

        let difficulty = self
            .difficulty
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::parse::<Difficulty>)
            .transpose()?;

        let score = self
            .score
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u8>().map_err(|_| {
                    AlgoError::Validation(format!("score must be between 0 and 255, got '{}'", s))
                })
            })
            .transpose()?;

        Ok(ProblemQuery {
            title_contains: self
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            difficulty,
            tag_names: self
                .tags
                .as_deref()
                .map(normalize_tag_names)
                .unwrap_or_default(),
            score,
            limit: self.limit as u32,
            offset,
        })
    }
}

pub fn run(db: &Database, filter: ListFilter) -> Result<CmdResult> {
    let query = filter.into_query()?;
    let problems = list_problems(db.conn(), &query)?;
    Ok(CmdResult::default().with_listed_problems(problems))
}
