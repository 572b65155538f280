use crate::commands::helpers::{ingest_code, parse_score, provided};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AlgoError, Result};
use crate::model::Difficulty;
use crate::slug::{generate_slug, Transliterate};
use crate::store::problems::{find_problem_by_id, insert_problem, next_problem_id, ProblemRecord};
use crate::store::tags::attach_tags;
use crate::store::Database;
use crate::tags::resolve_tags;
use std::path::{Path, PathBuf};

/// Raw user input for a new problem. Optional fields may be empty.
#[derive(Debug, Clone, Default)]
pub struct NewProblem {
    pub title: String,
    pub difficulty: String,
    /// Comma separated tag names
    pub tags: String,
    pub solution_url: String,
    pub note: String,
    pub description: String,
    /// Source file to copy into the code directory
    pub code_path: Option<PathBuf>,
    /// Parsed leniently: anything outside 0..=255 leaves the score unset
    pub score: String,
}

pub fn run(
    db: &mut Database,
    translit: &dyn Transliterate,
    code_dir: &Path,
    input: NewProblem,
) -> Result<CmdResult> {
    let title = provided(Some(input.title))
        .ok_or_else(|| AlgoError::Validation("Title cannot be empty".into()))?;
    let difficulty: Difficulty = input.difficulty.parse()?;

    let mut result = CmdResult::default();
    let score = parse_score(&input.score);
    if score.is_none() && !input.score.trim().is_empty() {
        log::warn!("ignoring score {:?}", input.score);
        result.add_message(CmdMessage::warning(format!(
            "Score '{}' is not a number in 0-255, leaving it unset",
            input.score.trim()
        )));
    }
    let source = input.code_path.filter(|p| !p.as_os_str().is_empty());

    let problem = db.transaction(|tx| {
        let tags = resolve_tags(tx, &input.tags)?;
        let id = next_problem_id(tx)?;
        let slug = generate_slug(translit, id, &title);

        // Copy the code first: a failed copy must abort before anything is written.
        let code_path = match &source {
            Some(src) => Some(ingest_code(code_dir, &slug, src)?),
            None => None,
        };

        let record = ProblemRecord {
            id,
            title: title.clone(),
            slug,
            difficulty,
            solution_url: input.solution_url.trim().to_string(),
            note: input.note,
            code_path,
            score,
            description: input.description,
        };
        insert_problem(tx, &record)?;
        attach_tags(tx, id, &tags)?;

        find_problem_by_id(tx, id)?.ok_or_else(|| AlgoError::NotFound(record.slug.clone()))
    })?;

    result.add_message(CmdMessage::success(format!(
        "Problem added: {} ({})",
        problem.title, problem.slug
    )));
    Ok(result.with_affected_problems(vec![problem]))
}
