use crate::commands::helpers::{ingest_code, load_by_slug, parse_score, provided};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AlgoError, Result};
use crate::model::Difficulty;
use crate::slug::{generate_slug, Transliterate};
use crate::store::problems::{find_problem_by_id, update_problem, ProblemRecord};
use crate::store::tags::{attach_tags, clear_problem_tags, prune_orphan_tags};
use crate::store::Database;
use crate::tags::resolve_tags;
use std::path::{Path, PathBuf};

/// Partial update. `None` and blank values leave the field as it is.
#[derive(Debug, Clone, Default)]
pub struct ProblemUpdate {
    pub title: Option<String>,
    pub difficulty: Option<String>,
    /// Replaces the whole tag set
    pub tags: Option<String>,
    pub solution_url: Option<String>,
    pub note: Option<String>,
    pub description: Option<String>,
    /// New source file; it is copied again, the previous managed copy stays on disk
    pub code_path: Option<PathBuf>,
    pub score: Option<String>,
}

impl ProblemUpdate {
    fn normalized(self) -> Self {
        Self {
            title: provided(self.title),
            difficulty: provided(self.difficulty),
            tags: provided(self.tags),
            solution_url: provided(self.solution_url),
            note: provided(self.note),
            description: provided(self.description),
            code_path: self.code_path.filter(|p| !p.as_os_str().is_empty()),
            score: provided(self.score),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.difficulty.is_none()
            && self.tags.is_none()
            && self.solution_url.is_none()
            && self.note.is_none()
            && self.description.is_none()
            && self.code_path.is_none()
            && self.score.is_none()
    }
}

pub fn run(
    db: &mut Database,
    translit: &dyn Transliterate,
    code_dir: &Path,
    slug: &str,
    update: ProblemUpdate,
) -> Result<CmdResult> {
    let update = update.normalized();
    let mut result = CmdResult::default();

    let difficulty = update
        .difficulty
        .as_deref()
        .map(str::parse::<Difficulty>)
        .transpose()?;

    let score = match update.score.as_deref() {
        Some(raw) => {
            let parsed = parse_score(raw);
            if parsed.is_none() {
                log::warn!("ignoring score {:?}", raw);
                result.add_message(CmdMessage::warning(format!(
                    "Score '{}' is not a number in 0-255, keeping the previous score",
                    raw
                )));
            }
            parsed
        }
        None => None,
    };

    if update.is_empty() {
        // Still report unknown slugs
        load_by_slug(db.conn(), slug)?;
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    let problem = db.transaction(|tx| {
        let current = load_by_slug(tx, slug)?;
        let mut record = ProblemRecord::from(&current);

        if let Some(title) = &update.title {
            record.title = title.clone();
            record.slug = generate_slug(translit, record.id, title);
        }
        if let Some(difficulty) = difficulty {
            record.difficulty = difficulty;
        }
        if let Some(url) = &update.solution_url {
            record.solution_url = url.clone();
        }
        if let Some(note) = &update.note {
            record.note = note.clone();
        }
        if let Some(description) = &update.description {
            record.description = description.clone();
        }
        if score.is_some() {
            record.score = score;
        }
        if let Some(source) = &update.code_path {
            record.code_path = Some(ingest_code(code_dir, &record.slug, source)?);
        }

        if let Some(raw) = &update.tags {
            let tags = resolve_tags(tx, raw)?;
            let previous = clear_problem_tags(tx, record.id)?;
            attach_tags(tx, record.id, &tags)?;
            prune_orphan_tags(tx, &previous)?;
        }

        update_problem(tx, &record)?;
        find_problem_by_id(tx, record.id)?.ok_or_else(|| AlgoError::NotFound(record.slug.clone()))
    })?;

    if problem.slug != slug {
        result.add_message(CmdMessage::info(format!(
            "Slug changed: {} -> {}",
            slug, problem.slug
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Problem updated: {} ({})",
        problem.title, problem.slug
    )));
    Ok(result.with_affected_problems(vec![problem]))
}
