use crate::commands::helpers::{load_by_slug, remove_managed_file};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::contests::remove_problem_from_contests;
use crate::store::problems::delete_problem;
use crate::store::tags::{clear_problem_tags, prune_orphan_tags};
use crate::store::Database;

pub fn run(db: &mut Database, slug: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let (problem, file_was_missing) = db.transaction(|tx| {
        let problem = load_by_slug(tx, slug)?;

        let previous_tags = clear_problem_tags(tx, problem.id)?;
        remove_problem_from_contests(tx, problem.id)?;
        delete_problem(tx, problem.id)?;
        let pruned = prune_orphan_tags(tx, &previous_tags)?;
        log::debug!("removed {} pruned {} tag(s)", problem.slug, pruned);

        // Last step: the row deletion is only committed once the file is gone.
        let file_was_missing = match &problem.code_path {
            Some(path) => !remove_managed_file(path)?,
            None => false,
        };
        Ok((problem, file_was_missing))
    })?;

    if file_was_missing {
        if let Some(path) = &problem.code_path {
            result.add_message(CmdMessage::warning(format!(
                "Code file {} was already missing",
                path.display()
            )));
        }
    }
    result.add_message(CmdMessage::success(format!(
        "Problem removed: {} ({})",
        problem.title, problem.slug
    )));
    Ok(result.with_affected_problems(vec![problem]))
}
