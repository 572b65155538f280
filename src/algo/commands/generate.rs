use crate::commands::contest::normalize_kind;
use crate::commands::helpers::{load_by_slug, sanitize_filename};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AlgoError, Result};
use crate::model::Problem;
use crate::render::{CodeBlock, DocumentRenderer, ProblemDocument};
use crate::store::contests::find_contest;
use crate::store::Database;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Renders one problem to `{markdown_dir}/{difficulty}/{slug}.md`.
pub fn problem(
    db: &Database,
    renderer: &DocumentRenderer,
    markdown_dir: &Path,
    slug: &str,
) -> Result<CmdResult> {
    let problem = load_by_slug(db.conn(), slug)?;
    let mut result = CmdResult::default();

    let doc = document_for(&problem, &mut result)?;
    let text = renderer.render(&doc)?;

    let target = markdown_dir
        .join(problem.difficulty.as_str())
        .join(format!("{}.md", problem.slug));
    write_document(&target, &text)?;

    result.add_message(CmdMessage::success(format!(
        "Document written: {}",
        target.display()
    )));
    Ok(result
        .with_affected_problems(vec![problem])
        .with_written_paths(vec![target]))
}

/// Renders every problem of a contest, in contest order, into
/// `{markdown_dir}/{kind}/{title}.md`.
pub fn contest(
    db: &Database,
    renderer: &DocumentRenderer,
    markdown_dir: &Path,
    title: &str,
    kind: &str,
) -> Result<CmdResult> {
    let title = title.trim();
    let kind = normalize_kind(kind);
    let contest = find_contest(db.conn(), title, &kind)?
        .ok_or_else(|| AlgoError::NotFound(format!("{} ({})", title, kind)))?;

    let mut result = CmdResult::default();
    if contest.problems.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "Contest {} has no problems left",
            contest.title
        )));
    }

    let docs = contest
        .problems
        .iter()
        .map(|p| document_for(p, &mut result))
        .collect::<Result<Vec<_>>>()?;
    let text = renderer.render_all(&docs)?;

    let target = markdown_dir
        .join(sanitize_filename(&contest.kind))
        .join(format!("{}.md", sanitize_filename(&contest.title)));
    write_document(&target, &text)?;

    result.add_message(CmdMessage::success(format!(
        "Document written: {}",
        target.display()
    )));
    Ok(result
        .with_affected_problems(contest.problems)
        .with_written_paths(vec![target]))
}

fn document_for(problem: &Problem, result: &mut CmdResult) -> Result<ProblemDocument> {
    let code = match &problem.code_path {
        Some(path) => read_code(path, result)?,
        None => None,
    };
    Ok(ProblemDocument::from_problem(problem, code))
}

/// A vanished code file renders as "no code" with a warning; other read errors abort.
fn read_code(path: &Path, result: &mut CmdResult) -> Result<Option<CodeBlock>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(CodeBlock::for_file(path, &text))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("code file {} is missing", path.display());
            result.add_message(CmdMessage::warning(format!(
                "Code file {} is missing, rendering without code",
                path.display()
            )));
            Ok(None)
        }
        Err(e) => Err(AlgoError::fs(path, e)),
    }
}

fn write_document(target: &Path, text: &str) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| AlgoError::fs(parent, e))?;
    }
    fs::write(target, text).map_err(|e| AlgoError::fs(target, e))?;
    log::debug!("wrote {} bytes to {}", text.len(), target.display());
    Ok(())
}
