use super::{from_ms, now_ms, tags};
use crate::error::Result;
use crate::model::{Difficulty, Problem};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::PathBuf;

const PROBLEM_COLUMNS: &str = "p.id, p.title, p.slug, p.difficulty, p.solution_url, p.note, \
     p.code_path, p.score, p.description, p.created_at_ms, p.updated_at_ms";

/// The writable columns of a problem. Tags and timestamps are managed separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemRecord {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub difficulty: Difficulty,
    pub solution_url: String,
    pub note: String,
    pub code_path: Option<PathBuf>,
    pub score: Option<u8>,
    pub description: String,
}

impl From<&Problem> for ProblemRecord {
    fn from(p: &Problem) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            slug: p.slug.clone(),
            difficulty: p.difficulty,
            solution_url: p.solution_url.clone(),
            note: p.note.clone(),
            code_path: p.code_path.clone(),
            score: p.score,
            description: p.description.clone(),
        }
    }
}

/// A validated listing query. Build one through `commands::list::ListFilter`.
#[derive(Debug, Clone, Default)]
pub struct ProblemQuery {
    pub title_contains: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Matches when the problem carries at least one of these names.
    pub tag_names: Vec<String>,
    pub score: Option<u8>,
    pub limit: u32,
    pub offset: u32,
}

pub fn next_problem_id(conn: &Connection) -> Result<i64> {
    let id = conn.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM problems", [], |r| {
        r.get(0)
    })?;
    Ok(id)
}

pub fn insert_problem(conn: &Connection, record: &ProblemRecord) -> Result<()> {
    let now = now_ms();
    log::debug!("insert problem id={} slug={}", record.id, record.slug);
    conn.execute(
        r#"
        INSERT INTO problems(id, title, slug, difficulty, solution_url, note, code_path, score, description, created_at_ms, updated_at_ms)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
        params![
            record.id,
            record.title,
            record.slug,
            record.difficulty,
            record.solution_url,
            record.note,
            path_to_sql(&record.code_path),
            record.score,
            record.description,
            now,
            now
        ],
    )?;
    Ok(())
}

pub fn update_problem(conn: &Connection, record: &ProblemRecord) -> Result<()> {
    log::debug!("update problem id={} slug={}", record.id, record.slug);
    conn.execute(
        r#"
        UPDATE problems
        SET title = ?2, slug = ?3, difficulty = ?4, solution_url = ?5, note = ?6,
            code_path = ?7, score = ?8, description = ?9, updated_at_ms = ?10
        WHERE id = ?1
        "#,
        params![
            record.id,
            record.title,
            record.slug,
            record.difficulty,
            record.solution_url,
            record.note,
            path_to_sql(&record.code_path),
            record.score,
            record.description,
            now_ms()
        ],
    )?;
    Ok(())
}

pub fn delete_problem(conn: &Connection, id: i64) -> Result<()> {
    log::debug!("delete problem id={}", id);
    conn.execute("DELETE FROM problems WHERE id = ?1", params![id])?;
    Ok(())
}

pub fn find_problem_by_slug(conn: &Connection, slug: &str) -> Result<Option<Problem>> {
    let sql = format!("SELECT {PROBLEM_COLUMNS} FROM problems p WHERE p.slug = ?1");
    let problem = conn
        .query_row(&sql, params![slug], problem_from_row)
        .optional()?;
    with_tags(conn, problem)
}

pub fn find_problem_by_id(conn: &Connection, id: i64) -> Result<Option<Problem>> {
    let sql = format!("SELECT {PROBLEM_COLUMNS} FROM problems p WHERE p.id = ?1");
    let problem = conn
        .query_row(&sql, params![id], problem_from_row)
        .optional()?;
    with_tags(conn, problem)
}

/// Newest first. Filters are ANDed together.
pub fn list_problems(conn: &Connection, query: &ProblemQuery) -> Result<Vec<Problem>> {
    let mut sql = format!("SELECT {PROBLEM_COLUMNS} FROM problems p WHERE 1 = 1");
    let mut args: Vec<Value> = Vec::new();

    if let Some(term) = &query.title_contains {
        sql.push_str(" AND p.title LIKE ? ESCAPE '\\'");
        args.push(Value::Text(format!("%{}%", escape_like(term))));
    }
    if let Some(difficulty) = query.difficulty {
        sql.push_str(" AND p.difficulty = ?");
        args.push(Value::Text(difficulty.as_str().to_string()));
    }
    if !query.tag_names.is_empty() {
        let marks = vec!["?"; query.tag_names.len()].join(", ");
        sql.push_str(&format!(
            " AND EXISTS (SELECT 1 FROM problem_tags pt JOIN tags t ON t.id = pt.tag_id \
             WHERE pt.problem_id = p.id AND t.name IN ({marks}))"
        ));
        args.extend(query.tag_names.iter().cloned().map(Value::Text));
    }
    if let Some(score) = query.score {
        sql.push_str(" AND p.score = ?");
        args.push(Value::Integer(score.into()));
    }
    sql.push_str(" ORDER BY p.created_at_ms DESC, p.id DESC LIMIT ? OFFSET ?");
    args.push(Value::Integer(query.limit.into()));
    args.push(Value::Integer(query.offset.into()));

    log::debug!("list problems: {}", sql);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(args), problem_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|mut p| {
            p.tags = tags::tags_for_problem(conn, p.id)?;
            Ok(p)
        })
        .collect()
}

fn with_tags(conn: &Connection, problem: Option<Problem>) -> Result<Option<Problem>> {
    match problem {
        Some(mut p) => {
            p.tags = tags::tags_for_problem(conn, p.id)?;
            Ok(Some(p))
        }
        None => Ok(None),
    }
}

pub(crate) fn problem_from_row(row: &Row<'_>) -> rusqlite::Result<Problem> {
    let code_path: Option<String> = row.get(6)?;
    Ok(Problem {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        difficulty: row.get(3)?,
        solution_url: row.get(4)?,
        note: row.get(5)?,
        code_path: code_path.filter(|s| !s.is_empty()).map(PathBuf::from),
        score: row.get(7)?,
        description: row.get(8)?,
        tags: Vec::new(),
        created_at: from_ms(row.get(9)?),
        updated_at: from_ms(row.get(10)?),
    })
}

fn path_to_sql(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.to_string_lossy().into_owned())
}

fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
