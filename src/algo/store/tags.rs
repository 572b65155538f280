use crate::error::Result;
use crate::model::Tag;
use rusqlite::{params, Connection, OptionalExtension};

pub fn next_tag_id(conn: &Connection) -> Result<i64> {
    let id = conn.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM tags", [], |r| r.get(0))?;
    Ok(id)
}

pub fn find_tag_by_name(conn: &Connection, name: &str) -> Result<Option<Tag>> {
    let tag = conn
        .query_row(
            "SELECT id, name FROM tags WHERE name = ?1",
            params![name],
            |r| {
                Ok(Tag {
                    id: r.get(0)?,
                    name: r.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(tag)
}

pub fn insert_tag(conn: &Connection, tag: &Tag) -> Result<()> {
    log::debug!("insert tag id={} name={}", tag.id, tag.name);
    conn.execute(
        "INSERT INTO tags(id, name) VALUES (?1, ?2)",
        params![tag.id, tag.name],
    )?;
    Ok(())
}

/// Tags of a problem, ordered by name.
pub fn tags_for_problem(conn: &Connection, problem_id: i64) -> Result<Vec<Tag>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT t.id, t.name FROM tags t
        JOIN problem_tags pt ON pt.tag_id = t.id
        WHERE pt.problem_id = ?1
        ORDER BY t.name
        "#,
    )?;
    let tags = stmt
        .query_map(params![problem_id], |r| {
            Ok(Tag {
                id: r.get(0)?,
                name: r.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tags)
}

/// Removes every tag association of a problem, returning the tag ids that were attached.
pub fn clear_problem_tags(conn: &Connection, problem_id: i64) -> Result<Vec<i64>> {
    let previous: Vec<i64> = tags_for_problem(conn, problem_id)?
        .into_iter()
        .map(|t| t.id)
        .collect();
    conn.execute(
        "DELETE FROM problem_tags WHERE problem_id = ?1",
        params![problem_id],
    )?;
    Ok(previous)
}

pub fn attach_tags(conn: &Connection, problem_id: i64, tags: &[Tag]) -> Result<()> {
    let mut stmt =
        conn.prepare("INSERT OR IGNORE INTO problem_tags(problem_id, tag_id) VALUES (?1, ?2)")?;
    for tag in tags {
        stmt.execute(params![problem_id, tag.id])?;
    }
    Ok(())
}

/// Deletes those of `candidates` that no problem references anymore.
pub fn prune_orphan_tags(conn: &Connection, candidates: &[i64]) -> Result<usize> {
    let mut stmt = conn.prepare(
        "DELETE FROM tags WHERE id = ?1 \
         AND NOT EXISTS (SELECT 1 FROM problem_tags WHERE tag_id = ?1)",
    )?;
    let mut pruned = 0;
    for id in candidates {
        pruned += stmt.execute(params![id])?;
    }
    if pruned > 0 {
        log::debug!("pruned {} orphan tag(s)", pruned);
    }
    Ok(pruned)
}

/// Every tag with the number of problems carrying it, ordered by name.
pub fn tag_counts(conn: &Connection) -> Result<Vec<(Tag, usize)>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT t.id, t.name, COUNT(pt.problem_id) FROM tags t
        LEFT JOIN problem_tags pt ON pt.tag_id = t.id
        GROUP BY t.id, t.name
        ORDER BY t.name
        "#,
    )?;
    let rows = stmt
        .query_map([], |r| {
            let count: i64 = r.get(2)?;
            Ok((
                Tag {
                    id: r.get(0)?,
                    name: r.get(1)?,
                },
                count as usize,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}
