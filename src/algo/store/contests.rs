use super::{now_ms, problems};
use crate::error::Result;
use crate::model::Contest;
use rusqlite::{params, Connection, OptionalExtension};

pub fn next_contest_id(conn: &Connection) -> Result<i64> {
    let id = conn.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM contests", [], |r| {
        r.get(0)
    })?;
    Ok(id)
}

/// Inserts the contest and its members; `problem_ids` order becomes the position order.
pub fn insert_contest(
    conn: &Connection,
    id: i64,
    title: &str,
    kind: &str,
    problem_ids: &[i64],
) -> Result<()> {
    log::debug!("insert contest id={} title={} kind={}", id, title, kind);
    conn.execute(
        "INSERT INTO contests(id, title, kind, created_at_ms) VALUES (?1, ?2, ?3, ?4)",
        params![id, title, kind, now_ms()],
    )?;
    let mut stmt = conn.prepare(
        "INSERT INTO contest_problems(contest_id, problem_id, position) VALUES (?1, ?2, ?3)",
    )?;
    for (position, problem_id) in problem_ids.iter().enumerate() {
        stmt.execute(params![id, problem_id, position as i64])?;
    }
    Ok(())
}

pub fn contest_exists(conn: &Connection, title: &str, kind: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM contests WHERE title = ?1 AND kind = ?2",
            params![title, kind],
            |r| r.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Loads a contest with its problems (and their tags) in position order.
pub fn find_contest(conn: &Connection, title: &str, kind: &str) -> Result<Option<Contest>> {
    let head: Option<(i64, String, String)> = conn
        .query_row(
            "SELECT id, title, kind FROM contests WHERE title = ?1 AND kind = ?2",
            params![title, kind],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .optional()?;
    let Some((id, title, kind)) = head else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT problem_id FROM contest_problems WHERE contest_id = ?1 ORDER BY position",
    )?;
    let ids = stmt
        .query_map(params![id], |r| r.get::<_, i64>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut members = Vec::with_capacity(ids.len());
    for problem_id in ids {
        if let Some(p) = problems::find_problem_by_id(conn, problem_id)? {
            members.push(p);
        }
    }

    Ok(Some(Contest {
        id,
        title,
        kind,
        problems: members,
    }))
}

pub fn remove_problem_from_contests(conn: &Connection, problem_id: i64) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM contest_problems WHERE problem_id = ?1",
        params![problem_id],
    )?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;
    use crate::store::problems::{insert_problem, ProblemRecord};
    use crate::store::Database;

    fn seed(db: &Database, id: i64) {
        insert_problem(
            db.conn(),
            &ProblemRecord {
                id,
                title: format!("P{id}"),
                slug: format!("{:04}_p{}", id, id),
                difficulty: Difficulty::Medium,
                solution_url: String::new(),
                note: String::new(),
                code_path: None,
                score: None,
                description: String::new(),
            },
        )
        .unwrap();
    }

    #[test]
    fn members_come_back_in_position_order() {
        let db = Database::open_in_memory().unwrap();
        for id in 1..=3 {
            seed(&db, id);
        }
        let id = next_contest_id(db.conn()).unwrap();
        assert_eq!(id, 1);
        insert_contest(db.conn(), id, "R1", "weekly", &[3, 1, 2]).unwrap();

        let contest = find_contest(db.conn(), "R1", "weekly").unwrap().unwrap();
        let ids: Vec<i64> = contest.problems.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(find_contest(db.conn(), "R1", "biweekly").unwrap().is_none());
        assert_eq!(next_contest_id(db.conn()).unwrap(), 2);
    }

    #[test]
    fn removing_a_problem_detaches_it() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, 1);
        seed(&db, 2);
        insert_contest(db.conn(), 1, "R1", "weekly", &[1, 2]).unwrap();

        assert_eq!(remove_problem_from_contests(db.conn(), 1).unwrap(), 1);
        let contest = find_contest(db.conn(), "R1", "weekly").unwrap().unwrap();
        assert_eq!(contest.problems.len(), 1);
        assert!(contest_exists(db.conn(), "R1", "weekly").unwrap());
    }
}
