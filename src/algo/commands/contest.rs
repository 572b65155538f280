use crate::commands::helpers::{load_by_slug, provided};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AlgoError, Result};
use crate::store::contests::{contest_exists, find_contest, insert_contest, next_contest_id};
use crate::store::Database;

/// Contest kinds are compared case-insensitively.
pub fn normalize_kind(kind: &str) -> String {
    kind.trim().to_lowercase()
}

/// `"a, b,,a"` -> `["a", "b"]`, keeping first-seen order.
fn parse_slugs(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for slug in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !out.iter().any(|s| s == slug) {
            out.push(slug.to_string());
        }
    }
    out
}

/// Groups existing problems, in the given order, under `title` and `kind`.
pub fn create(db: &mut Database, title: &str, kind: &str, slugs: &str) -> Result<CmdResult> {
    let title = provided(Some(title.to_string()))
        .ok_or_else(|| AlgoError::Validation("Contest title cannot be empty".into()))?;
    let kind = normalize_kind(kind);
    if kind.is_empty() {
        return Err(AlgoError::Validation("Contest kind cannot be empty".into()));
    }
    let slugs = parse_slugs(slugs);
    if slugs.is_empty() {
        return Err(AlgoError::Validation(
            "A contest needs at least one problem".into(),
        ));
    }

    let contest = db.transaction(|tx| {
        if contest_exists(tx, &title, &kind)? {
            return Err(AlgoError::Validation(format!(
                "Contest already exists: {} ({})",
                title, kind
            )));
        }
        let ids = slugs
            .iter()
            .map(|slug| load_by_slug(tx, slug).map(|p| p.id))
            .collect::<Result<Vec<_>>>()?;

        let id = next_contest_id(tx)?;
        insert_contest(tx, id, &title, &kind, &ids)?;
        find_contest(tx, &title, &kind)?
            .ok_or_else(|| AlgoError::NotFound(format!("{} ({})", title, kind)))
    })?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Contest added: {} ({}) with {} problem(s)",
        contest.title,
        contest.kind,
        contest.problems.len()
    )));
    Ok(result.with_affected_problems(contest.problems))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    fn seeded() -> TestEnv {
        let mut env = TestEnv::new();
        for title in ["A", "B", "C"] {
            env.add_simple(title).unwrap();
        }
        env
    }

    #[test]
    fn keeps_given_order() {
        let mut env = seeded();
        let result = create(&mut env.db, "Round 1", " Weekly ", "0003_c, 0001_a,0003_c").unwrap();
        let slugs: Vec<_> = result
            .affected_problems
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["0003_c", "0001_a"]);

        let stored = find_contest(env.db.conn(), "Round 1", "weekly")
            .unwrap()
            .unwrap();
        assert_eq!(stored.problems.len(), 2);
        assert_eq!(stored.problems[0].slug, "0003_c");
    }

    #[test]
    fn unknown_slug_creates_nothing() {
        let mut env = seeded();
        let err = create(&mut env.db, "Round 1", "weekly", "0001_a, 0099_zz").unwrap_err();
        assert!(matches!(err, AlgoError::NotFound(s) if s == "0099_zz"));
        assert!(!contest_exists(env.db.conn(), "Round 1", "weekly").unwrap());
    }

    #[test]
    fn duplicate_title_and_kind_is_rejected() {
        let mut env = seeded();
        create(&mut env.db, "Round 1", "weekly", "0001_a").unwrap();
        let err = create(&mut env.db, "Round 1", "WEEKLY", "0002_b").unwrap_err();
        assert!(matches!(err, AlgoError::Validation(_)));

        // Same title under another kind is fine.
        create(&mut env.db, "Round 1", "biweekly", "0002_b").unwrap();
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let mut env = seeded();
        for (title, kind, slugs) in [(" ", "weekly", "0001_a"), ("R", "", "0001_a"), ("R", "weekly", " , ")] {
            assert!(matches!(
                create(&mut env.db, title, kind, slugs),
                Err(AlgoError::Validation(_))
            ));
        }
    }
}
