//! Tag normalization.
//!
//! Tags arrive as one comma separated string (`"Array, DP,dp"`). Each piece is
//! trimmed and lowercased; empty pieces are dropped and repeated names collapse
//! into one. Resolution then maps every name onto a `tags` row, inserting rows
//! for names seen for the first time and reusing existing ones.

use crate::error::Result;
use crate::model::Tag;
use crate::store::tags::{find_tag_by_name, insert_tag, next_tag_id};
use rusqlite::Connection;

/// Canonical tag names in first-seen order, without duplicates.
pub fn normalize_tag_names(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for piece in raw.split(',') {
        let name = piece.trim().to_lowercase();
        if name.is_empty() || names.contains(&name) {
            continue;
        }
        names.push(name);
    }
    names
}

/// Resolves `raw` into tag rows, creating the missing ones.
///
/// Must run on the same transaction as the problem write it belongs to, so
/// that a later failure also discards the tags created here.
pub fn resolve_tags(conn: &Connection, raw: &str) -> Result<Vec<Tag>> {
    let mut resolved = Vec::new();
    for name in normalize_tag_names(raw) {
        let tag = match find_tag_by_name(conn, &name)? {
            Some(existing) => existing,
            None => {
                let tag = Tag {
                    id: next_tag_id(conn)?,
                    name,
                };
                insert_tag(conn, &tag)?;
                tag
            }
        };
        resolved.push(tag);
    }
    Ok(resolved)
}
