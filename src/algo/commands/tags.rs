use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::tags::tag_counts;
use crate::store::Database;

/// Every tag with the number of problems carrying it, ordered by name.
pub fn run(db: &Database) -> Result<CmdResult> {
    Ok(CmdResult::default().with_tag_counts(tag_counts(db.conn())?))
}
