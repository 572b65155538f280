use crate::error::{AlgoError, Result};
use crate::model::Problem;
use crate::store::problems::find_problem_by_slug;
use rusqlite::Connection;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Trims the input and treats an empty result as "not provided".
pub fn provided(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses a user-entered score. Anything that is not an integer in 0..=255 yields `None`.
pub fn parse_score(raw: &str) -> Option<u8> {
    raw.trim().parse::<i64>().ok().and_then(|n| u8::try_from(n).ok())
}

pub fn load_by_slug(conn: &Connection, slug: &str) -> Result<Problem> {
    find_problem_by_slug(conn, slug)?.ok_or_else(|| AlgoError::NotFound(slug.to_string()))
}

/// Managed location for a problem's code: `{code_dir}/{slug}_code{.ext}`.
pub fn managed_code_path(code_dir: &Path, slug: &str, source: &Path) -> PathBuf {
    let ext = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    code_dir.join(format!("{}_code{}", slug, ext))
}

/// Copies `source` into the code directory under the problem's slug and returns the new path.
pub fn ingest_code(code_dir: &Path, slug: &str, source: &Path) -> Result<PathBuf> {
    let data = fs::read(source).map_err(|e| AlgoError::fs(source, e))?;
    fs::create_dir_all(code_dir).map_err(|e| AlgoError::fs(code_dir, e))?;

    let dst = managed_code_path(code_dir, slug, source);
    fs::write(&dst, data).map_err(|e| AlgoError::fs(&dst, e))?;
    log::debug!("ingested {} -> {}", source.display(), dst.display());
    Ok(dst)
}

/// Deletes a managed file. Returns `false` if it was already gone.
pub fn remove_managed_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("managed file {} already absent", path.display());
            Ok(false)
        }
        Err(e) => Err(AlgoError::fs(path, e)),
    }
}

/// Makes a user-chosen name safe to use as a file name.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}
