//! # Document Rendering
//!
//! Turns a resolved [`Problem`] into a Markdown document through a minijinja
//! template. The template lives in `templates/problem.tmp` and is compiled once
//! when the [`DocumentRenderer`] is built.
//!
//! Rendering is pure: the same [`ProblemDocument`] always produces the same
//! bytes. Everything time or filesystem dependent (timestamps, code text) is
//! resolved into the document before it reaches the template.
//!
//! The environment runs with strict undefined handling, so a template that
//! references a field the document does not carry fails with
//! [`AlgoError::Render`](crate::error::AlgoError::Render) instead of printing
//! an empty string.

use crate::error::Result;
use crate::model::Problem;
use chrono::{DateTime, Utc};
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use std::path::Path;

pub const PROBLEM_TEMPLATE: &str = include_str!("templates/problem.tmp");

/// Placed between documents when several problems go into one file.
pub const DOCUMENT_SEPARATOR: &str = "\n---\n\n";

const TEMPLATE_NAME: &str = "problem";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Fence info string, taken from the stored file's extension.
    pub language: String,
    pub text: String,
    /// Tilde fence longer than any tilde run inside `text`.
    pub fence: String,
}

impl CodeBlock {
    pub fn new(language: impl Into<String>, text: &str) -> Self {
        let text = text.trim_end_matches(['\n', '\r']).to_string();
        Self {
            language: language.into(),
            fence: "~".repeat(longest_tilde_run(&text).max(2) + 1),
            text,
        }
    }

    pub fn for_file(path: &Path, text: &str) -> Self {
        Self::new(language_for(path), text)
    }
}

fn longest_tilde_run(text: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == '~' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// `solution.rs` -> `rs`; no extension gives an empty fence tag.
pub fn language_for(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Everything the template can see.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDocument {
    pub title: String,
    pub slug: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub solution_url: String,
    pub score: Option<u8>,
    pub description: String,
    pub note: String,
    pub created_at: String,
    pub updated_at: String,
    pub code: Option<CodeBlock>,
}

impl ProblemDocument {
    pub fn new(
        problem: &Problem,
        tag_names: Vec<String>,
        code: Option<CodeBlock>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: problem.title.clone(),
            slug: problem.slug.clone(),
            difficulty: problem.difficulty.to_string(),
            tags: tag_names,
            solution_url: problem.solution_url.clone(),
            score: problem.score,
            description: problem.description.clone(),
            note: problem.note.clone(),
            created_at: created_at.format(TIMESTAMP_FORMAT).to_string(),
            updated_at: updated_at.format(TIMESTAMP_FORMAT).to_string(),
            code,
        }
    }

    /// Document using the problem's own tags and timestamps.
    pub fn from_problem(problem: &Problem, code: Option<CodeBlock>) -> Self {
        Self::new(
            problem,
            problem.tag_names(),
            code,
            problem.created_at,
            problem.updated_at,
        )
    }
}

pub struct DocumentRenderer {
    env: Environment<'static>,
}

impl DocumentRenderer {
    pub fn new() -> Result<Self> {
        Self::with_template(PROBLEM_TEMPLATE)
    }

    /// Builds a renderer around a custom template. Syntax errors surface here.
    pub fn with_template(source: &str) -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_template_owned(TEMPLATE_NAME.to_string(), source.to_string())?;
        Ok(Self { env })
    }

    pub fn render(&self, doc: &ProblemDocument) -> Result<String> {
        let tmpl = self.env.get_template(TEMPLATE_NAME)?;
        Ok(tmpl.render(doc)?)
    }

    /// Renders each document in order and joins them with [`DOCUMENT_SEPARATOR`].
    pub fn render_all(&self, docs: &[ProblemDocument]) -> Result<String> {
        let rendered = docs
            .iter()
            .map(|doc| self.render(doc))
            .collect::<Result<Vec<_>>>()?;
        Ok(rendered.join(DOCUMENT_SEPARATOR))
    }
}
