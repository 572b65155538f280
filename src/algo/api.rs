//! # API Facade
//!
//! The single entry point for every algo operation, whatever the UI.
//!
//! `AlgoApi` owns the collaborators that are built once at startup (the
//! database, the transliterator, the document renderer and the resolved
//! directories) and hands them to the command functions. It holds no business
//! logic of its own and never prints.
//!
//! Tests here only check dispatch; behavior is covered in `commands/*.rs`.

use crate::commands::{self, add::NewProblem, edit::ProblemUpdate, list::ListFilter, CmdResult};
use crate::config::AlgoPaths;
use crate::error::Result;
use crate::render::DocumentRenderer;
use crate::slug::Transliterate;
use crate::store::Database;

pub struct AlgoApi {
    db: Database,
    translit: Box<dyn Transliterate>,
    renderer: DocumentRenderer,
    paths: AlgoPaths,
}

impl AlgoApi {
    pub fn new(
        db: Database,
        translit: Box<dyn Transliterate>,
        renderer: DocumentRenderer,
        paths: AlgoPaths,
    ) -> Self {
        Self {
            db,
            translit,
            renderer,
            paths,
        }
    }

    pub fn add_problem(&mut self, input: NewProblem) -> Result<CmdResult> {
        commands::add::run(
            &mut self.db,
            self.translit.as_ref(),
            &self.paths.code_dir,
            input,
        )
    }

    pub fn edit_problem(&mut self, slug: &str, update: ProblemUpdate) -> Result<CmdResult> {
        commands::edit::run(
            &mut self.db,
            self.translit.as_ref(),
            &self.paths.code_dir,
            slug.trim(),
            update,
        )
    }

    pub fn remove_problem(&mut self, slug: &str) -> Result<CmdResult> {
        commands::remove::run(&mut self.db, slug.trim())
    }

    pub fn list_problems(&self, filter: ListFilter) -> Result<CmdResult> {
        commands::list::run(&self.db, filter)
    }

    pub fn generate_document(&self, slug: &str) -> Result<CmdResult> {
        commands::generate::problem(
            &self.db,
            &self.renderer,
            &self.paths.markdown_dir,
            slug.trim(),
        )
    }

    pub fn generate_contest(&self, title: &str, kind: &str) -> Result<CmdResult> {
        commands::generate::contest(
            &self.db,
            &self.renderer,
            &self.paths.markdown_dir,
            title,
            kind,
        )
    }

    pub fn list_tags(&self) -> Result<CmdResult> {
        commands::tags::run(&self.db)
    }

    pub fn create_contest(&mut self, title: &str, kind: &str, slugs: &str) -> Result<CmdResult> {
        commands::contest::create(&mut self.db, title, kind, slugs)
    }

    pub fn paths(&self) -> &AlgoPaths {
        &self.paths
    }
}
