use crate::commands::add::{self, NewProblem};
use crate::commands::CmdResult;
use crate::error::Result;
use crate::slug::Transliterate;
use crate::store::Database;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

/// A tiny fixed table standing in for the real pinyin data.
pub struct FakeTable(HashMap<char, &'static str>);

impl Default for FakeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeTable {
    pub fn new() -> Self {
        Self(HashMap::from([
            ('两', "Liang"),
            ('数', "shu"),
            ('之', "zhi"),
            ('和', "he"),
            ('绿', "lü"),
        ]))
    }
}

impl Transliterate for FakeTable {
    fn romanize(&self, c: char) -> Option<String> {
        self.0.get(&c).map(|s| s.to_string())
    }
}

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub db: Database,
    pub translit: FakeTable,
    pub root: PathBuf,
    pub code_dir: PathBuf,
    pub markdown_dir: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            db: Database::open_in_memory().expect("failed to open database"),
            translit: FakeTable::new(),
            code_dir: root.join("code"),
            markdown_dir: root.join("markdown"),
            root,
            _temp_dir: temp_dir,
        }
    }

    pub fn add(&mut self, input: NewProblem) -> Result<CmdResult> {
        add::run(&mut self.db, &self.translit, &self.code_dir, input)
    }

    pub fn add_simple(&mut self, title: &str) -> Result<CmdResult> {
        self.add(NewProblem {
            title: title.to_string(),
            difficulty: "medium".to_string(),
            ..Default::default()
        })
    }

    /// Writes a user-side source file outside the managed code directory.
    pub fn write_source(&self, name: &str, content: &str) -> PathBuf {
        let dir = self.root.join("workspace");
        std::fs::create_dir_all(&dir).expect("failed to create workspace");
        let path = dir.join(name);
        std::fs::write(&path, content).expect("failed to write source");
        path
    }

    pub fn problem_count(&self) -> i64 {
        self.db
            .conn()
            .query_row("SELECT COUNT(*) FROM problems", [], |r| r.get(0))
            .expect("count query failed")
    }
}
