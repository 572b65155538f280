use crate::error::{AlgoError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config lives at `{home}/algo/algo.toml`.
pub const CONFIG_DIR: &str = "algo";
pub const CONFIG_FILENAME: &str = "algo.toml";

/// Overrides the home directory; used to sandbox runs and tests.
pub const HOME_ENV: &str = "ALGO_HOME";

const DEFAULT_CODE_DIR: &str = "~/algo/code";
const DEFAULT_DATASOURCE: &str = "~/algo/db";
const DEFAULT_MARKDOWN_DIR: &str = "~/algo/markdown";

/// Configuration for algo, read from `algo.toml`.
///
/// ```toml
/// [dir]
/// code_dir = "~/algo/code"
/// datasource = "~/algo/db"
/// markdown_dir = "~/notes/algo"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlgoConfig {
    #[serde(default)]
    pub dir: DirConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirConfig {
    /// Where ingested solution files are copied to
    #[serde(default = "default_code_dir")]
    pub code_dir: String,

    /// Directory holding `algo.db`
    #[serde(default = "default_datasource")]
    pub datasource: String,

    /// Root for generated markdown documents
    #[serde(default = "default_markdown_dir")]
    pub markdown_dir: String,
}

fn default_code_dir() -> String {
    DEFAULT_CODE_DIR.to_string()
}

fn default_datasource() -> String {
    DEFAULT_DATASOURCE.to_string()
}

fn default_markdown_dir() -> String {
    DEFAULT_MARKDOWN_DIR.to_string()
}

impl Default for DirConfig {
    fn default() -> Self {
        Self {
            code_dir: default_code_dir(),
            datasource: default_datasource(),
            markdown_dir: default_markdown_dir(),
        }
    }
}

/// Directories after `~/` expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgoPaths {
    pub code_dir: PathBuf,
    pub datasource: PathBuf,
    pub markdown_dir: PathBuf,
}

impl AlgoConfig {
    /// Load `{home}/algo/algo.toml`, or return defaults if it does not exist.
    /// A file that exists but does not parse is an error.
    pub fn load<P: AsRef<Path>>(home: P) -> Result<Self> {
        let config_path = home.as_ref().join(CONFIG_DIR).join(CONFIG_FILENAME);

        if !config_path.exists() {
            log::debug!("no config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| AlgoError::fs(&config_path, e))?;
        Self::from_toml(&content)
            .map_err(|e| AlgoError::Config(format!("{}: {}", config_path.display(), e)))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AlgoError::Config(e.to_string()))
    }

    /// Resolves every directory, expanding a leading `~/` against `home`.
    pub fn paths(&self, home: &Path) -> AlgoPaths {
        AlgoPaths {
            code_dir: expand_home(&self.dir.code_dir, home),
            datasource: expand_home(&self.dir.datasource, home),
            markdown_dir: expand_home(&self.dir.markdown_dir, home),
        }
    }
}

/// The user's home directory, honoring [`HOME_ENV`].
pub fn home_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| AlgoError::Config("Could not determine home directory".to_string()))
}

fn expand_home(value: &str, home: &Path) -> PathBuf {
    match value.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None if value == "~" => home.to_path_buf(),
        None => PathBuf::from(value),
    }
}
