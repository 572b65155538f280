use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "algo", bin_name = "algo", version)]
#[command(about = "Catalogue solved algorithm problems and export them as Markdown", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose tracing (same as RUST_LOG=algo=debug)
    #[arg(short = 'D', long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a problem; missing title and difficulty are prompted for on a terminal
    #[command(display_order = 1)]
    Add {
        #[command(flatten)]
        fields: ProblemFields,
    },

    /// Edit the problem with the given slug; omitted fields stay unchanged
    #[command(display_order = 2)]
    Edit {
        slug: String,

        #[command(flatten)]
        fields: ProblemFields,
    },

    /// Remove a problem, its tag links and its managed code file
    #[command(alias = "delete", display_order = 3)]
    Rm { slug: String },

    /// List problems, newest first
    #[command(alias = "ls", display_order = 4)]
    List {
        /// Only titles containing this text
        #[arg(short, long)]
        title: Option<String>,

        /// easy, medium or hard
        #[arg(short, long)]
        difficulty: Option<String>,

        /// Comma separated; matches problems carrying any of them
        #[arg(long)]
        tags: Option<String>,

        /// Exact score, 0-255
        #[arg(short, long, allow_negative_numbers = true)]
        score: Option<String>,

        #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
        limit: i64,

        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write the Markdown document for a problem (or a contest with --contest)
    #[command(display_order = 5)]
    Gen {
        /// Problem slug, or contest title when --contest is given
        name: String,

        /// Contest kind
        #[arg(long, value_name = "KIND")]
        contest: Option<String>,
    },

    /// List tags with their problem counts
    #[command(display_order = 6)]
    Tags,

    /// Manage contests
    #[command(subcommand, display_order = 7)]
    Contest(ContestCommands),

    /// Print the resolved directories
    #[command(display_order = 8)]
    Paths,
}

#[derive(Subcommand, Debug)]
pub enum ContestCommands {
    /// Group existing problems, in order, under a contest
    Add {
        #[arg(long)]
        title: String,

        /// e.g. weekly, biweekly
        #[arg(long)]
        kind: String,

        /// Comma separated slugs
        #[arg(long, value_name = "SLUGS")]
        problems: String,
    },
}

/// Problem fields shared by `add` and `edit`.
#[derive(clap::Args, Debug, Default)]
pub struct ProblemFields {
    #[arg(long)]
    pub title: Option<String>,

    /// easy, medium or hard
    #[arg(short, long)]
    pub difficulty: Option<String>,

    /// Comma separated tag names
    #[arg(long)]
    pub tags: Option<String>,

    /// Link to the published solution
    #[arg(long)]
    pub url: Option<String>,

    /// Approach notes
    #[arg(long)]
    pub note: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Solution file to copy into the code directory
    #[arg(long, value_name = "PATH")]
    pub code: Option<PathBuf>,

    /// 0-255; anything else is ignored with a warning
    #[arg(short, long, allow_negative_numbers = true)]
    pub score: Option<String>,
}
