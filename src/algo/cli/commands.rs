//! # CLI Layer
//!
//! One UI client for the algo library, and the only place that knows about
//! stdout, stdin and process exit codes.
//!
//! `run()` parses arguments, sets up logging, builds the [`AlgoApi`] from the
//! user's configuration and dispatches to a `handle_*` function. Handlers call
//! the API and hand the resulting `CmdResult` to the `print_*` functions.

use super::print::{
    print_messages, print_paths, print_problems, print_problems_json, print_tags,
};
use super::prompt;
use super::setup::{Cli, Commands, ContestCommands, ProblemFields};
use algo::api::AlgoApi;
use algo::commands::add::NewProblem;
use algo::commands::edit::ProblemUpdate;
use algo::commands::list::ListFilter;
use algo::config::{home_dir, AlgoConfig};
use algo::error::Result;
use algo::render::DocumentRenderer;
use algo::slug::Pinyin;
use algo::store::Database;
use clap::Parser;

struct AppContext {
    api: AlgoApi,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut ctx = init_context()?;

    match cli.command {
        Commands::Add { fields } => handle_add(&mut ctx, fields),
        Commands::Edit { slug, fields } => handle_edit(&mut ctx, &slug, fields),
        Commands::Rm { slug } => handle_rm(&mut ctx, &slug),
        Commands::List {
            title,
            difficulty,
            tags,
            score,
            limit,
            offset,
            json,
        } => handle_list(
            &ctx,
            ListFilter {
                title,
                difficulty,
                tags,
                score,
                limit,
                offset,
            },
            json,
        ),
        Commands::Gen { name, contest } => handle_gen(&ctx, &name, contest.as_deref()),
        Commands::Tags => handle_tags(&ctx),
        Commands::Contest(ContestCommands::Add {
            title,
            kind,
            problems,
        }) => handle_contest_add(&mut ctx, &title, &kind, &problems),
        Commands::Paths => {
            print_paths(ctx.api.paths());
            Ok(())
        }
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "algo=debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

fn init_context() -> Result<AppContext> {
    let home = home_dir()?;
    let config = AlgoConfig::load(&home)?;
    let paths = config.paths(&home);
    log::debug!("using paths {:?}", paths);

    let db = Database::open(&paths.datasource)?;
    let api = AlgoApi::new(db, Box::new(Pinyin), DocumentRenderer::new()?, paths);
    Ok(AppContext { api })
}

fn handle_add(ctx: &mut AppContext, fields: ProblemFields) -> Result<()> {
    let interactive = prompt::interactive();
    let title = required(fields.title, "Title", interactive)?;
    let difficulty = required(fields.difficulty, "Difficulty (easy/medium/hard)", interactive)?;

    let input = NewProblem {
        title,
        difficulty,
        tags: fields.tags.unwrap_or_default(),
        solution_url: fields.url.unwrap_or_default(),
        note: fields.note.unwrap_or_default(),
        description: fields.description.unwrap_or_default(),
        code_path: fields.code,
        score: fields.score.unwrap_or_default(),
    };
    let result = ctx.api.add_problem(input)?;
    print_messages(&result.messages);
    Ok(())
}

/// Falls back to a prompt only on a terminal; otherwise the command validates the empty value.
fn required(value: Option<String>, label: &str, interactive: bool) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ if interactive => prompt::ask(label),
        _ => Ok(String::new()),
    }
}

fn handle_edit(ctx: &mut AppContext, slug: &str, fields: ProblemFields) -> Result<()> {
    let update = ProblemUpdate {
        title: fields.title,
        difficulty: fields.difficulty,
        tags: fields.tags,
        solution_url: fields.url,
        note: fields.note,
        description: fields.description,
        code_path: fields.code,
        score: fields.score,
    };
    let result = ctx.api.edit_problem(slug, update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rm(ctx: &mut AppContext, slug: &str) -> Result<()> {
    let result = ctx.api.remove_problem(slug)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, filter: ListFilter, json: bool) -> Result<()> {
    let result = ctx.api.list_problems(filter)?;
    if json {
        print_problems_json(&result.listed_problems)?;
    } else {
        print_problems(&result.listed_problems);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_gen(ctx: &AppContext, name: &str, contest: Option<&str>) -> Result<()> {
    let result = match contest {
        Some(kind) => ctx.api.generate_contest(name, kind)?,
        None => ctx.api.generate_document(name)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_tags(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_tags()?;
    print_tags(&result.tag_counts);
    Ok(())
}

fn handle_contest_add(ctx: &mut AppContext, title: &str, kind: &str, slugs: &str) -> Result<()> {
    let result = ctx.api.create_contest(title, kind, slugs)?;
    print_messages(&result.messages);
    Ok(())
}
