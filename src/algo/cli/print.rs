use algo::commands::{CmdMessage, MessageLevel};
use algo::config::AlgoPaths;
use algo::error::Result;
use algo::model::{Difficulty, Problem, Tag};
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use serde::Serialize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const DIFFICULTY_WIDTH: usize = 8;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_problems(problems: &[Problem]) {
    if problems.is_empty() {
        println!("No problems found.");
        return;
    }

    let slug_width = problems.iter().map(|p| p.slug.width()).max().unwrap_or(0) + 2;
    for p in problems {
        let fixed = slug_width + DIFFICULTY_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);

        let mut label = p.title.clone();
        if !p.tags.is_empty() {
            label.push_str(&format!(" [{}]", p.tag_names().join(", ")));
        }
        let label = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label.width());

        println!(
            "{}{}{}{}{}",
            format!("{:<slug_width$}", p.slug).yellow(),
            difficulty_cell(p.difficulty),
            label,
            " ".repeat(padding),
            format_time_ago(p.created_at).dimmed()
        );
    }
}

fn difficulty_cell(difficulty: Difficulty) -> ColoredString {
    let cell = format!("{:<width$}", difficulty.as_str(), width = DIFFICULTY_WIDTH);
    match difficulty {
        Difficulty::Easy => cell.green(),
        Difficulty::Medium => cell.yellow(),
        Difficulty::Hard => cell.red(),
    }
}

#[derive(Serialize)]
struct ProblemJson<'a> {
    id: i64,
    slug: &'a str,
    title: &'a str,
    difficulty: Difficulty,
    tags: Vec<String>,
    solution_url: &'a str,
    score: Option<u8>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub(super) fn print_problems_json(problems: &[Problem]) -> Result<()> {
    let rows: Vec<ProblemJson<'_>> = problems
        .iter()
        .map(|p| ProblemJson {
            id: p.id,
            slug: &p.slug,
            title: &p.title,
            difficulty: p.difficulty,
            tags: p.tag_names(),
            solution_url: &p.solution_url,
            score: p.score,
            created_at: p.created_at,
            updated_at: p.updated_at,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

pub(super) fn print_tags(counts: &[(Tag, usize)]) {
    if counts.is_empty() {
        println!("No tags yet.");
        return;
    }
    let width = counts.iter().map(|(t, _)| t.name.width()).max().unwrap_or(0);
    for (tag, count) in counts {
        let pad = width.saturating_sub(tag.name.width());
        println!("{}{}  {}", tag.name, " ".repeat(pad), count.to_string().dimmed());
    }
}

pub(super) fn print_paths(paths: &AlgoPaths) {
    println!("code_dir     = {}", paths.code_dir.display());
    println!("datasource   = {}", paths.datasource.display());
    println!("markdown_dir = {}", paths.markdown_dir.display());
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Wide characters count double.
        assert_eq!(truncate_to_width("两数之和两数之和", 6), "两数…");
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let out = format_time_ago(Utc::now() - chrono::Duration::hours(3));
        assert_eq!(out.width(), TIME_WIDTH);
        assert_eq!(out.trim_start(), "3 hours ago");
    }
}
