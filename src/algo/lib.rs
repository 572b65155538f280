//! # Algo Architecture
//!
//! Algo keeps a catalogue of solved algorithm problems: title, difficulty,
//! tags, solution link, notes, a copy of the solution code and an optional
//! score. Each problem gets a stable slug, and any problem (or a contest of
//! problems) can be exported as a Markdown document.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, prints, sets the exit code    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the database, transliterator, renderer and paths    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, slug and tag handling, code file management  │
//! │  - Returns `Result<CmdResult>`, never prints                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - SQLite through rusqlite, one transaction per mutation    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing below the CLI writes to stdout or exits the process. Everything
//! the commands need is passed in, so tests run against an in-memory database
//! and a fake transliteration table.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`store`]: SQLite schema and queries
//! - [`model`]: `Problem`, `Tag`, `Difficulty`, `Contest`
//! - [`slug`]: Slug generation and the [`slug::Transliterate`] capability
//! - [`tags`]: Tag string normalization and resolution
//! - [`render`]: Markdown documents through minijinja
//! - [`config`]: `algo.toml` loading and directory resolution
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod slug;
pub mod store;
pub mod tags;

#[cfg(test)]
pub(crate) mod test_utils;
