//! CLI command handlers.

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands, OutputArgs, ScoreArgs};
pub use handlers::{apply_score_overrides, handle_articles, handle_order, handle_score};
