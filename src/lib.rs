pub mod articles;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod exit;
pub mod graph;
pub mod score;
pub mod sink;
