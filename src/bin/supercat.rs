// src/bin/supercat.rs
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use supercat_core::cli::{self, Cli, Commands};
use supercat_core::config::Config;
use supercat_core::exit::SupercatExit;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {e:#}", "error:".red().bold());
        SupercatExit::classify(&e).exit();
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Score(args) => cli::handle_score(config, args),
        Commands::Order { edges, root } => cli::handle_order(&config, edges, root.as_deref()),
        Commands::Articles {
            scores,
            articles,
            output,
        } => cli::handle_articles(config, scores, articles, output),
    }
}
