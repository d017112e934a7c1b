// src/cli/handlers.rs
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::articles::{self, open_input};
use crate::config::Config;
use crate::engine::Engine;
use crate::error::SupercatError;
use crate::graph::{self, bfs_order};
use crate::sink::ResultSink;

use super::args::{OutputArgs, ScoreArgs};

/// Folds command-line flags over the loaded configuration.
pub fn apply_score_overrides(config: &mut Config, args: &ScoreArgs) {
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(alpha) = args.alpha {
        config.walk.alpha = alpha;
    }
    if let Some(iterations) = args.iterations {
        config.walk.iterations = iterations;
    }
    if let Some(threads) = args.threads {
        config.dispatch.max_threads = threads;
    }
    if let Some(targets) = &args.targets {
        config.targets.names.clone_from(targets);
    }
    if args.dedup_edges {
        config.graph.dedup_edges = true;
    }
    apply_output_overrides(config, &args.output);
}

fn apply_output_overrides(config: &mut Config, output: &OutputArgs) {
    if let Some(format) = output.format {
        config.output.format = format;
    }
    if output.precision.is_some() {
        config.output.precision = output.precision;
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    match path {
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("Failed to create {}", p.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// Handles the score command.
///
/// # Errors
/// Returns error if an input is missing, the configuration is invalid, or
/// results cannot be written.
pub fn handle_score(mut config: Config, args: &ScoreArgs) -> Result<()> {
    apply_score_overrides(&mut config, args);
    config.validate()?;

    let starts: Box<dyn BufRead + Send> = match &args.starts {
        Some(path) => Box::new(BufReader::new(
            open_input(path).context("Failed to open start categories")?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let (graph, load) = graph::load_edges_file(&args.edges, config.graph.dedup_edges)
        .context("Failed to load edge records")?;

    let sink = ResultSink::new(
        open_output(args.output.output.as_deref())?,
        config.output.format,
        config.output.precision,
    );

    let timer = Instant::now();
    let engine = Engine::new(&graph, config);
    let stats = engine.score_reader(starts, &sink)?;
    sink.finish().context("Failed to flush results")?;

    eprintln!(
        "{} {} categories scored in {}ms ({} unknown, {} unscored, {} malformed edge records)",
        "done:".green().bold(),
        stats.scored,
        timer.elapsed().as_millis(),
        stats.unknown,
        stats.unscored,
        load.malformed
    );

    if stats.failed > 0 {
        anyhow::bail!("{} score vectors could not be written", stats.failed);
    }
    Ok(())
}

/// Handles the order command.
///
/// # Errors
/// Returns error if the edge file is missing or the root is not in the graph.
pub fn handle_order(config: &Config, edges: &Path, root: Option<&str>) -> Result<()> {
    let (graph, _) = graph::load_edges_file(edges, config.graph.dedup_edges)
        .context("Failed to load edge records")?;

    let root_name = root.unwrap_or(config.graph.root.as_str());
    let root = graph.lookup(root_name).ok_or_else(|| {
        SupercatError::InvalidConfig(format!("root category {root_name} is not in the graph"))
    })?;

    let mut out = BufWriter::new(io::stdout().lock());
    let order = bfs_order(&graph, root);
    for id in &order {
        writeln!(out, "{}", graph.name(*id))?;
    }
    out.flush()?;

    eprintln!(
        "{} {} of {} categories reachable from {root_name}",
        "done:".green().bold(),
        order.len(),
        graph.len()
    );
    Ok(())
}

/// Handles the articles command.
///
/// # Errors
/// Returns error if an input is missing or results cannot be written.
pub fn handle_articles(
    mut config: Config,
    scores: &Path,
    article_path: &Path,
    output: &OutputArgs,
) -> Result<()> {
    apply_output_overrides(&mut config, output);

    let (table, _) = articles::load_score_table_file(scores)
        .context("Failed to load category scores")?;
    let reader = BufReader::new(open_input(article_path).context("Failed to open articles")?);

    let sink = ResultSink::new(
        open_output(output.output.as_deref())?,
        config.output.format,
        config.output.precision,
    );
    let stats = articles::score_articles(reader, &table, &sink)?;
    sink.finish().context("Failed to flush results")?;

    eprintln!(
        "{} {} articles scored ({} without scored categories, {} malformed lines)",
        "done:".green().bold(),
        stats.emitted,
        stats.unmatched,
        stats.malformed
    );
    Ok(())
}
