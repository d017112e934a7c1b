// src/engine.rs
//! Main execution logic: scores a stream of start categories in parallel.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::sync::{Mutex, PoisonError};

use crate::config::Config;
use crate::dispatch::{DispatchStats, Dispatcher, TaskOutcome};
use crate::error::Result;
use crate::graph::CategoryGraph;
use crate::score::{build_scorer, ResolvedTargets, ScoreVector, Scorer};
use crate::sink::ResultSink;

/// Binds a loaded graph to a run configuration.
pub struct Engine<'g> {
    graph: &'g CategoryGraph,
    targets: ResolvedTargets,
    config: Config,
}

impl<'g> Engine<'g> {
    #[must_use]
    pub fn new(graph: &'g CategoryGraph, config: Config) -> Self {
        let targets = config.targets.set().resolve(graph);
        Self {
            graph,
            targets,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scores every name from `names` and writes each vector to `sink`.
    ///
    /// # Errors
    /// Returns error if the worker pool cannot be created.
    pub fn score_stream<I, W>(&self, names: I, sink: &ResultSink<W>) -> Result<DispatchStats>
    where
        I: Iterator<Item = String> + Send,
        W: Write + Send,
    {
        self.dispatch(names, |name, vector| sink.emit(name, &vector))
    }

    /// Scores the start names read line by line from `reader`.
    ///
    /// Lines that are not valid UTF-8 are decoded lossily and dispatched like
    /// any other name. A read error ends the stream after the tasks already
    /// handed out have finished, and is then returned.
    ///
    /// # Errors
    /// Returns error if the worker pool cannot be created or reading fails.
    pub fn score_reader<R, W>(&self, reader: R, sink: &ResultSink<W>) -> Result<DispatchStats>
    where
        R: BufRead + Send,
        W: Write + Send,
    {
        let failure = Mutex::new(None);
        let stats = self.score_stream(start_names(reader, &failure), sink)?;
        match failure.into_inner().unwrap_or_else(PoisonError::into_inner) {
            Some(e) => Err(e.into()),
            None => Ok(stats),
        }
    }

    /// Scores every name and returns the vectors keyed by category.
    ///
    /// # Errors
    /// Returns error if the worker pool cannot be created.
    pub fn collect<I>(&self, names: I) -> Result<(BTreeMap<String, ScoreVector>, DispatchStats)>
    where
        I: Iterator<Item = String> + Send,
    {
        let results = Mutex::new(BTreeMap::new());
        let stats = self.dispatch(names, |name, vector| {
            results
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(name.to_string(), vector);
            Ok(())
        })?;
        let results = results.into_inner().unwrap_or_else(PoisonError::into_inner);
        Ok((results, stats))
    }

    fn dispatch<I, F>(&self, names: I, emit: F) -> Result<DispatchStats>
    where
        I: Iterator<Item = String> + Send,
        F: Fn(&str, ScoreVector) -> Result<()> + Sync,
    {
        let dispatcher = Dispatcher::new(
            self.config.dispatch.max_threads,
            self.config.dispatch.progress_every,
        )?;
        // Depth annotation fans out with par_iter and must stay within max_threads.
        let scorer = dispatcher.install(|| {
            build_scorer(
                self.config.mode,
                self.graph,
                &self.targets,
                self.config.walk.params(),
            )
        });

        let stats = dispatcher.run(names, |name| {
            score_one(self.graph, scorer.as_ref(), name, &emit)
        });

        tracing::info!(
            dispatched = stats.dispatched,
            scored = stats.scored,
            unknown = stats.unknown,
            unscored = stats.unscored,
            failed = stats.failed,
            "scoring finished"
        );
        Ok(stats)
    }
}

fn score_one<F>(graph: &CategoryGraph, scorer: &dyn Scorer, name: &str, emit: &F) -> TaskOutcome
where
    F: Fn(&str, ScoreVector) -> Result<()>,
{
    let Some(start) = graph.lookup(name) else {
        tracing::warn!(category = name, "could not look up start category, skipping");
        return TaskOutcome::Unknown;
    };

    let Some(vector) = scorer.score(start) else {
        tracing::debug!(category = name, "no score produced");
        return TaskOutcome::Unscored;
    };

    match emit(name, vector) {
        Ok(()) => TaskOutcome::Scored,
        Err(e) => {
            tracing::error!(category = name, error = %e, "failed to write scores");
            TaskOutcome::Failed
        }
    }
}

/// Turns a line-oriented reader into trimmed, non-blank start names.
///
/// The first read error is parked in `failure` and ends the stream.
pub fn start_names<'a, R>(
    reader: R,
    failure: &'a Mutex<Option<io::Error>>,
) -> impl Iterator<Item = String> + Send + 'a
where
    R: BufRead + Send + 'a,
{
    let mut records = reader.split(b'\n');
    std::iter::from_fn(move || loop {
        let raw = match records.next()? {
            Ok(raw) => raw,
            Err(e) => {
                *failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(e);
                return None;
            }
        };

        let line = String::from_utf8_lossy(&raw);
        if let Cow::Owned(_) = line {
            tracing::debug!(record = %line, "start name is not valid UTF-8");
        }
        let name = line.trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    })
}
