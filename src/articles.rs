// src/articles.rs
//! Article scoring: folds the vectors of an article's categories into one.
//!
//! An article's score for a target is the sum of its categories' scores for
//! that target, divided by the sum over all targets.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::{Result, SupercatError};
use crate::score::ScoreVector;
use crate::sink::ResultSink;

const PROGRESS_EVERY: usize = 100_000;

/// Category name to its score vector.
pub type ScoreTable = HashMap<String, ScoreVector>;

/// Counters for one article run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleStats {
    pub lines: usize,
    pub emitted: usize,
    /// Articles none of whose categories carry a usable score.
    pub unmatched: usize,
    pub malformed: usize,
}

/// Parses `<name>> <target>: <score>, ...`. Segments without a usable
/// `target: number` pair are skipped.
#[must_use]
pub fn parse_score_line(line: &str) -> Option<(String, ScoreVector)> {
    let (name, rest) = line.split_once('>')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut vector = ScoreVector::new();
    for segment in rest.split(',') {
        let Some((target, value)) = segment.split_once(':') else {
            continue;
        };
        let target = target.trim();
        let Ok(value) = value.trim().parse::<f64>() else {
            continue;
        };
        if !target.is_empty() {
            vector.insert(target.to_string(), value);
        }
    }

    Some((name.to_string(), vector))
}

/// Reads a score table produced by the text output format.
///
/// Returns the table and the number of lines that could not be used.
///
/// # Errors
/// Returns error if reading fails.
pub fn load_score_table<R: BufRead>(reader: R) -> Result<(ScoreTable, usize)> {
    let mut table = ScoreTable::new();
    let mut skipped = 0;

    for raw in reader.split(b'\n') {
        let raw = raw?;
        let Ok(line) = std::str::from_utf8(&raw) else {
            skipped += 1;
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_score_line(line) {
            Some((name, vector)) => {
                table.insert(name, vector);
            }
            None => skipped += 1,
        }
    }

    Ok((table, skipped))
}

/// Opens `path` and loads it with [`load_score_table`].
///
/// # Errors
/// Returns `MissingInput` if the file does not exist.
pub fn load_score_table_file(path: &Path) -> Result<(ScoreTable, usize)> {
    let file = open_input(path)?;
    let (table, skipped) = load_score_table(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        categories = table.len(),
        skipped,
        "category score table loaded"
    );
    Ok((table, skipped))
}

/// Combines the vectors of `categories`. Categories absent from `table` are ignored.
///
/// Returns `None` when nothing contributes a positive total.
pub fn aggregate<'a, I>(table: &ScoreTable, categories: I) -> Option<ScoreVector>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sums = ScoreVector::new();
    for category in categories {
        let Some(vector) = table.get(category) else {
            continue;
        };
        for (target, score) in vector {
            *sums.entry(target.clone()).or_insert(0.0) += score;
        }
    }

    let total: f64 = sums.values().sum();
    if total <= 0.0 {
        return None;
    }
    for score in sums.values_mut() {
        *score /= total;
    }
    Some(sums)
}

/// Scores every `<article>> <cat> <cat> ...` line and emits it through `sink`.
///
/// # Errors
/// Returns error if reading the input or writing a result fails.
pub fn score_articles<R, W>(reader: R, table: &ScoreTable, sink: &ResultSink<W>) -> Result<ArticleStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = ArticleStats::default();

    for raw in reader.split(b'\n') {
        let raw = raw?;
        stats.lines += 1;
        if stats.lines % PROGRESS_EVERY == 0 {
            tracing::info!(lines = stats.lines, "article lines processed");
        }

        let Ok(line) = std::str::from_utf8(&raw) else {
            tracing::debug!(line = stats.lines, "article line is not valid UTF-8");
            stats.malformed += 1;
            continue;
        };

        let Some((article, categories)) = line.split_once('>') else {
            if !line.trim().is_empty() {
                stats.malformed += 1;
            }
            continue;
        };

        match aggregate(table, categories.split_whitespace()) {
            Some(vector) => {
                sink.emit(article.trim(), &vector)?;
                stats.emitted += 1;
            }
            None => {
                tracing::debug!(article = article.trim(), "no scored categories");
                stats.unmatched += 1;
            }
        }
    }

    Ok(stats)
}

/// Opens an input file, reporting absence as `MissingInput`.
///
/// # Errors
/// Returns `MissingInput` if absent, `Io` if it cannot be opened.
pub fn open_input(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(SupercatError::MissingInput(path.to_path_buf()));
    }
    File::open(path).map_err(|e| SupercatError::io(e, path))
}
