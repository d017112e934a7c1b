// src/graph/parse.rs
//! Edge record parsing and graph loading.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, SupercatError};

use super::store::CategoryGraph;

/// One `<child> <parent>` relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRecord<'a> {
    pub child: &'a str,
    pub parent: &'a str,
}

/// Counters gathered while reading edge records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub lines: usize,
    pub edges: usize,
    pub malformed: usize,
}

/// Splits a record at its first space. The parent is everything after it.
#[must_use]
pub fn parse_edge(line: &str) -> Option<EdgeRecord<'_>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let (child, parent) = line.split_once(' ')?;
    if child.is_empty() || parent.is_empty() {
        return None;
    }
    Some(EdgeRecord { child, parent })
}

/// Builds a graph from a stream of edge records.
///
/// Malformed records are skipped and counted. Blank lines are ignored.
///
/// # Errors
/// Returns error if reading from `reader` fails.
pub fn load_edges<R: BufRead>(reader: R, dedup: bool) -> Result<(CategoryGraph, LoadStats)> {
    let mut graph = if dedup {
        CategoryGraph::with_dedup()
    } else {
        CategoryGraph::new()
    };
    let mut stats = LoadStats::default();

    for raw in reader.split(b'\n') {
        let raw = raw?;
        let line = String::from_utf8_lossy(&raw);
        stats.lines += 1;

        if line.trim().is_empty() {
            continue;
        }

        let Some(record) = parse_edge(&line) else {
            tracing::debug!(line = stats.lines, record = %line, "skipping malformed edge record");
            stats.malformed += 1;
            continue;
        };

        graph.add_edge(record.parent, record.child);
        stats.edges += 1;
    }

    Ok((graph, stats))
}

/// Opens `path` and loads it with [`load_edges`].
///
/// # Errors
/// Returns `MissingInput` if the file does not exist, `Io` if it cannot be read.
pub fn load_edges_file(path: &Path, dedup: bool) -> Result<(CategoryGraph, LoadStats)> {
    if !path.exists() {
        return Err(SupercatError::MissingInput(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|e| SupercatError::io(e, path))?;
    let (graph, stats) = load_edges(BufReader::new(file), dedup)?;

    tracing::info!(
        path = %path.display(),
        nodes = graph.len(),
        edges = graph.edge_count(),
        malformed = stats.malformed,
        "category graph loaded"
    );

    Ok((graph, stats))
}
