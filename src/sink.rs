// src/sink.rs
//! Serializes score vectors to the shared output stream, one line per category.

use std::fmt::Write as _;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::score::ScoreVector;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `<name>> <target>: <score>, ...`
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    category: &'a str,
    scores: &'a ScoreVector,
}

/// Single-writer output. Lines are formatted before the lock is taken.
pub struct ResultSink<W: Write> {
    out: Mutex<W>,
    format: OutputFormat,
    precision: Option<usize>,
}

impl<W: Write> ResultSink<W> {
    #[must_use]
    pub fn new(out: W, format: OutputFormat, precision: Option<usize>) -> Self {
        Self {
            out: Mutex::new(out),
            format,
            precision,
        }
    }

    /// Writes the line for `name`.
    ///
    /// # Errors
    /// Returns error if serialization or the underlying write fails.
    pub fn emit(&self, name: &str, scores: &ScoreVector) -> Result<()> {
        let line = self.format_line(name, scores)?;
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Renders one line, including the trailing newline.
    ///
    /// # Errors
    /// Returns error if JSON serialization fails.
    pub fn format_line(&self, name: &str, scores: &ScoreVector) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.text_line(name, scores)),
            OutputFormat::Json => {
                let mut line = serde_json::to_string(&JsonLine {
                    category: name,
                    scores,
                })?;
                line.push('\n');
                Ok(line)
            }
        }
    }

    fn text_line(&self, name: &str, scores: &ScoreVector) -> String {
        let mut line = format!("{name}> ");
        for (target, score) in scores {
            // Writing into a String cannot fail.
            let _ = match self.precision {
                Some(p) => write!(line, "{target}: {score:.p$}, "),
                None => write!(line, "{target}: {score}, "),
            };
        }
        line.push('\n');
        line
    }

    /// Flushes and hands back the writer.
    ///
    /// # Errors
    /// Returns error if the flush fails.
    pub fn finish(self) -> Result<W> {
        let mut out = self.out.into_inner().unwrap_or_else(PoisonError::into_inner);
        out.flush()?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector() -> ScoreVector {
        [("Law".to_string(), 0.25), ("Arts".to_string(), 0.5)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_text_line_alphabetical() {
        let sink = ResultSink::new(Vec::new(), OutputFormat::Text, None);
        sink.emit("Contracts", &vector()).unwrap();
        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(out, "Contracts> Arts: 0.5, Law: 0.25, \n");
    }

    #[test]
    fn test_fixed_precision() {
        let sink = ResultSink::new(Vec::new(), OutputFormat::Text, Some(3));
        let line = sink.format_line("X", &vector()).unwrap();
        assert_eq!(line, "X> Arts: 0.500, Law: 0.250, \n");
    }

    #[test]
    fn test_json_line() {
        let sink = ResultSink::new(Vec::new(), OutputFormat::Json, None);
        let line = sink.format_line("X", &vector()).unwrap();
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["category"], "X");
        assert_eq!(value["scores"]["Law"], 0.25);
    }
}
