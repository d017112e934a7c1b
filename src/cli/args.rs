use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::score::ScoringMode;
use crate::sink::OutputFormat;

#[derive(Parser)]
#[command(
    name = "supercat",
    version,
    about = "Scores Wikipedia categories against a fixed set of top categories"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Configuration file (defaults to ./supercat.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Log debug diagnostics to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a score vector for every start category
    Score(ScoreArgs),
    /// Print categories in breadth-first order below the root category
    Order {
        /// Edge records, one `<child> <parent>` per line
        #[arg(long, value_name = "FILE")]
        edges: PathBuf,
        /// Root category (overrides `graph.root`)
        #[arg(long)]
        root: Option<String>,
    },
    /// Combine category vectors into per-article vectors
    Articles {
        /// Category score lines produced by `score`
        #[arg(long, value_name = "FILE")]
        scores: PathBuf,
        /// Article lines, `<article>> <category> <category> ...`
        #[arg(long, value_name = "FILE")]
        articles: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Edge records, one `<child> <parent>` per line
    #[arg(long, value_name = "FILE")]
    pub edges: PathBuf,
    /// Start categories, one per line (reads stdin when omitted)
    #[arg(long, value_name = "FILE")]
    pub starts: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub mode: Option<ScoringMode>,
    /// Restart probability
    #[arg(long)]
    pub alpha: Option<f64>,
    /// Diffusion steps per walk
    #[arg(long)]
    pub iterations: Option<usize>,
    /// Maximum concurrent walks
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,
    /// Comma-separated target categories
    #[arg(long, value_delimiter = ',')]
    pub targets: Option<Vec<String>>,
    /// Collapse repeated edge records
    #[arg(long)]
    pub dedup_edges: bool,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Fixed number of decimals in text output
    #[arg(long)]
    pub precision: Option<usize>,
    /// Write results here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
