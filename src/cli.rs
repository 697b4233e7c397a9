//! CLI argument parsing for tracefold

use crate::config::AnalysisConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for cluster tables and score reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

/// Output format for the automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// Graphviz DOT description (default)
    Dot,
    /// States and the DOT text as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "tracefold")]
#[command(version)]
#[command(about = "Cluster, fold and score behavioural event sequences", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Load analysis settings from a TOML file (flags override it)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read one JSON sequence per line instead of a single JSON list
    #[arg(long, global = true)]
    pub lines: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Group sequences that follow the same pattern
    Cluster(ClusterArgs),
    /// Fold sequences into a shared automaton and print it
    Graph(GraphArgs),
    /// Score how homogeneous and distinct the clusters are
    Score(ScoreArgs),
    /// Compare two inline JSON sequences
    Pairwise(PairwiseArgs),
}

/// Pattern normalization flags shared by `cluster` and `score`
#[derive(Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Sort the steps before building the pattern
    #[arg(long)]
    pub ignore_order: bool,

    /// Collapse back-to-back repeats into one step
    #[arg(long)]
    pub ignore_immediate: bool,

    /// Drop values already present in the pattern
    #[arg(long)]
    pub ignore_duplicates: bool,

    /// Back-to-back repeats kept when duplicates are dropped (minimum 2)
    #[arg(long, value_name = "N")]
    pub occurrence_cap: Option<usize>,

    /// Compare sliding windows of this width instead of whole patterns
    #[arg(long, value_name = "N")]
    pub window: Option<usize>,
}

impl PatternArgs {
    pub fn apply(&self, config: &mut AnalysisConfig) {
        let pattern = &mut config.pattern;
        if self.ignore_order {
            pattern.consider_order = false;
        }
        if self.ignore_immediate {
            pattern.consider_immediate_occurrence = false;
        }
        if self.ignore_duplicates {
            pattern.consider_duplicates = false;
        }
        if let Some(cap) = self.occurrence_cap {
            pattern.occurrence_cap = cap;
        }
        if let Some(window) = self.window {
            pattern.window = window;
        }
    }
}

#[derive(Args, Debug)]
pub struct ClusterArgs {
    /// JSON input file, or - for stdin
    pub input: PathBuf,

    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the result to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GraphArgs {
    /// JSON input file, or - for stdin
    pub input: PathBuf,

    /// Keep back-to-back repeats as separate states
    #[arg(long)]
    pub no_loop: bool,

    /// Leave the root state's attribute line out of the DOT output
    #[arg(long)]
    pub no_root: bool,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "dot")]
    pub format: GraphFormat,

    /// Write the result to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GraphArgs {
    pub fn apply(&self, config: &mut AnalysisConfig) {
        if self.no_loop {
            config.automaton.build_with_loop = false;
        }
        if self.no_root {
            config.automaton.include_root = false;
        }
    }
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// JSON input file, or - for stdin
    pub input: PathBuf,

    /// Treat the input as a model: a list of clusters of sequences
    #[arg(long)]
    pub model: bool,

    /// Re-normalize members and score with weak disparity
    #[arg(long)]
    pub weak: bool,

    /// Skip the homogeneity metric
    #[arg(long)]
    pub no_homogeneity: bool,

    /// Skip the disparity metric
    #[arg(long)]
    pub no_disparity: bool,

    /// Score disparity even when homogeneity is above zero
    #[arg(long)]
    pub always_disparity: bool,

    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ScoreArgs {
    pub fn apply(&self, config: &mut AnalysisConfig) {
        self.pattern.apply(config);
        let scoring = &mut config.scoring;
        if self.no_homogeneity {
            scoring.homogeneity = false;
        }
        if self.no_disparity {
            scoring.disparity = false;
        }
        if self.always_disparity {
            scoring.disparity_only_if_homogeneity_zero = false;
        }
    }
}

#[derive(Args, Debug)]
pub struct PairwiseArgs {
    /// First sequence as inline JSON, e.g. '["a","b"]'
    pub first: String,

    /// Second sequence as inline JSON
    pub second: String,

    /// Keep back-to-back repeats when comparing predecessors
    #[arg(long)]
    pub keep_repeats: bool,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}
