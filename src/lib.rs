//! Tracefold - behavioural sequence clustering, folding and scoring
//!
//! This library groups recorded event sequences (user journeys, call
//! traces) by normalized pattern, folds them into a shared automaton that
//! can be rendered as a Graphviz graph, and scores how homogeneous each
//! cluster is and how distinct its members remain.

pub mod automaton;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod json_output;
pub mod pattern;
pub mod scoring;
pub mod step;

pub use automaton::{Automaton, AutomatonConfig};
pub use cluster::{cluster_sequences, ClusterModel};
pub use error::{Error, Result};
pub use pattern::{normalize, PatternConfig};
pub use step::{Sequence, Token};
