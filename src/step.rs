//! Steps, canonical tokens and raw sequences
//!
//! A step is either a scalar (`"scan"`, `5`) or a small compound of scalar
//! sub-fields (`["scan", -2]`). Every algorithm in the crate compares steps
//! through their canonical [`Token`]: compound sub-fields are joined with `_`
//! after dropping the empty ones (`null`, `false`, `""` and numeric zero).
//!
//! ```
//! use tracefold::step::parse_sequences;
//!
//! let sequences = parse_sequences(r#"[[["scan", 0], ["scan", -2], ["pay", 5]]]"#)?;
//! let tokens: Vec<String> = sequences[0].tokens().iter().map(|t| t.to_string()).collect();
//! assert_eq!(tokens, vec!["scan", "scan_-2", "pay_5"]);
//! # Ok::<(), tracefold::Error>(())
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Borrow;
use std::fmt;

/// Canonical string form of a step. Two steps are equal iff their tokens are.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Token(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token(value)
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One raw step of a sequence, as read from input
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// String, number or boolean
    Scalar(Value),
    /// Ordered sub-fields, each a scalar (or `null`)
    Compound(Vec<Value>),
}

impl Step {
    /// Validate a JSON value as a step
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Err(Error::invalid("a step cannot be null")),
            Value::Object(_) => Err(Error::invalid(format!(
                "a step must be a scalar or a list of scalars, got object {}",
                value
            ))),
            Value::Array(fields) => {
                if let Some(nested) = fields
                    .iter()
                    .find(|f| matches!(f, Value::Array(_) | Value::Object(_)))
                {
                    return Err(Error::invalid(format!(
                        "step sub-fields must be scalars, got {}",
                        nested
                    )));
                }
                Ok(Step::Compound(fields.clone()))
            }
            scalar => Ok(Step::Scalar(scalar.clone())),
        }
    }

    /// Canonical token of this step
    pub fn token(&self) -> Token {
        match self {
            Step::Scalar(value) => Token(scalar_text(value)),
            Step::Compound(fields) => {
                let parts: Vec<String> = fields
                    .iter()
                    .filter(|f| !is_empty_field(f))
                    .map(scalar_text)
                    .collect();
                Token(parts.join("_"))
            }
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Step::Scalar(value) => value.clone(),
            Step::Compound(fields) => Value::Array(fields.clone()),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_empty_field(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// An ordered list of raw steps. Immutable once read.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    steps: Vec<Step>,
}

impl Sequence {
    /// Build a sequence of scalar string steps (mostly for tests and tooling)
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: labels
                .into_iter()
                .map(|l| Step::Scalar(Value::String(l.into())))
                .collect(),
        }
    }

    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Validate a JSON value as a sequence: it must be an array of steps
    pub fn from_value(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| {
            Error::invalid(format!("a sequence must be a list of steps, got {}", value))
        })?;
        let steps = items.iter().map(Step::from_value).collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Canonical tokens, one per step
    pub fn tokens(&self) -> Vec<Token> {
        self.steps.iter().map(Step::token).collect()
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.steps.iter().map(Step::to_value).collect())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

/// Parse a JSON document holding a list of non-empty sequences
pub fn parse_sequences(json: &str) -> Result<Vec<Sequence>> {
    let document: Value = serde_json::from_str(json)
        .map_err(|e| Error::invalid(format!("malformed JSON: {}", e)))?;
    sequences_from_value(&document)
}

/// Parse one JSON sequence per non-blank line
pub fn parse_sequence_lines(text: &str) -> Result<Vec<Sequence>> {
    let mut sequences = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .map_err(|e| Error::invalid(format!("line {}: malformed JSON: {}", line_no + 1, e)))?;
        let sequence = Sequence::from_value(&value)
            .map_err(|e| Error::invalid(format!("line {}: {}", line_no + 1, e)))?;
        if sequence.is_empty() {
            return Err(Error::invalid(format!("line {}: empty sequence", line_no + 1)));
        }
        sequences.push(sequence);
    }
    if sequences.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(sequences)
}

/// Parse a model document: a list of clusters, each a list of sequences
pub fn parse_model(json: &str) -> Result<Vec<Vec<Sequence>>> {
    let document: Value = serde_json::from_str(json)
        .map_err(|e| Error::invalid(format!("malformed JSON: {}", e)))?;
    let clusters = document.as_array().ok_or_else(|| {
        Error::invalid("a model must be a list of clusters".to_string())
    })?;
    if clusters.is_empty() {
        return Err(Error::EmptyInput);
    }
    clusters
        .iter()
        .enumerate()
        .map(|(index, cluster)| {
            sequences_from_value(cluster)
                .map_err(|e| Error::invalid(format!("cluster {}: {}", index, e)))
        })
        .collect()
}

/// Validate an already-parsed JSON value as a list of non-empty sequences
pub fn sequences_from_value(document: &Value) -> Result<Vec<Sequence>> {
    let items = document.as_array().ok_or_else(|| {
        Error::invalid(format!("expected a list of sequences, got {}", document))
    })?;
    if items.is_empty() {
        return Err(Error::EmptyInput);
    }
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let sequence = Sequence::from_value(item)
                .map_err(|e| Error::invalid(format!("sequence {}: {}", index, e)))?;
            if sequence.is_empty() {
                return Err(Error::invalid(format!("sequence {} is empty", index)));
            }
            Ok(sequence)
        })
        .collect()
}
