//! CSV output format for cluster tables
//!
//! One row per distinct raw sequence of each cluster, ready for
//! spreadsheet analysis.

use crate::cluster::{ClusterModel, ClusterRow};

/// CSV output formatter
#[derive(Debug, Default)]
pub struct ClusterCsv {
    rows: Vec<ClusterRow>,
}

impl ClusterCsv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_model(model: &ClusterModel) -> Self {
        Self { rows: model.rows() }
    }

    /// Add a row to the output
    pub fn add_row(&mut self, row: ClusterRow) {
        self.rows.push(row);
    }

    fn header() -> &'static str {
        "cluster_id,cluster_size,pattern,count,sequence"
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_row(row: &ClusterRow) -> String {
        format!(
            "{},{},{},{},{}",
            row.cluster_id,
            row.cluster_size,
            Self::escape_field(&row.pattern),
            row.count,
            Self::escape_field(&row.sequence)
        )
    }

    /// Generate the complete CSV document
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(Self::header());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }

        output
    }
}
