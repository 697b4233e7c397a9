//! Analysis configuration file
//!
//! Every section is optional; missing keys keep their defaults.
//!
//! # Example tracefold.toml
//!
//! ```toml
//! [pattern]
//! consider_order = true
//! consider_immediate_occurrence = false
//! consider_duplicates = true
//! occurrence_cap = 3
//! window = 2
//!
//! [automaton]
//! build_with_loop = true
//! include_root = false
//!
//! [scoring]
//! homogeneity = true
//! disparity = true
//! disparity_only_if_homogeneity_zero = false
//! ```

use crate::automaton::AutomatonConfig;
use crate::pattern::PatternConfig;
use crate::scoring::EvalOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root of a tracefold.toml file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub pattern: PatternConfig,
    pub automaton: AutomatonConfig,
    pub scoring: EvalOptions,
}

impl AnalysisConfig {
    /// Load the configuration from a TOML file
    ///
    /// ```no_run
    /// use tracefold::config::AnalysisConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = AnalysisConfig::from_toml("tracefold.toml")?;
    /// println!("window = {}", config.pattern.window);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert!(config.automaton.build_with_loop);
        assert!(config.scoring.disparity_only_if_homogeneity_zero);
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
            [pattern]
            consider_duplicates = false
            occurrence_cap = 4

            [scoring]
            disparity = false
        "#;
        let config = AnalysisConfig::from_toml_str(toml).unwrap();

        assert!(!config.pattern.consider_duplicates);
        assert!(config.pattern.consider_order);
        assert_eq!(config.pattern.occurrence_cap, 4);
        assert!(!config.scoring.disparity);
        assert!(config.scoring.homogeneity);
        assert_eq!(config.automaton, AutomatonConfig::default());
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(AnalysisConfig::from_toml_str("[clusters]\nk = 3").is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(AnalysisConfig::from_toml_str("[pattern]\nwindow = \"wide\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[automaton]\ninclude_root = false").unwrap();

        let config = AnalysisConfig::from_toml(file.path()).unwrap();
        assert!(!config.automaton.include_root);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = AnalysisConfig::from_toml("/nonexistent/tracefold.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tracefold.toml"));
    }
}
