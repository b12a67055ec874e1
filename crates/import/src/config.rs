use serde::{Deserialize, Serialize};
use spendlens_core::{CategoryTaxonomy, NoisePhraseList};
use std::path::Path;
use thiserror::Error;

use crate::detect::{self, DetectorSignature};
use crate::mapping::ColumnSignature;
use crate::{capital_one, chase};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Operator-maintained static data for a pipeline run. Any section left out
/// of a TOML file keeps its built-in default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub detector: Vec<DetectorSignature>,
    pub noise_phrases: NoisePhraseList,
    pub categories: CategoryTaxonomy,
    pub chase: Vec<ColumnSignature>,
    pub capital_one: Vec<ColumnSignature>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            detector: detect::default_signatures(),
            noise_phrases: NoisePhraseList::default(),
            categories: CategoryTaxonomy::default(),
            chase: chase::default_signatures(),
            capital_one: capital_one::default_signatures(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::CanonicalColumn;
    use spendlens_core::SourceFormat;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(PipelineConfig::from_toml("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn noise_phrases_override_only_that_section() {
        let config = PipelineConfig::from_toml(r#"noise_phrases = ["Online Transfer"]"#).unwrap();
        assert_eq!(config.noise_phrases.phrases(), ["online transfer"]);
        assert_eq!(config.categories, CategoryTaxonomy::default());
        assert_eq!(config.chase, chase::default_signatures());
    }

    #[test]
    fn categories_table() {
        let config = PipelineConfig::from_toml(
            r#"
[categories]
"Food & Drink" = "Restaurants"
"Bills & Utilities" = "Bills & Utilities"
"#,
        )
        .unwrap();
        assert_eq!(config.categories.group(Some("Food & Drink")), "Restaurants");
        assert_eq!(config.categories.group(Some("Groceries")), "Other");
    }

    #[test]
    fn detector_and_signatures() {
        let config = PipelineConfig::from_toml(
            r#"
[[detector]]
format = "capital_one"
headers = ["Debit", "Credit"]

[[capital_one]]
name = "capital-one-2025"
columns = [
  { header = "Date", column = "date" },
  { header = "Debit", column = "debit", required = false },
]
"#,
        )
        .unwrap();
        assert_eq!(config.detector.len(), 1);
        assert_eq!(config.detector[0].format, SourceFormat::CapitalOne);
        assert_eq!(config.capital_one[0].columns[0].column, CanonicalColumn::Date);
        assert_eq!(config.chase, chase::default_signatures());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(matches!(
            PipelineConfig::from_toml("noise_phrases = 3"),
            Err(ConfigError::Toml(_))
        ));
    }
}
