use spendlens_core::SourceFormat;
use thiserror::Error;

/// File-level failures. Either one skips the file, never the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Unrecognized format: no known header signature matched")]
    FormatUnrecognized,
    #[error("No {format} column mapping matched; missing columns: {}", .missing.join(", "))]
    MappingIncomplete {
        format: SourceFormat,
        missing: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_incomplete_names_columns() {
        let err = ImportError::MappingIncomplete {
            format: SourceFormat::Chase,
            missing: vec!["Trans Date".to_string(), "Amount".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "No chase column mapping matched; missing columns: Trans Date, Amount"
        );
    }
}
