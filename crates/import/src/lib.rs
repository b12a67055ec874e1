pub mod capital_one;
pub mod chase;
pub mod config;
pub mod detect;
pub mod error;
pub mod mapping;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod raw_table;

pub use capital_one::CapitalOneNormalizer;
pub use chase::ChaseNormalizer;
pub use config::{ConfigError, PipelineConfig};
pub use detect::{DetectorSignature, FormatDetector};
pub use error::ImportError;
pub use mapping::{CanonicalColumn, ColumnSignature, ColumnSpec, ResolvedColumns};
pub use normalize::Normalizer;
pub use pipeline::{IngestReport, IngestWarning, Pipeline, SourceFile};
pub use raw_table::{RawField, RawTable, RawTableError};

pub mod import {
    use crate::*;

    pub fn read_csv<R: std::io::Read>(name: &str, data: R) -> Result<SourceFile, RawTableError> {
        Ok(SourceFile::new(name, RawTable::from_csv_reader(data)?))
    }

    pub fn create_pipeline(config: PipelineConfig) -> Pipeline {
        Pipeline::new(config)
    }
}
