use spendlens_core::{CanonicalTransaction, CategoryTaxonomy, NoisePhraseList, SourceFormat};
use std::fmt;

use crate::capital_one::CapitalOneNormalizer;
use crate::chase::ChaseNormalizer;
use crate::config::PipelineConfig;
use crate::detect::FormatDetector;
use crate::error::ImportError;
use crate::normalize::Normalizer;
use crate::raw_table::RawTable;

/// One uploaded file, already read into a table.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub table: RawTable,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, table: RawTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

/// A file that was skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestWarning {
    pub file: String,
    pub error: ImportError,
}

impl fmt::Display for IngestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.error)
    }
}

#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub transactions: Vec<CanonicalTransaction>,
    pub warnings: Vec<IngestWarning>,
    /// Rows dropped as settlement noise.
    pub noise_removed: usize,
}

/// Detect → normalize → categorize per file, then drop settlement noise over
/// the combined result.
pub struct Pipeline {
    detector: FormatDetector,
    normalizers: Vec<Box<dyn Normalizer>>,
    noise: NoisePhraseList,
    taxonomy: CategoryTaxonomy,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        tracing::debug!(
            detector_signatures = config.detector.len(),
            noise_phrases = config.noise_phrases.phrases().len(),
            categories = config.categories.len(),
            "Pipeline configured"
        );
        Self {
            detector: FormatDetector::new(config.detector),
            normalizers: vec![
                Box::new(ChaseNormalizer::new(config.chase)),
                Box::new(CapitalOneNormalizer::new(config.capital_one)),
            ],
            noise: config.noise_phrases,
            taxonomy: config.categories,
        }
    }

    pub fn detector(&self) -> &FormatDetector {
        &self.detector
    }

    pub fn taxonomy(&self) -> &CategoryTaxonomy {
        &self.taxonomy
    }

    pub fn noise_phrases(&self) -> &NoisePhraseList {
        &self.noise
    }

    pub fn normalizer(&self, format: SourceFormat) -> Option<&dyn Normalizer> {
        self.normalizers
            .iter()
            .find(|n| n.format() == format)
            .map(|n| n.as_ref())
    }

    /// Canonical rows for one table, before noise filtering.
    pub fn normalize_table(&self, table: &RawTable) -> Result<Vec<CanonicalTransaction>, ImportError> {
        let format = self.detector.detect(table.headers());
        if !format.is_known() {
            return Err(ImportError::FormatUnrecognized);
        }
        let normalizer = self
            .normalizer(format)
            .ok_or(ImportError::FormatUnrecognized)?;
        normalizer.normalize(table, &self.taxonomy)
    }

    pub fn run<I>(&self, files: I) -> IngestReport
    where
        I: IntoIterator<Item = SourceFile>,
    {
        let mut report = IngestReport::default();

        for file in files {
            match self.normalize_table(&file.table) {
                Ok(rows) => {
                    tracing::debug!(file = %file.name, rows = rows.len(), "File normalized");
                    report.transactions.extend(rows);
                }
                Err(error) => {
                    tracing::warn!(file = %file.name, "Skipping file: {error}");
                    report.warnings.push(IngestWarning {
                        file: file.name,
                        error,
                    });
                }
            }
        }

        report.noise_removed = self.noise.retain_real(&mut report.transactions);

        tracing::info!(
            transactions = report.transactions.len(),
            skipped_files = report.warnings.len(),
            noise_removed = report.noise_removed,
            "Ingest complete"
        );

        report
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendlens_core::{category_breakdown, period_summary, CategoryAmount, Money, Month, OTHER};

    fn file(name: &str, csv: &[u8]) -> SourceFile {
        SourceFile::new(name, RawTable::from_csv_reader(csv).unwrap())
    }

    const CHASE_CSV: &[u8] = b"Transaction Date,Post Date,Description,Category,Type,Amount\n\
        01/05/2024,01/06/2024,WHOLE FOODS,Groceries,Sale,-50.00\n\
        01/09/2024,01/10/2024,CHIPOTLE,Food & Drink,Sale,-30.00\n\
        01/20/2024,01/20/2024,AUTOMATIC PAYMENT - THANK,,Payment,800.00\n";

    const CAPONE_CSV: &[u8] = b"Transaction Date,Posted Date,Card No.,Description,Category,Debit,Credit\n\
        2024-01-31,2024-01-31,1234,PAYROLL DEPOSIT,,,1000.00\n\
        2024-02-02,2024-02-03,1234,CAPITAL ONE AUTOPAY PYMT,Payment/Credit,,250.00\n";

    // Chase-shaped but with neither date header.
    const BROKEN_CSV: &[u8] = b"Posting Date,Description,Amount\n01/07/2024,SHOULD NOT APPEAR,-9.99\n";

    #[test]
    fn end_to_end_month_report() {
        let report = Pipeline::default().run(vec![
            file("chase.csv", CHASE_CSV),
            file("capone.csv", CAPONE_CSV),
        ]);

        assert!(report.warnings.is_empty());
        assert_eq!(report.noise_removed, 2);
        assert_eq!(report.transactions.len(), 3);

        let january = Month::new(2024, 1).unwrap();
        let summary = period_summary(&report.transactions, january);
        assert_eq!(summary.spending, Money::from_cents(8000));
        assert_eq!(summary.income, Money::from_cents(100000));
        assert_eq!(summary.net, Money::from_cents(92000));

        let breakdown = category_breakdown(&report.transactions);
        assert_eq!(
            breakdown,
            vec![
                CategoryAmount {
                    grouped_category: "Dining Out".to_string(),
                    amount: Money::from_cents(3000),
                },
                CategoryAmount {
                    grouped_category: "Groceries".to_string(),
                    amount: Money::from_cents(5000),
                },
            ]
        );
    }

    #[test]
    fn failing_file_is_isolated() {
        let pipeline = Pipeline::default();
        let files = vec![
            file("one.csv", CHASE_CSV),
            file("two.csv", BROKEN_CSV),
            file("three.csv", CAPONE_CSV),
        ];
        let report = pipeline.run(files);

        let mut expected = pipeline.normalize_table(&file("one.csv", CHASE_CSV).table).unwrap();
        expected.extend(pipeline.normalize_table(&file("three.csv", CAPONE_CSV).table).unwrap());
        pipeline.noise_phrases().retain_real(&mut expected);

        assert_eq!(report.transactions, expected);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].file, "two.csv");
        assert!(matches!(
            report.warnings[0].error,
            ImportError::MappingIncomplete { format: SourceFormat::Chase, .. }
        ));
        assert!(report
            .transactions
            .iter()
            .all(|tx| tx.description.as_deref() != Some("SHOULD NOT APPEAR")));
    }

    #[test]
    fn unknown_format_is_one_warning() {
        let report = Pipeline::default().run(vec![
            file("mystery.csv", b"Date,Payee,Value\n2024-01-01,X,1\n"),
            file("chase.csv", CHASE_CSV),
        ]);
        assert_eq!(
            report.warnings,
            vec![IngestWarning {
                file: "mystery.csv".to_string(),
                error: ImportError::FormatUnrecognized,
            }]
        );
        assert_eq!(report.transactions.len(), 2);
        assert!(report.warnings[0].to_string().starts_with("mystery.csv: "));
    }

    #[test]
    fn empty_batch_is_empty_report() {
        let report = Pipeline::default().run(Vec::<SourceFile>::new());
        assert!(report.transactions.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn header_only_file_contributes_nothing() {
        let report = Pipeline::default().run(vec![file("empty.csv", b"Transaction Date,Amount\n")]);
        assert!(report.transactions.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn every_row_is_grouped() {
        let report = Pipeline::default().run(vec![
            file("chase.csv", CHASE_CSV),
            file("capone.csv", CAPONE_CSV),
        ]);
        let payroll = report
            .transactions
            .iter()
            .find(|tx| tx.description.as_deref() == Some("PAYROLL DEPOSIT"))
            .unwrap();
        assert_eq!(payroll.category, None);
        assert_eq!(payroll.grouped_category, OTHER);
    }

    #[test]
    fn config_drives_pipeline() {
        let config = PipelineConfig::from_toml(
            r#"
noise_phrases = ["whole foods"]

[categories]
"Food & Drink" = "Restaurants"
"#,
        )
        .unwrap();
        let report = Pipeline::new(config).run(vec![file("chase.csv", CHASE_CSV)]);
        // Default phrases are replaced, so the payment row survives.
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.transactions[0].grouped_category, "Restaurants");
    }

    #[test]
    fn normalizer_lookup_by_format() {
        let pipeline = Pipeline::default();
        assert_eq!(pipeline.normalizer(SourceFormat::Chase).unwrap().account(), "Chase");
        assert_eq!(
            pipeline.normalizer(SourceFormat::CapitalOne).unwrap().account(),
            "Capital One"
        );
        assert!(pipeline.normalizer(SourceFormat::Unknown).is_none());
    }
}
