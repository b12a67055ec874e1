//! Chase card exports.
//!
//! One signed `Amount` column with purchases negative and payments positive.
//! The date header changed from `Trans Date` to `Transaction Date` at some
//! point; both layouts are accepted, older first.

use spendlens_core::{Money, SourceFormat};

use crate::mapping::{CanonicalColumn, ColumnSignature, ColumnSpec, ResolvedColumns};
use crate::normalize::{amount_field, Normalizer};
use crate::raw_table::RawField;

pub fn default_signatures() -> Vec<ColumnSignature> {
    use CanonicalColumn::*;

    let layout = |name: &str, date_header: &str| {
        ColumnSignature::new(
            name,
            vec![
                ColumnSpec::required(date_header, Date),
                ColumnSpec::optional("Description", Description),
                ColumnSpec::optional("Category", Category),
                ColumnSpec::required("Amount", Amount),
            ],
        )
    };

    vec![
        layout("chase-legacy", "Trans Date"),
        layout("chase", "Transaction Date"),
    ]
}

#[derive(Debug, Clone)]
pub struct ChaseNormalizer {
    signatures: Vec<ColumnSignature>,
}

impl ChaseNormalizer {
    pub fn new(signatures: Vec<ColumnSignature>) -> Self {
        Self { signatures }
    }
}

impl Default for ChaseNormalizer {
    fn default() -> Self {
        Self::new(default_signatures())
    }
}

impl Normalizer for ChaseNormalizer {
    fn format(&self) -> SourceFormat {
        SourceFormat::Chase
    }

    fn signatures(&self) -> &[ColumnSignature] {
        &self.signatures
    }

    /// Sign flipped so purchases come out positive. Unreadable amounts stay
    /// `None` rather than being guessed as zero.
    fn amount(&self, row: &[RawField], columns: &ResolvedColumns, row_index: usize) -> Option<Money> {
        amount_field(columns.cell(row, CanonicalColumn::Amount), row_index)
            .map(|raw| Money::from_decimal(-raw))
    }
}
