//! Capital One card exports.
//!
//! Purchases land in `Debit`, payments and refunds in `Credit`, both
//! unsigned. Only the date column is required; a missing, blank or unreadable
//! debit or credit counts as zero.

use rust_decimal::Decimal;
use spendlens_core::{Money, SourceFormat};

use crate::mapping::{CanonicalColumn, ColumnSignature, ColumnSpec, ResolvedColumns};
use crate::normalize::{amount_field, Normalizer};
use crate::raw_table::RawField;

pub fn default_signatures() -> Vec<ColumnSignature> {
    use CanonicalColumn::*;

    vec![ColumnSignature::new(
        "capital-one",
        vec![
            ColumnSpec::required("Transaction Date", Date),
            ColumnSpec::optional("Description", Description),
            ColumnSpec::optional("Category", Category),
            ColumnSpec::optional("Debit", Debit),
            ColumnSpec::optional("Credit", Credit),
        ],
    )]
}

#[derive(Debug, Clone)]
pub struct CapitalOneNormalizer {
    signatures: Vec<ColumnSignature>,
}

impl CapitalOneNormalizer {
    pub fn new(signatures: Vec<ColumnSignature>) -> Self {
        Self { signatures }
    }
}

impl Default for CapitalOneNormalizer {
    fn default() -> Self {
        Self::new(default_signatures())
    }
}

impl Normalizer for CapitalOneNormalizer {
    fn format(&self) -> SourceFormat {
        SourceFormat::CapitalOne
    }

    fn signatures(&self) -> &[ColumnSignature] {
        &self.signatures
    }

    fn amount(&self, row: &[RawField], columns: &ResolvedColumns, row_index: usize) -> Option<Money> {
        let side = |column| {
            amount_field(columns.cell(row, column), row_index).unwrap_or(Decimal::ZERO)
        };
        let debit = side(CanonicalColumn::Debit);
        let credit = side(CanonicalColumn::Credit);
        Some(Money::from_decimal(debit - credit))
    }
}
