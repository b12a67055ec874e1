use spendlens_core::{CanonicalTransaction, CategoryTaxonomy, Money, SourceFormat};

use crate::error::ImportError;
use crate::mapping::{resolve_first, CanonicalColumn, ColumnSignature, ResolvedColumns};
use crate::raw_table::{RawField, RawTable};

/// Per-institution rules for turning a classified table into canonical rows.
///
/// Implementors supply their candidate signatures and their amount policy;
/// column resolution, date parsing, text backfill and category grouping are
/// shared.
pub trait Normalizer: Send + Sync {
    fn format(&self) -> SourceFormat;

    fn signatures(&self) -> &[ColumnSignature];

    /// Canonical (spending-positive) amount for one row.
    fn amount(&self, row: &[RawField], columns: &ResolvedColumns, row_index: usize) -> Option<Money>;

    fn account(&self) -> &'static str {
        self.format().account_name()
    }

    fn normalize(
        &self,
        table: &RawTable,
        taxonomy: &CategoryTaxonomy,
    ) -> Result<Vec<CanonicalTransaction>, ImportError> {
        let columns = resolve_first(self.signatures(), table).map_err(|missing| {
            ImportError::MappingIncomplete {
                format: self.format(),
                missing,
            }
        })?;

        tracing::debug!(
            format = %self.format(),
            signature = columns.signature(),
            rows = table.len(),
            "Column mapping resolved"
        );

        Ok(table
            .rows()
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let category = columns.cell(row, CanonicalColumn::Category).as_text();
                let grouped_category = taxonomy.group(category.as_deref()).to_string();
                CanonicalTransaction {
                    date: date_field(columns.cell(row, CanonicalColumn::Date), idx),
                    description: columns.cell(row, CanonicalColumn::Description).as_text(),
                    category,
                    amount: self.amount(row, &columns, idx),
                    account: self.account().to_string(),
                    grouped_category,
                }
            })
            .collect())
    }
}

fn date_field(field: &RawField, row_index: usize) -> Option<chrono::NaiveDate> {
    let date = field.as_date();
    if date.is_none() && !field.is_empty() {
        tracing::debug!(row = row_index, value = ?field, "Unparsable date, keeping row undated");
    }
    date
}

/// Amount cell as a decimal, logging cells that are present but unreadable.
pub(crate) fn amount_field(field: &RawField, row_index: usize) -> Option<rust_decimal::Decimal> {
    let amount = field.as_decimal();
    if amount.is_none() && !field.is_empty() {
        tracing::debug!(row = row_index, value = ?field, "Unparsable amount");
    }
    amount
}
