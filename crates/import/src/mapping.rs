//! Candidate header→canonical column signatures.
//!
//! Institutions rename export headers over time, so each source carries an
//! ordered list of signatures. The first one whose required headers are all
//! present is used.

use serde::{Deserialize, Serialize};

use crate::raw_table::{RawField, RawTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalColumn {
    Date,
    Description,
    Category,
    Amount,
    Debit,
    Credit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub header: String,
    pub column: CanonicalColumn,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl ColumnSpec {
    pub fn required(header: &str, column: CanonicalColumn) -> Self {
        Self {
            header: header.to_string(),
            column,
            required: true,
        }
    }

    pub fn optional(header: &str, column: CanonicalColumn) -> Self {
        Self {
            header: header.to_string(),
            column,
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSignature {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

impl ColumnSignature {
    pub fn new(name: &str, columns: Vec<ColumnSpec>) -> Self {
        Self {
            name: name.to_string(),
            columns,
        }
    }

    /// Required headers of this signature that `table` lacks, in signature order.
    pub fn missing(&self, table: &RawTable) -> Vec<String> {
        self.columns
            .iter()
            .filter(|spec| spec.required && !table.has_header(&spec.header))
            .map(|spec| spec.header.clone())
            .collect()
    }

    pub fn resolve(&self, table: &RawTable) -> Option<ResolvedColumns> {
        if !self.missing(table).is_empty() {
            return None;
        }
        let indices = self
            .columns
            .iter()
            .filter_map(|spec| table.column_index(&spec.header).map(|idx| (spec.column, idx)))
            .collect();
        Some(ResolvedColumns {
            signature: self.name.clone(),
            indices,
        })
    }
}

/// Column positions of one satisfied signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    signature: String,
    indices: Vec<(CanonicalColumn, usize)>,
}

impl ResolvedColumns {
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn index(&self, column: CanonicalColumn) -> Option<usize> {
        self.indices
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, idx)| *idx)
    }

    /// The cell for `column` in `row`. Unmapped columns and short rows read as empty.
    pub fn cell<'a>(&self, row: &'a [RawField], column: CanonicalColumn) -> &'a RawField {
        const EMPTY: &RawField = &RawField::Empty;
        self.index(column)
            .and_then(|idx| row.get(idx))
            .unwrap_or(EMPTY)
    }
}

/// First satisfied signature, or the missing headers of the closest candidate
/// (fewest missing; earlier wins ties).
pub fn resolve_first(
    signatures: &[ColumnSignature],
    table: &RawTable,
) -> Result<ResolvedColumns, Vec<String>> {
    let mut closest: Option<Vec<String>> = None;
    for signature in signatures {
        if let Some(resolved) = signature.resolve(table) {
            return Ok(resolved);
        }
        let missing = signature.missing(table);
        let closer = match &closest {
            Some(best) => missing.len() < best.len(),
            None => true,
        };
        if closer {
            closest = Some(missing);
        }
    }
    Err(closest.unwrap_or_default())
}
