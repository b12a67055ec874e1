use rust_decimal::Decimal;
use std::io::Read;
use thiserror::Error;

use crate::parse;

#[derive(Error, Debug)]
pub enum RawTableError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// An untyped cell as handed over by whoever read the file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawField {
    #[default]
    Empty,
    Text(String),
    Number(Decimal),
}

impl RawField {
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.trim().is_empty() {
            RawField::Empty
        } else {
            RawField::Text(s)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawField::Empty)
    }

    /// Trimmed, non-blank text. Numbers are rendered back to text.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawField::Empty => None,
            RawField::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            RawField::Number(n) => Some(n.to_string()),
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            RawField::Empty => None,
            RawField::Text(s) => parse::parse_amount(s),
            RawField::Number(n) => Some(*n),
        }
    }

    pub fn as_date(&self) -> Option<chrono::NaiveDate> {
        match self {
            RawField::Text(s) => parse::parse_date(s),
            RawField::Empty | RawField::Number(_) => None,
        }
    }
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        RawField::text(s)
    }
}

impl From<Decimal> for RawField {
    fn from(n: Decimal) -> Self {
        RawField::Number(n)
    }
}

/// Header list plus untyped rows for one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<RawField>>,
}

impl RawTable {
    /// Headers are trimmed; rows are kept as given.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<RawField>>) -> Self {
        Self {
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<RawField>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn has_header(&self, header: &str) -> bool {
        self.column_index(header).is_some()
    }

    /// Reads a headed CSV export. Short rows are tolerated; missing trailing
    /// cells read as `Empty`.
    pub fn from_csv_reader<R: Read>(data: R) -> Result<Self, RawTableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(record.iter().map(RawField::text).collect());
        }

        Ok(Self::new(headers, rows))
    }
}
