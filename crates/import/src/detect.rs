use serde::{Deserialize, Serialize};
use spendlens_core::SourceFormat;

/// Headers whose joint presence identifies a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorSignature {
    pub format: SourceFormat,
    pub headers: Vec<String>,
}

impl DetectorSignature {
    pub fn new(format: SourceFormat, headers: &[&str]) -> Self {
        Self {
            format,
            headers: headers.iter().map(|h| h.to_string()).collect(),
        }
    }

    pub fn matches(&self, headers: &[String]) -> bool {
        self.headers
            .iter()
            .all(|wanted| headers.iter().any(|h| h.trim() == wanted.as_str()))
    }
}

/// Classifies a table by its headers. Signatures are tried in order and the
/// first match wins.
///
/// A single header is enough to claim a file, so an unrelated export that
/// happens to carry an `Amount` column is read as Chase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDetector {
    signatures: Vec<DetectorSignature>,
}

impl FormatDetector {
    pub fn new(signatures: Vec<DetectorSignature>) -> Self {
        Self { signatures }
    }

    pub fn signatures(&self) -> &[DetectorSignature] {
        &self.signatures
    }

    /// Never fails; `SourceFormat::Unknown` when nothing matches.
    pub fn detect(&self, headers: &[String]) -> SourceFormat {
        self.signatures
            .iter()
            .find(|sig| sig.matches(headers))
            .map(|sig| sig.format)
            .unwrap_or(SourceFormat::Unknown)
    }
}

pub fn default_signatures() -> Vec<DetectorSignature> {
    vec![
        DetectorSignature::new(SourceFormat::Chase, &["Amount"]),
        DetectorSignature::new(SourceFormat::CapitalOne, &["Debit"]),
    ]
}

impl Default for FormatDetector {
    fn default() -> Self {
        Self::new(default_signatures())
    }
}
