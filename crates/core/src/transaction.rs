use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Institution that produced an export, as recognised from its headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Chase,
    CapitalOne,
    Unknown,
}

impl SourceFormat {
    /// Literal stamped into `CanonicalTransaction::account`.
    pub fn account_name(self) -> &'static str {
        match self {
            SourceFormat::Chase => "Chase",
            SourceFormat::CapitalOne => "Capital One",
            SourceFormat::Unknown => "Unknown",
        }
    }

    pub fn is_known(self) -> bool {
        self != SourceFormat::Unknown
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Chase => write!(f, "chase"),
            SourceFormat::CapitalOne => write!(f, "capone"),
            SourceFormat::Unknown => write!(f, "unknown"),
        }
    }
}

/// One row of any export after normalization.
///
/// `amount` follows the canonical convention: positive is spending, negative
/// is income or credit. It is `None` only when a single-amount source carried
/// an unparsable value; such rows never contribute to totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTransaction {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Money>,
    pub account: String,
    pub grouped_category: String,
}

impl CanonicalTransaction {
    pub fn is_spending(&self) -> bool {
        self.amount.is_some_and(Money::is_outflow)
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_some_and(Money::is_inflow)
    }
}
