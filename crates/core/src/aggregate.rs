//! Read-only reports over a canonical transaction collection.
//!
//! Every function recomputes from the slice it is given. Rows with a null
//! amount never contribute; rows with a null date never fall inside a range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::money::Money;
use crate::period::{DateRange, Granularity, Month};
use crate::transaction::CanonicalTransaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub spending: Money,
    pub income: Money,
    pub net: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub grouped_category: String,
    pub amount: Money,
}

/// One (period, grouped category) cell of a time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationBucket {
    pub period: String,
    pub grouped_category: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotal {
    pub period: String,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    pub granularity: Granularity,
    /// Sorted by period, then grouped category.
    pub buckets: Vec<AggregationBucket>,
    /// Sorted by period.
    pub totals: Vec<PeriodTotal>,
}

impl TimeSeries {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Spending, income and net for the rows dated inside `period`.
pub fn period_summary(
    transactions: &[CanonicalTransaction],
    period: impl Into<DateRange>,
) -> PeriodSummary {
    let range = period.into();
    let mut spending = Money::zero();
    let mut inflow = Money::zero();

    for amount in transactions
        .iter()
        .filter(|tx| range.contains_opt(tx.date))
        .filter_map(|tx| tx.amount)
    {
        if amount.is_outflow() {
            spending = spending + amount;
        } else if amount.is_inflow() {
            inflow = inflow + amount;
        }
    }

    let income = -inflow;
    PeriodSummary {
        spending,
        income,
        net: income - spending,
    }
}

/// Spending per grouped category, sorted by category name. Categories with no
/// spending are left out.
pub fn category_breakdown(transactions: &[CanonicalTransaction]) -> Vec<CategoryAmount> {
    let mut sums: BTreeMap<&str, Money> = BTreeMap::new();
    for tx in transactions {
        if let Some(amount) = tx.amount.filter(|a| a.is_outflow()) {
            let entry = sums.entry(tx.grouped_category.as_str()).or_default();
            *entry = *entry + amount;
        }
    }

    sums.into_iter()
        .map(|(category, amount)| CategoryAmount {
            grouped_category: category.to_string(),
            amount,
        })
        .collect()
}

/// Spending bucketed by period and grouped category within `range`.
pub fn time_series(
    transactions: &[CanonicalTransaction],
    range: DateRange,
    granularity: Granularity,
) -> TimeSeries {
    let mut cells: BTreeMap<(String, &str), Money> = BTreeMap::new();
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();

    for tx in transactions {
        let (Some(date), Some(amount)) = (tx.date, tx.amount) else {
            continue;
        };
        if !amount.is_outflow() || !range.contains(date) {
            continue;
        }

        let key = granularity.period_key(date);
        let cell = cells
            .entry((key.clone(), tx.grouped_category.as_str()))
            .or_default();
        *cell = *cell + amount;
        let total = totals.entry(key).or_default();
        *total = *total + amount;
    }

    TimeSeries {
        granularity,
        buckets: cells
            .into_iter()
            .map(|((period, category), amount)| AggregationBucket {
                period,
                grouped_category: category.to_string(),
                amount,
            })
            .collect(),
        totals: totals
            .into_iter()
            .map(|(period, total)| PeriodTotal { period, total })
            .collect(),
    }
}

/// Months that have at least one dated row, newest first.
pub fn available_months(transactions: &[CanonicalTransaction]) -> Vec<Month> {
    let months: BTreeSet<Month> = transactions
        .iter()
        .filter_map(|tx| tx.date)
        .map(Month::containing)
        .collect();
    months.into_iter().rev().collect()
}

/// Earliest to latest dated row, or `None` when nothing is dated.
pub fn date_bounds(transactions: &[CanonicalTransaction]) -> Option<DateRange> {
    let mut dates = transactions.iter().filter_map(|tx| tx.date);
    let first = dates.next()?;
    let (start, end) = dates.fold((first, first), |(lo, hi), d: NaiveDate| (lo.min(d), hi.max(d)));
    Some(DateRange::new(start, end))
}

/// Row filter behind the transactions table: an optional date range and an
/// optional grouped category (`None` means all categories).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQuery {
    pub range: Option<DateRange>,
    pub grouped_category: Option<String>,
}

impl TransactionQuery {
    pub fn matches(&self, tx: &CanonicalTransaction) -> bool {
        if let Some(range) = self.range {
            if !range.contains_opt(tx.date) {
                return false;
            }
        }
        match &self.grouped_category {
            Some(category) => tx.grouped_category == *category,
            None => true,
        }
    }

    pub fn filter<'a>(&self, transactions: &'a [CanonicalTransaction]) -> Vec<&'a CanonicalTransaction> {
        transactions.iter().filter(|tx| self.matches(tx)).collect()
    }
}
