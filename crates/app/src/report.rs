use serde::Serialize;
use std::fmt::Write as _;

use spendlens_core::{
    available_months, category_breakdown, period_summary, time_series, CanonicalTransaction,
    CategoryAmount, DateRange, Granularity, Month, PeriodSummary, TimeSeries, TransactionQuery,
};
use spendlens_import::IngestReport;

pub struct Options {
    pub month: Option<Month>,
    pub range: Option<DateRange>,
    pub granularity: Granularity,
    pub category: Option<String>,
    pub include_transactions: bool,
    /// Files that could not be read at all, as `"name: reason"`.
    pub unreadable: Vec<String>,
}

/// Everything a display collaborator needs, computed once from one ingest.
#[derive(Debug, Serialize)]
pub struct Report {
    pub month: Option<String>,
    pub summary: PeriodSummary,
    pub breakdown: Vec<CategoryAmount>,
    pub range: Option<DateRange>,
    pub time_series: TimeSeries,
    pub warnings: Vec<String>,
    pub noise_removed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<CanonicalTransaction>>,
}

impl Report {
    pub fn build(ingest: &IngestReport, options: Options) -> Self {
        let all = &ingest.transactions;
        // No rows means no month to report on, even when one was asked for.
        let month = if all.is_empty() {
            None
        } else {
            options
                .month
                .or_else(|| available_months(all).first().copied())
        };

        let (summary, breakdown) = match month {
            Some(month) => {
                let in_month = TransactionQuery {
                    range: Some(month.range()),
                    grouped_category: None,
                };
                let rows: Vec<CanonicalTransaction> =
                    in_month.filter(all).into_iter().cloned().collect();
                (period_summary(all, month), category_breakdown(&rows))
            }
            None => (PeriodSummary::default(), Vec::new()),
        };

        let time_series = match options.range {
            Some(range) => time_series(all, range, options.granularity),
            None => TimeSeries {
                granularity: options.granularity,
                ..TimeSeries::default()
            },
        };

        let transactions = options.include_transactions.then(|| {
            let query = TransactionQuery {
                range: options.range,
                grouped_category: options.category,
            };
            query.filter(all).into_iter().cloned().collect()
        });

        Report {
            month: month.map(|m| m.to_string()),
            summary,
            breakdown,
            range: options.range,
            time_series,
            warnings: options
                .unreadable
                .into_iter()
                .chain(ingest.warnings.iter().map(ToString::to_string))
                .collect(),
            noise_removed: ingest.noise_removed,
            transactions,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for warning in &self.warnings {
            let _ = writeln!(out, "warning: {warning}");
        }

        let Some(month) = &self.month else {
            out.push_str("No transactions to report.\n");
            return out;
        };

        let _ = writeln!(out, "Summary for {month}");
        let _ = writeln!(out, "  Spending  {:>14}", self.summary.spending.to_string());
        let _ = writeln!(out, "  Income    {:>14}", self.summary.income.to_string());
        let _ = writeln!(out, "  Net       {:>14}", self.summary.net.to_string());

        out.push_str("\nCategory breakdown\n");
        if self.breakdown.is_empty() {
            out.push_str("  No expenses for this month.\n");
        }
        for entry in &self.breakdown {
            let _ = writeln!(
                out,
                "  {:<20}{:>14}",
                entry.grouped_category,
                entry.amount.to_string()
            );
        }

        if let Some(range) = self.range {
            let _ = writeln!(
                out,
                "\nSpending by {} ({range})",
                self.time_series.granularity
            );
            for total in &self.time_series.totals {
                let _ = writeln!(out, "  {:<12}{:>14}", total.period, total.total.to_string());
                for bucket in self.time_series.buckets.iter().filter(|b| b.period == total.period) {
                    let _ = writeln!(
                        out,
                        "    {:<18}{:>12}",
                        bucket.grouped_category,
                        bucket.amount.to_string()
                    );
                }
            }
        }

        if let Some(transactions) = &self.transactions {
            out.push_str("\nTransactions\n");
            for tx in transactions {
                let date = tx.date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
                let amount = tx.amount.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string());
                let _ = writeln!(
                    out,
                    "  {:<10}  {:<32}  {:<18}  {:<12}{:>12}",
                    date,
                    tx.description.as_deref().unwrap_or(""),
                    tx.grouped_category,
                    tx.account,
                    amount
                );
            }
        }

        out
    }
}
