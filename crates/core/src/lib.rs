pub mod aggregate;
pub mod category;
pub mod money;
pub mod noise;
pub mod period;
pub mod transaction;

pub use aggregate::{
    available_months, category_breakdown, date_bounds, period_summary, time_series,
    AggregationBucket, CategoryAmount, PeriodSummary, PeriodTotal, TimeSeries, TransactionQuery,
};
pub use category::{CategoryTaxonomy, OTHER};
pub use money::Money;
pub use noise::NoisePhraseList;
pub use period::{DateRange, Granularity, Month, PeriodError};
pub use transaction::{CanonicalTransaction, SourceFormat};
