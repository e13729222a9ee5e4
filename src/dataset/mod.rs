//! Dataset analytics pipeline
//!
//! Loading and derivation, filtering, and aggregate statistics over the
//! obesity survey table.

pub mod filter;
pub mod loader;
pub mod stats;

pub use filter::{DatasetView, FilterCriteria};
pub use loader::{DataError, DataResult, Dataset, DatasetCache, RAW_COLUMN_COUNT};
pub use stats::{
    category_distribution, category_means, obesity_share_by_family_history, summarize,
    CategoryCount, CategoryMean, NumericAttr, ObesityShare, SummaryStats,
};
