//! Query-time use of value sources: function scoring, boosting, range
//! filtering, and sorting by value.

/// Function queries: score every document by a value source, and boost hits.
pub mod function_query;
/// Range filtering on a value source.
pub mod range;
/// Top-k sorting by a value source using reusable fillers.
pub mod sort;
/// Scored and sorted result rows.
pub mod types;

pub use function_query::{boost_hits, FunctionQuery};
pub use range::{range_filter, ValueRange};
pub use sort::{sort_by_source, SortOrder};
pub use types::{ScoredDoc, SortedDoc};
