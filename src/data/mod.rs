/// Data layer: launch records, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchTable (read once, never mutated)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site predicate ∧ payload predicate → borrowed rows
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  per-site successes / per-class counts → ChartData
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub(crate) mod test_support;
