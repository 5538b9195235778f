/// Data layer: core types, loading, caching, filtering, and aggregation.
///
/// Architecture:
/// ```text
///   uploaded .csv bytes
///        │
///        ▼
///   ┌──────────┐     ┌─────────┐
///   │  loader   │ ◄──► │  cache   │  content fingerprint → parsed Dataset
///   └──────────┘     └─────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, unique country/sector lists
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply country/sector selections → row indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group-by-sum reductions feeding each chart
///   └───────────┘
/// ```
pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
