/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   outlook .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  clean rows → Dataset (cached per path)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year / commodity / region / note → FilteredSet
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  Pivot, CommodityTotal, Metrics
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
