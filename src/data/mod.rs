/// Data layer: core types, loading, and the filter-to-view transform.
///
/// Architecture:
/// ```text
///  subcounty_metrics.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → MetricsTable (read-only after load)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ MetricsTable  │  Vec<SubcountyRow>, county + service column index
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   view    │  (table, FilterSelection) → DerivedView + Kpis
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod view;
