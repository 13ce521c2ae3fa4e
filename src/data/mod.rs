/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  t.txt, phi*.txt        results_new.txt
///        │                      │
///        ▼                      ▼
///   ┌──────────┐          ┌──────────┐
///   │  loader   │ columns  │  loader   │ table, header/footer skipped
///   └──────────┘          └──────────┘
///        │                      │
///        ▼                      ▼
///   BaselineDataset      ReferenceDataset
///        └──────────┬──────────┘
///                   ▼
///             ┌──────────┐
///             │ SignalSet │  4 paired entries + both time axes
///             └──────────┘
/// ```
pub mod loader;
pub mod model;
