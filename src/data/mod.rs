/// Data layer: core types, loading, label encoding, sampling, export.
///
/// Architecture:
/// ```text
///  yeast_data.txt / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  labels   │   │  sample   │  random rows → classifier
///   └──────────┘   └──────────┘
///                       │
///                       ▼
///                  ┌──────────┐
///                  │  export   │  sampled predictions → CSV
///                  └──────────┘
/// ```

pub mod export;
pub mod labels;
pub mod loader;
pub mod model;
pub mod sample;
