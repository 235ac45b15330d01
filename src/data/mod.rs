/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .yaml / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → generic serde_yaml::Value
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ StudentRoster │  `students` entries → Vec<StudentRecord>
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  gpa >= threshold → matching indices
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
