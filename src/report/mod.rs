/// Appendix report: markdown with embedded images.
///
/// ```text
///  model_comparison.md
///        │
///        ▼
///   ┌──────────┐
///   │ scanner   │  lines → Heading / Paragraph / Image / MissingImage
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  view     │  blocks → egui widgets (format: inline markdown)
///   └──────────┘
/// ```

pub mod format;
pub mod scanner;
pub mod view;
