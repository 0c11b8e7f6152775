pub mod export;
pub mod import;

pub use export::{ExportDocument, Exporter};
pub use import::{ImportDocument, ImportedCategories, parse_import};
