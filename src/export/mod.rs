pub mod exporter;

pub use exporter::SpreadsheetExporter;
