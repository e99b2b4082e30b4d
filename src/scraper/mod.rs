pub mod contact_extractor;
pub mod orchestrator;
pub mod page_source;
pub mod record;

// Re-export the main types for easy importing
pub use contact_extractor::ContactExtractor;
pub use orchestrator::Orchestrator;
pub use page_source::{BrowserPage, PageSource};
