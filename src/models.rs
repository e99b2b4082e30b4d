use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Unique emails and phone numbers pulled out of one page's markup.
/// Native set semantics: deduplicated, no ordering guarantee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactResult {
    pub emails: HashSet<String>,
    pub phones: HashSet<String>,
}

impl ContactResult {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty()
    }
}

/// One spreadsheet row. Empty contact sets are written as the literal
/// sentinel "None".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub company_name: String,
    pub emails: String,
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct ScrapeReport {
    pub records: Vec<SiteRecord>,
    pub sites_total: usize,
    pub sites_with_contacts: usize,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}
