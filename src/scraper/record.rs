use std::collections::HashSet;

use url::Url;

use crate::models::{ContactResult, SiteRecord};

const EMPTY_SENTINEL: &str = "None";

/// Packages one site's extraction results into a spreadsheet row. Pure
/// transformation, no failure modes.
pub fn build_record(site_url: &str, contacts: &ContactResult) -> SiteRecord {
    SiteRecord {
        company_name: company_name_from_url(site_url),
        emails: join_or_sentinel(&contacts.emails),
        phone: join_or_sentinel(&contacts.phones),
    }
}

/// Second-to-last host label, capitalized. Knowingly naive for multi-part
/// suffixes: `www.example.co.uk` yields "Co", not "Example".
fn company_name_from_url(site_url: &str) -> String {
    let host = Url::parse(site_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_default();

    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    let label = match labels.len() {
        0 => "",
        1 => labels[0],
        n => labels[n - 2],
    };
    capitalize(label)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str(),
        None => String::new(),
    }
}

fn join_or_sentinel(values: &HashSet<String>) -> String {
    if values.is_empty() {
        return EMPTY_SENTINEL.to_string();
    }
    // The sets carry no order; sort so spreadsheet cells are stable.
    let mut sorted: Vec<&str> = values.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(", ")
}
