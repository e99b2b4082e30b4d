use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::browser::{create_session_pool, pool_size, SessionPool};
use crate::config::Config;
use crate::export::SpreadsheetExporter;
use crate::models::{Result, ScrapeReport, SiteRecord};
use crate::scraper::contact_extractor::ContactExtractor;
use crate::scraper::page_source::{BrowserPage, ReadinessConfig};
use crate::scraper::record::build_record;

pub struct Orchestrator {
    config: Config,
}

impl Orchestrator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fans one task per configured site onto the session pool, collects
    /// rows as tasks complete and writes the spreadsheet. Row order equals
    /// completion order, not input order.
    pub async fn run(&self) -> Result<ScrapeReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        let sites = &self.config.sites;
        if sites.is_empty() {
            warn!("No sites configured; nothing to scrape");
            return Ok(ScrapeReport {
                records: Vec::new(),
                sites_total: 0,
                sites_with_contacts: 0,
                started_at,
                duration_ms: 0,
            });
        }

        info!("🚀 Scraping {} site(s) for contact info", sites.len());

        let size = pool_size(sites.len(), self.config.browser.max_sessions);
        let (pool, manager) = create_session_pool(self.config.browser.clone(), size);
        let extractor = Arc::new(ContactExtractor::new(&self.config.scraping));
        let readiness = ReadinessConfig::from(&self.config.browser);

        let mut tasks = JoinSet::new();
        for site in sites.iter().cloned() {
            let pool = pool.clone();
            let extractor = Arc::clone(&extractor);
            tasks.spawn(async move { scrape_site(pool, extractor, readiness, site).await });
        }

        let mut records = Vec::with_capacity(sites.len());
        while let Some(joined) = tasks.join_next().await {
            // A task-level failure (session acquisition, panic) aborts the
            // whole run; scrape failures were already degraded to empty
            // sets inside the extractor.
            let record = joined??;
            info!("✅ {}: emails={}, phone={}", record.company_name, record.emails, record.phone);
            records.push(record);
        }

        drop(pool);
        manager.shutdown().await;

        let exporter = SpreadsheetExporter::new();
        exporter.export(&records, &self.config.output_path()).await?;

        let report = ScrapeReport {
            sites_total: records.len(),
            sites_with_contacts: records
                .iter()
                .filter(|r| r.emails != "None" || r.phone != "None")
                .count(),
            records,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            "🏁 Scrape complete: {}/{} site(s) yielded contacts in {}ms",
            report.sites_with_contacts, report.sites_total, report.duration_ms
        );
        Ok(report)
    }
}

/// One site, one task: check a session out of the pool, scrape through it,
/// hand it back. Checkout blocks while the pool is exhausted, which is
/// what bounds concurrency to the session cap.
async fn scrape_site(
    pool: SessionPool,
    extractor: Arc<ContactExtractor>,
    readiness: ReadinessConfig,
    site: String,
) -> Result<SiteRecord> {
    let session = pool.get().await?;
    let page = BrowserPage::new((*session).clone(), readiness);
    let contacts = extractor.scrape(&site, &page).await;
    drop(session); // session returns to the pool before record building

    if contacts.is_empty() {
        warn!("No contacts found on {}", site);
    }
    Ok(build_record(&site, &contacts))
}
