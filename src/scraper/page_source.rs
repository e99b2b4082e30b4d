use std::time::{Duration, Instant};

use async_trait::async_trait;
use thirtyfour::WebDriver;
use tracing::debug;

use crate::config::BrowserConfig;
use crate::models::Result;

/// Seam between the retry pipeline and the browser: anything that can turn
/// a URL into rendered page markup.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy)]
pub struct ReadinessConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl From<&BrowserConfig> for ReadinessConfig {
    fn from(config: &BrowserConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.page_ready_timeout_ms),
            poll_interval: Duration::from_millis(config.ready_poll_interval_ms.max(1)),
        }
    }
}

/// A checked-out browser session plus the readiness poll that stands in
/// for a fixed post-navigation sleep.
pub struct BrowserPage {
    session: WebDriver,
    readiness: ReadinessConfig,
}

impl BrowserPage {
    pub fn new(session: WebDriver, readiness: ReadinessConfig) -> Self {
        Self { session, readiness }
    }

    /// Polls `document.readyState` until the page reports "complete" or
    /// the bounded timeout elapses. A failing probe counts as not-ready
    /// rather than an error, so a page with scripting blocked still
    /// degrades to whatever markup has rendered.
    async fn wait_until_ready(&self) {
        let deadline = Instant::now() + self.readiness.timeout;
        loop {
            match self
                .session
                .execute("return document.readyState;", Vec::new())
                .await
            {
                Ok(ret) if ret.json().as_str() == Some("complete") => return,
                Ok(_) => {}
                Err(e) => debug!("readyState probe failed: {}", e),
            }
            if Instant::now() >= deadline {
                debug!(
                    "Page readiness timed out after {:?}, reading what rendered",
                    self.readiness.timeout
                );
                return;
            }
            tokio::time::sleep(self.readiness.poll_interval).await;
        }
    }
}

#[async_trait]
impl PageSource for BrowserPage {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.session.goto(url).await?;
        self.wait_until_ready().await;
        let html = self.session.source().await?;
        debug!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }
}
