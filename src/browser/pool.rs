use std::sync::Arc;

use mobc::{Manager, Pool};
use thirtyfour::error::WebDriverError;
use thirtyfour::WebDriver;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::browser::session::create_session;
use crate::config::BrowserConfig;

/// Launches headless sessions on demand for the pool and remembers every
/// one it started, so the orchestrator can quit them all after the run.
#[derive(Clone)]
pub struct SessionManager {
    config: BrowserConfig,
    live: Arc<Mutex<Vec<WebDriver>>>,
}

impl SessionManager {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            live: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Quits every browser this manager launched. Call only once no task
    /// is still holding a checked-out session.
    pub async fn shutdown(&self) {
        let mut live = self.live.lock().await;
        info!("🧹 Closing {} browser session(s)", live.len());
        for session in live.drain(..) {
            if let Err(e) = session.quit().await {
                warn!("Failed to quit browser session: {}", e);
            }
        }
    }
}

#[async_trait::async_trait]
impl Manager for SessionManager {
    type Connection = WebDriver;
    type Error = WebDriverError;

    async fn connect(&self) -> Result<Self::Connection, Self::Error> {
        let session = create_session(&self.config).await?;
        let mut live = self.live.lock().await;
        live.push(session.clone());
        debug!("✅ Headless session {} launched", live.len());
        Ok(session)
    }

    async fn check(&self, conn: Self::Connection) -> Result<Self::Connection, Self::Error> {
        conn.execute("return 1;", Vec::new()).await?;
        Ok(conn)
    }
}

pub type SessionPool = Pool<SessionManager>;

/// Live browser processes are capped at the smaller of the site count and
/// the configured maximum, never below one.
pub fn pool_size(site_count: usize, max_sessions: usize) -> usize {
    site_count.min(max_sessions).max(1)
}

/// Builds the session pool plus a manager handle kept outside the pool
/// for the final shutdown pass.
pub fn create_session_pool(config: BrowserConfig, size: usize) -> (SessionPool, SessionManager) {
    let manager = SessionManager::new(config);
    let handle = manager.clone();
    // Checkout queues until a session frees up; a site mid-retry can hold
    // one for a while, so no checkout timeout.
    let pool = Pool::builder()
        .max_open(size as u64)
        .max_idle(size as u64)
        .get_timeout(None)
        .build(manager);
    info!("🏊 Browser session pool created (cap: {})", size);
    (pool, handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_is_capped_by_max_sessions() {
        assert_eq!(pool_size(7, 5), 5);
    }

    #[test]
    fn pool_shrinks_to_site_count() {
        assert_eq!(pool_size(3, 5), 3);
        assert_eq!(pool_size(1, 5), 1);
    }

    #[test]
    fn pool_never_sizes_to_zero() {
        assert_eq!(pool_size(0, 5), 1);
        assert_eq!(pool_size(4, 0), 1);
    }
}
