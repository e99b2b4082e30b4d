use serde_json::json;
use thirtyfour::error::WebDriverResult;
use thirtyfour::{ChromeCapabilities, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use tracing::debug;

use crate::config::BrowserConfig;

/// Headless Chrome tuned for text scraping: images, stylesheets, cookies
/// and page scripts are all blocked to keep page weight down, and driver
/// log noise is silenced.
pub fn build_capabilities() -> WebDriverResult<ChromeCapabilities> {
    let mut caps = DesiredCapabilities::chrome();
    caps.set_headless()?;
    caps.set_disable_gpu()?;
    caps.set_no_sandbox()?;
    caps.add_arg("--log-level=3")?;
    caps.add_experimental_option("excludeSwitches", json!(["enable-logging"]))?;
    caps.add_experimental_option(
        "prefs",
        json!({
            "profile.managed_default_content_settings.images": 2,
            "profile.default_content_setting_values.notifications": 2,
            "profile.managed_default_content_settings.stylesheets": 2,
            "profile.managed_default_content_settings.cookies": 2,
            "profile.managed_default_content_settings.javascript": 2,
        }),
    )?;
    Ok(caps)
}

/// Connects a fresh session to the configured WebDriver endpoint.
/// There is no retry here: an unreachable driver is fatal for the run.
pub async fn create_session(config: &BrowserConfig) -> WebDriverResult<WebDriver> {
    let caps = build_capabilities()?;
    debug!("🔌 Connecting to WebDriver at {}", config.webdriver_url);
    let session = WebDriver::new(&config.webdriver_url, caps).await?;
    Ok(session)
}
