use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub sites: Vec<String>,
    pub browser: BrowserConfig,
    pub scraping: ScrapingConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowserConfig {
    /// WebDriver endpoint (chromedriver / selenium hub). Overridable with
    /// the WEBDRIVER_URL environment variable.
    pub webdriver_url: String,
    pub max_sessions: usize,
    pub page_ready_timeout_ms: u64,
    pub ready_poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapingConfig {
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
    pub filename: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Seed list from the campaign this tool was first built for.
            sites: vec![
                "https://simoscamping.gr/epikinonia/".to_string(),
                "https://www.armenistis.gr/en/contact-form-en".to_string(),
                "https://www.ouzounibeach.gr/el/epikoinonia.html".to_string(),
                "https://www.rellasamortiser.gr/el/contact".to_string(),
                "https://www.infoquest.gr/en/contact".to_string(),
            ],
            browser: BrowserConfig {
                webdriver_url: "http://localhost:9515".to_string(),
                max_sessions: 5,
                page_ready_timeout_ms: 2000,
                ready_poll_interval_ms: 100,
            },
            scraping: ScrapingConfig {
                retry_attempts: 3,
                retry_delay_ms: 2000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            output: OutputConfig {
                directory: "out".to_string(),
                filename: "contact_info.xlsx".to_string(),
            },
        }
    }
}

impl Config {
    pub fn output_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.output.directory).join(&self.output.filename)
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_limits() {
        let config = Config::default();
        assert_eq!(config.browser.max_sessions, 5);
        assert_eq!(config.scraping.retry_attempts, 3);
        assert_eq!(config.scraping.retry_delay_ms, 2000);
        assert_eq!(config.output.filename, "contact_info.xlsx");
        assert_eq!(config.sites.len(), 5);
    }

    #[test]
    fn parses_yaml_config() {
        let yaml = r#"
sites:
  - https://a.test/contact
browser:
  webdriver_url: http://chrome:4444/wd/hub
  max_sessions: 2
  page_ready_timeout_ms: 5000
  ready_poll_interval_ms: 250
scraping:
  retry_attempts: 1
  retry_delay_ms: 0
logging:
  level: debug
output:
  directory: exports
  filename: contacts.xlsx
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sites, vec!["https://a.test/contact"]);
        assert_eq!(config.browser.webdriver_url, "http://chrome:4444/wd/hub");
        assert_eq!(config.browser.max_sessions, 2);
        assert_eq!(
            config.output_path(),
            std::path::Path::new("exports").join("contacts.xlsx")
        );
    }
}
