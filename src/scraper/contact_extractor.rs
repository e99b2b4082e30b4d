use std::collections::HashSet;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, error, warn};

use crate::config::ScrapingConfig;
use crate::models::ContactResult;
use crate::scraper::page_source::PageSource;

pub struct ContactExtractor {
    email_regex: Regex,
    phone_regex: Regex,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl ContactExtractor {
    pub fn new(config: &ScrapingConfig) -> Self {
        Self {
            email_regex: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b")
                .unwrap(),
            // Spaced and unspaced digit-group layouts for one regional
            // numbering plan; anything else is deliberately not matched.
            phone_regex: Regex::new(
                r"\b(\d{5}\s\d{2}\s\d{3}|\d{5}\s\d{5}|\d{3}\s\d{4}\s\d{3}|\d{10})\b",
            )
            .unwrap(),
            retry_attempts: config.retry_attempts.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Pure extraction pass over raw markup: every grammar match goes into
    /// a set, so duplicates collapse and order is not preserved.
    pub fn extract(&self, html: &str) -> ContactResult {
        let emails: HashSet<String> = self
            .email_regex
            .find_iter(html)
            .map(|m| m.as_str().to_string())
            .collect();
        let phones: HashSet<String> = self
            .phone_regex
            .find_iter(html)
            .map(|m| m.as_str().to_string())
            .collect();

        debug!(
            "Extracted {} unique email(s) and {} unique phone(s)",
            emails.len(),
            phones.len()
        );
        ContactResult { emails, phones }
    }

    /// Retry-then-degrade: a fetch error is retried with a pause between
    /// attempts; exhausting them logs the error and yields empty sets, so
    /// one bad site never aborts the batch. All error classes get the same
    /// flat policy.
    pub async fn scrape(&self, url: &str, page: &dyn PageSource) -> ContactResult {
        for attempt in 1..=self.retry_attempts {
            match page.fetch(url).await {
                Ok(html) => return self.extract(&html),
                Err(e) if attempt < self.retry_attempts => {
                    warn!(
                        "Retrying {} (attempt {}/{}): {}",
                        url, attempt, self.retry_attempts, e
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => error!("Error scraping {}: {}", url, e),
            }
        }
        ContactResult::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::models::Result;

    fn extractor() -> ContactExtractor {
        ContactExtractor::new(&ScrapingConfig {
            retry_attempts: 3,
            retry_delay_ms: 0,
        })
    }

    #[test]
    fn emails_are_deduplicated_and_unordered() {
        let html = "<p>foo@bar.com</p><a href=mailto:sales@shop.gr>sales@shop.gr</a>foo@bar.com";
        let result = extractor().extract(html);
        assert_eq!(result.emails.len(), 2);
        assert!(result.emails.contains("foo@bar.com"));
        assert!(result.emails.contains("sales@shop.gr"));
    }

    #[test]
    fn near_emails_are_rejected() {
        let html = "not-an-email@ bare@domain plain.text @host.com";
        let result = extractor().extract(html);
        assert!(result.emails.is_empty());
    }

    #[test]
    fn all_four_phone_layouts_match() {
        let html = "a 12345 67 890 b 12345 67890 c 123 4567 890 d 1234567890 e";
        let result = extractor().extract(html);
        let expected: Vec<&str> = vec!["12345 67 890", "12345 67890", "123 4567 890", "1234567890"];
        assert_eq!(result.phones.len(), 4);
        for phone in expected {
            assert!(result.phones.contains(phone), "missing {}", phone);
        }
    }

    #[test]
    fn other_phone_shapes_are_excluded() {
        let html = "call 123-4567-890 or +30 21 0123 456 or 12345 678901";
        let result = extractor().extract(html);
        assert!(result.phones.is_empty(), "got {:?}", result.phones);
    }

    struct FailingPage {
        attempts: AtomicU32,
    }

    #[async_trait]
    impl PageSource for FailingPage {
        async fn fetch(&self, _url: &str) -> Result<String> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err("driver crashed".into())
        }
    }

    struct FlakyPage {
        attempts: AtomicU32,
        succeed_on: u32,
        html: &'static str,
    }

    #[async_trait]
    impl PageSource for FlakyPage {
        async fn fetch(&self, _url: &str) -> Result<String> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt < self.succeed_on {
                Err("navigation timeout".into())
            } else {
                Ok(self.html.to_string())
            }
        }
    }

    #[tokio::test]
    async fn exhausted_retries_degrade_to_empty_sets() {
        let page = FailingPage {
            attempts: AtomicU32::new(0),
        };
        let result = extractor().scrape("https://a.test/contact", &page).await;
        assert!(result.is_empty());
        assert_eq!(page.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn recovers_on_a_later_attempt() {
        let page = FlakyPage {
            attempts: AtomicU32::new(0),
            succeed_on: 3,
            html: "reach us at info@camp.gr",
        };
        let result = extractor().scrape("https://camp.gr/contact", &page).await;
        assert!(result.emails.contains("info@camp.gr"));
        assert_eq!(page.attempts.load(Ordering::SeqCst), 3);
    }
}
