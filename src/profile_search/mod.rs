// src/profile_search/mod.rs - Web-search adapter over company profile sites
mod page;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::models::{CompanyRecord, PageOutcome, Result, SkipReason};
use crate::search::UrlSearch;

/// Url fragments that mark a url as a company profile worth parsing.
const PROFILE_PATHS: [&str; 3] = [
    "linkedin.com/company",
    "crunchbase.com/organization",
    "owler.com/company",
];

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ProfileCrawler {
    client: Client,
}

impl ProfileCrawler {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0")
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Searches the three profile sites for companies in the given industry
    /// and location, then fetches and parses each hit. Urls that are not
    /// recognized profiles, or that fail to fetch, contribute nothing.
    pub async fn search(
        &self,
        url_search: &dyn UrlSearch,
        industry: &str,
        location: &str,
        num_results: usize,
    ) -> Result<Vec<CompanyRecord>> {
        let query = format!(
            "{} companies in {} site:crunchbase.com OR site:linkedin.com OR site:owler.com",
            industry, location
        );
        let urls = url_search.search_urls(&query, num_results).await?;
        info!("🔎 Web search returned {} urls", urls.len());

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for url in urls {
            match self.crawl_profile(&url, industry, location).await {
                PageOutcome::Record(record) => records.push(record),
                PageOutcome::Skipped(reason) => {
                    skipped += 1;
                    debug!("Skipping {}: {}", url, reason);
                }
            }
        }
        if skipped > 0 {
            info!("Skipped {} urls without usable profiles", skipped);
        }
        Ok(records)
    }

    async fn crawl_profile(&self, url: &str, industry: &str, location: &str) -> PageOutcome {
        if !is_profile_url(url) {
            return PageOutcome::Skipped(SkipReason::UnrecognizedProfile);
        }

        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => return PageOutcome::Skipped(SkipReason::Fetch(e.to_string())),
        };
        if !resp.status().is_success() {
            return PageOutcome::Skipped(SkipReason::Fetch(format!("status {}", resp.status())));
        }
        let html = match resp.text().await {
            Ok(html) => html,
            Err(e) => return PageOutcome::Skipped(SkipReason::Fetch(e.to_string())),
        };

        PageOutcome::Record(page::extract_profile(&html, url, industry, location))
    }
}

impl Default for ProfileCrawler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_profile_url(url: &str) -> bool {
    PROFILE_PATHS.iter().any(|path| url.contains(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedUrls(Vec<String>);

    #[async_trait]
    impl UrlSearch for FixedUrls {
        async fn search_urls(&self, _query: &str, count: usize) -> Result<Vec<String>> {
            Ok(self.0.iter().take(count).cloned().collect())
        }
    }

    #[test]
    fn recognizes_the_three_profile_shapes() {
        assert!(is_profile_url("https://www.linkedin.com/company/acme/"));
        assert!(is_profile_url("https://www.crunchbase.com/organization/acme"));
        assert!(is_profile_url("https://www.owler.com/company/acme"));
        assert!(!is_profile_url("https://www.linkedin.com/in/some-person/"));
        assert!(!is_profile_url("https://acme.com/about"));
    }

    #[tokio::test]
    async fn unrecognized_urls_are_skipped_without_fetching() {
        let crawler = ProfileCrawler::new();
        let outcome = crawler
            .crawl_profile("https://example.com/blog", "Health", "USA")
            .await;
        assert!(matches!(
            outcome,
            PageOutcome::Skipped(SkipReason::UnrecognizedProfile)
        ));
    }

    #[tokio::test]
    async fn search_drops_non_profile_urls() {
        let crawler = ProfileCrawler::new();
        let url_search = FixedUrls(vec![
            "https://news.example.com/story".to_string(),
            "https://www.linkedin.com/in/jane-doe/".to_string(),
        ]);
        let records = crawler
            .search(&url_search, "Health", "USA", 10)
            .await
            .unwrap();
        assert!(records.is_empty());
    }
}
