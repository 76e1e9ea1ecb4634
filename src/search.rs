// src/search.rs - Search backends behind trait seams
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::GoogleSecrets;
use crate::models::Result;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; CompanyExtractor/1.0)";
const CUSTOM_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Keyless url discovery: query + result count -> result urls, ranked.
#[async_trait]
pub trait UrlSearch {
    async fn search_urls(&self, query: &str, count: usize) -> Result<Vec<String>>;
}

/// Keyed lookup returning ranked link + snippet items.
#[async_trait]
pub trait SnippetSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchItem>>;
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

/// Url discovery over DuckDuckGo's plain-HTML endpoint. No key required.
pub struct DuckDuckGoSearch {
    client: Client,
    base_url: String,
}

impl DuckDuckGoSearch {
    pub fn new() -> Self {
        Self::with_base_url("https://html.duckduckgo.com")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl Default for DuckDuckGoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlSearch for DuckDuckGoSearch {
    async fn search_urls(&self, query: &str, count: usize) -> Result<Vec<String>> {
        let resp = self
            .client
            .post(format!("{}/html/", self.base_url))
            .form(&[("q", query)])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(format!("search returned {}", resp.status()).into());
        }
        let body = resp.text().await?;
        let urls = parse_result_links(&body, count);
        debug!("Search for '{}' yielded {} urls", query, urls.len());
        Ok(urls)
    }
}

fn parse_result_links(html: &str, count: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a.result__a").unwrap();

    let mut urls = Vec::new();
    for anchor in document.select(&selector) {
        if urls.len() >= count {
            break;
        }
        if let Some(url) = anchor.value().attr("href").and_then(resolve_result_href) {
            urls.push(url);
        }
    }
    urls
}

/// Result anchors point at a redirect like
/// `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2F&rut=...`;
/// the real destination sits percent-encoded in the `uddg` parameter.
fn resolve_result_href(href: &str) -> Option<String> {
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        href.to_string()
    };
    let parsed = Url::parse(&absolute).ok()?;
    if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "uddg") {
        return Some(target.into_owned());
    }
    matches!(parsed.scheme(), "http" | "https").then_some(absolute)
}

#[derive(Debug, Deserialize, Default)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

/// Google Programmable Search client used by the enrichment pipeline.
pub struct CustomSearchClient {
    client: Client,
    endpoint: String,
    secrets: GoogleSecrets,
}

impl CustomSearchClient {
    pub fn new(secrets: GoogleSecrets) -> Self {
        Self::with_endpoint(CUSTOM_SEARCH_ENDPOINT, secrets)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, secrets: GoogleSecrets) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            secrets,
        }
    }
}

#[async_trait]
impl SnippetSearch for CustomSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchItem>> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("key", self.secrets.api_key.as_str()),
                ("cx", self.secrets.cse_id.as_str()),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(format!("custom search returned {}", resp.status()).into());
        }
        let data: CustomSearchResponse = resp.json().await?;
        Ok(data.items)
    }
}
