// src/registry.rs - OpenCorporates company registry adapter
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::{CompanyRecord, Result};

const DEFAULT_BASE_URL: &str = "https://api.opencorporates.com/v0.4";

/// Broadened query term used when the first page for the requested industry
/// comes back empty. Never applied twice.
const FALLBACK_TERM: &str = "Health";

#[derive(Debug, Deserialize, Default)]
struct SearchResponse {
    #[serde(default)]
    results: SearchResults,
}

#[derive(Debug, Deserialize, Default)]
struct SearchResults {
    #[serde(default)]
    companies: Vec<CompanyItem>,
}

#[derive(Debug, Deserialize, Default)]
struct CompanyItem {
    #[serde(default)]
    company: RegistryCompany,
}

#[derive(Debug, Deserialize, Default)]
struct RegistryCompany {
    name: Option<String>,
    homepage_url: Option<String>,
    jurisdiction_code: Option<String>,
    incorporation_date: Option<String>,
    registered_address: Option<RegisteredAddress>,
}

#[derive(Debug, Deserialize, Default)]
struct RegisteredAddress {
    locality: Option<String>,
}

pub struct RegistryClient {
    client: Client,
    base_url: String,
}

impl RegistryClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Queries the registry page by page (1..=pages) and maps every company
    /// into a [`CompanyRecord`]. A page that fails or returns a non-success
    /// status contributes no rows. If the very first page yields nothing and
    /// the term is not already the fallback, the whole search is retried once
    /// with the fallback term.
    pub async fn search(
        &self,
        industry: &str,
        location: &str,
        state_code: Option<&str>,
        pages: usize,
    ) -> Result<Vec<CompanyRecord>> {
        let mut records = Vec::new();

        for page in 1..=pages {
            let mut params = vec![("q", industry.to_string()), ("page", page.to_string())];
            if let Some(code) = state_code {
                params.push(("jurisdiction_code", code.to_string()));
            }

            let resp = match self
                .client
                .get(format!("{}/companies/search", self.base_url))
                .query(&params)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    warn!("Registry page {} request failed: {}", page, e);
                    continue;
                }
            };

            if !resp.status().is_success() {
                warn!("Registry page {} returned {}", page, resp.status());
                continue;
            }

            let data: SearchResponse = match resp.json().await {
                Ok(data) => data,
                Err(e) => {
                    warn!("Registry page {} had an unreadable body: {}", page, e);
                    continue;
                }
            };

            let companies = data.results.companies;
            if companies.is_empty() && page == 1 && !industry.eq_ignore_ascii_case(FALLBACK_TERM) {
                info!(
                    "No registry results for '{}', retrying with '{}'",
                    industry, FALLBACK_TERM
                );
                return Box::pin(self.search(FALLBACK_TERM, location, state_code, pages)).await;
            }

            for item in companies {
                records.push(map_company(item.company, industry, location));
            }
        }

        Ok(records)
    }
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new()
    }
}

fn map_company(company: RegistryCompany, industry: &str, location: &str) -> CompanyRecord {
    CompanyRecord {
        name: company.name.unwrap_or_default(),
        website: company.homepage_url.unwrap_or_default(),
        industry: industry.to_string(),
        hq_state: company
            .jurisdiction_code
            .unwrap_or_else(|| location.to_string()),
        hq_city: company
            .registered_address
            .and_then(|a| a.locality)
            .unwrap_or_default(),
        year_founded: company.incorporation_date.unwrap_or_default(),
        ..Default::default()
    }
}
