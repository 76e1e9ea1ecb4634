// src/enrich.rs - Merge adapter outputs and backfill fields from snippets
use tracing::{error, info, warn};

use crate::extract::InfoExtractor;
use crate::models::CompanyRecord;
use crate::search::{SearchItem, SnippetSearch};

/// How much of a snippet is copied into Product/Service.
const SNIPPET_LIMIT: usize = 250;

const ENRICHMENT_KEYWORDS: &str = "number of employees revenue founded";

/// Registry rows first, then profile rows. Order preserved, nothing dropped,
/// nothing deduplicated.
pub fn merge_records(
    registry: Vec<CompanyRecord>,
    profiles: Vec<CompanyRecord>,
) -> Vec<CompanyRecord> {
    let mut merged = registry;
    merged.extend(profiles);
    merged
}

/// Best-effort, one record at a time. With no search client configured this
/// is the identity transform. A record whose lookup fails keeps whatever
/// fields it already had.
pub async fn enrich_companies<S: SnippetSearch>(
    mut records: Vec<CompanyRecord>,
    search: Option<&S>,
) -> Vec<CompanyRecord> {
    let Some(search) = search else {
        warn!("Google API key or CSE ID not configured.");
        return records;
    };

    let extractor = InfoExtractor::new();
    let total = records.len();
    for (i, record) in records.iter_mut().enumerate() {
        if let Err(e) = enrich_record(record, search, &extractor).await {
            error!("Google enrichment failed for {}: {}", record.name, e);
        }
        if record.linkedin.is_empty() {
            record.linkedin = lookup_linkedin(search, &record.name).await;
        }
        if (i + 1) % 10 == 0 {
            info!("Enriched {}/{} records", i + 1, total);
        }
    }
    records
}

async fn enrich_record<S: SnippetSearch>(
    record: &mut CompanyRecord,
    search: &S,
    extractor: &InfoExtractor,
) -> crate::models::Result<()> {
    let query = format!(
        "{} {} site:{}",
        record.name, ENRICHMENT_KEYWORDS, record.website
    );
    let items = search.search(&query).await?;
    let Some(first) = items.first() else {
        return Ok(());
    };

    apply_snippet(record, &first.snippet, extractor);
    Ok(())
}

/// Product/Service always takes the snippet; the three extracted fields are
/// only written when the extractor actually found something.
fn apply_snippet(record: &mut CompanyRecord, snippet: &str, extractor: &InfoExtractor) {
    record.product_service = snippet.chars().take(SNIPPET_LIMIT).collect();

    let info = extractor.extract(snippet);
    if !info.revenue.is_empty() {
        record.revenue = info.revenue;
    }
    if !info.employees.is_empty() {
        record.employee_count = info.employees;
    }
    if !info.founded.is_empty() {
        record.year_founded = info.founded;
    }
}

/// Second lookup, only for records still missing a LinkedIn url. Failures
/// and misses both come back as an empty string.
async fn lookup_linkedin<S: SnippetSearch>(search: &S, company_name: &str) -> String {
    let query = format!("{} LinkedIn site:linkedin.com", company_name);
    let items: Vec<SearchItem> = match search.search(&query).await {
        Ok(items) => items,
        Err(_) => return String::new(),
    };
    for item in items {
        if item.link.contains("linkedin.com/company/") || item.link.contains("linkedin.com/") {
            return item.link;
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Result;
    use async_trait::async_trait;

    fn record(name: &str) -> CompanyRecord {
        CompanyRecord {
            name: name.to_string(),
            industry: "Health".to_string(),
            ..Default::default()
        }
    }

    /// Returns canned items for the first (snippet) query and the LinkedIn
    /// query, keyed on the query text.
    struct StubSearch {
        snippet_items: Vec<SearchItem>,
        linkedin_items: Vec<SearchItem>,
        fail: bool,
    }

    impl StubSearch {
        fn with_snippet(snippet: &str) -> Self {
            Self {
                snippet_items: vec![SearchItem {
                    link: "https://example.com".to_string(),
                    snippet: snippet.to_string(),
                }],
                linkedin_items: Vec::new(),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl SnippetSearch for StubSearch {
        async fn search(&self, query: &str) -> Result<Vec<SearchItem>> {
            if self.fail {
                return Err("boom".into());
            }
            if query.contains("LinkedIn site:linkedin.com") {
                Ok(self.linkedin_items.clone())
            } else {
                Ok(self.snippet_items.clone())
            }
        }
    }

    #[test]
    fn merge_keeps_order_and_count() {
        let a = vec![record("A1"), record("A2")];
        let b = vec![record("B1")];
        let merged = merge_records(a.clone(), b.clone());
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0], a[0]);
        assert_eq!(merged[1], a[1]);
        assert_eq!(merged[2], b[0]);
    }

    #[test]
    fn merge_does_not_deduplicate() {
        let a = vec![record("Same Co")];
        let b = vec![record("Same Co")];
        assert_eq!(merge_records(a, b).len(), 2);
    }

    #[tokio::test]
    async fn no_search_client_is_identity() {
        let records = vec![record("A"), record("B")];
        let out = enrich_companies::<StubSearch>(records.clone(), None).await;
        assert_eq!(out, records);
    }

    #[tokio::test]
    async fn snippet_fills_empty_fields() {
        let stub =
            StubSearch::with_snippet("Revenue: $5.2 million, 120 employees, founded in 1998");
        let out = enrich_companies(vec![record("Acme")], Some(&stub)).await;
        assert_eq!(out[0].revenue, "$5.2 million");
        assert_eq!(out[0].employee_count, "120");
        assert_eq!(out[0].year_founded, "1998");
        assert_eq!(
            out[0].product_service,
            "Revenue: $5.2 million, 120 employees, founded in 1998"
        );
    }

    #[tokio::test]
    async fn preset_revenue_survives_a_non_matching_snippet() {
        let stub = StubSearch::with_snippet("A great place to work.");
        let mut input = record("Acme");
        input.revenue = "$9M".to_string();
        input.product_service = "old text".to_string();

        let out = enrich_companies(vec![input], Some(&stub)).await;
        assert_eq!(out[0].revenue, "$9M");
        // Product/Service is the one field the snippet always overwrites.
        assert_eq!(out[0].product_service, "A great place to work.");
    }

    #[tokio::test]
    async fn failed_lookup_keeps_prior_values() {
        let stub = StubSearch {
            snippet_items: Vec::new(),
            linkedin_items: Vec::new(),
            fail: true,
        };
        let mut input = record("Acme");
        input.revenue = "$9M".to_string();
        let out = enrich_companies(vec![input.clone()], Some(&stub)).await;
        assert_eq!(out[0], input);
    }

    #[tokio::test]
    async fn no_results_leaves_product_service_alone() {
        let stub = StubSearch {
            snippet_items: Vec::new(),
            linkedin_items: Vec::new(),
            fail: false,
        };
        let mut input = record("Acme");
        input.product_service = "kept".to_string();
        let out = enrich_companies(vec![input], Some(&stub)).await;
        assert_eq!(out[0].product_service, "kept");
    }

    #[tokio::test]
    async fn snippet_is_truncated_to_250_chars() {
        let long = "x".repeat(400);
        let stub = StubSearch::with_snippet(&long);
        let out = enrich_companies(vec![record("Acme")], Some(&stub)).await;
        assert_eq!(out[0].product_service.chars().count(), 250);
    }

    #[tokio::test]
    async fn linkedin_filled_only_when_missing() {
        let mut stub = StubSearch::with_snippet("");
        stub.linkedin_items = vec![
            SearchItem {
                link: "https://www.linkedin.com/company/acme/".to_string(),
                snippet: String::new(),
            },
        ];

        let out = enrich_companies(vec![record("Acme")], Some(&stub)).await;
        assert_eq!(out[0].linkedin, "https://www.linkedin.com/company/acme/");

        let mut preset = record("Acme");
        preset.linkedin = "https://www.linkedin.com/company/original/".to_string();
        let out = enrich_companies(vec![preset.clone()], Some(&stub)).await;
        assert_eq!(out[0].linkedin, preset.linkedin);
    }
}
