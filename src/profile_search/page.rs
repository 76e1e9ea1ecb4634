// src/profile_search/page.rs - Pure extraction from a fetched profile page
use scraper::{Html, Selector};
use serde_json::Value;

use crate::models::CompanyRecord;

/// Maps one company-profile page to a record. Never fails: anything that
/// cannot be read leaves its field at the default.
pub fn extract_profile(html: &str, url: &str, industry: &str, location: &str) -> CompanyRecord {
    let document = Html::parse_document(html);

    let title = document
        .select(&Selector::parse("title").unwrap())
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| url.to_string());
    let name = title.replace("| LinkedIn", "").trim().to_string();

    let product_service = meta_content(&document, r#"meta[name="description"]"#)
        .or_else(|| meta_content(&document, r#"meta[property="og:description"]"#))
        .unwrap_or("")
        .trim()
        .to_string();

    let linkedin = if url.contains("linkedin.com") {
        url.to_string()
    } else {
        String::new()
    };

    // LinkedIn company pages link the official website through a tagged anchor.
    let website = if url.contains("linkedin.com/company") {
        external_website_link(&document).unwrap_or_default()
    } else {
        String::new()
    };

    let mut hq_city = String::new();
    let mut hq_state = location.to_string();
    let mut year_founded = String::new();
    if let Some(org) = find_organization_block(&document) {
        let addr = org.get("address").cloned().unwrap_or(Value::Null);
        hq_city = addr
            .get("addressLocality")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        hq_state = addr
            .get("addressRegion")
            .and_then(Value::as_str)
            .unwrap_or(location)
            .to_string();
        year_founded = org
            .get("foundingDate")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
    }

    CompanyRecord {
        name,
        website,
        industry: industry.to_string(),
        hq_state,
        hq_city,
        year_founded,
        product_service,
        linkedin,
        ..Default::default()
    }
}

/// Returns the content attribute of the first matching meta tag, or None
/// when no such tag exists (an empty content attribute is still a match).
fn meta_content<'a>(document: &'a Html, selector: &str) -> Option<&'a str> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .map(|m| m.value().attr("content").unwrap_or(""))
}

fn external_website_link(document: &Html) -> Option<String> {
    let sel =
        Selector::parse(r#"a[data-control-name="page_details_module_website_external_link"]"#)
            .unwrap();
    document
        .select(&sel)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

/// Scans the page's `application/ld+json` script blocks for the first
/// Organization object. Blocks that fail to parse are skipped.
fn find_organization_block(document: &Html) -> Option<Value> {
    let sel = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    for script in document.select(&sel) {
        let raw = script.text().collect::<String>();
        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(_) => continue,
        };
        if let Some(org) = organization_in(parsed) {
            return Some(org);
        }
    }
    None
}

/// The block may hold the Organization directly or inside a top-level list.
fn organization_in(value: Value) -> Option<Value> {
    if is_organization(&value) {
        return Some(value);
    }
    if let Value::Array(items) = value {
        return items.into_iter().find(is_organization);
    }
    None
}

fn is_organization(value: &Value) -> bool {
    value.get("@type").and_then(Value::as_str) == Some("Organization")
}
