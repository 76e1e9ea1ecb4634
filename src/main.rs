// src/main.rs
use dialoguer::{theme::ColorfulTheme, Input};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod enrich;
mod export;
mod extract;
mod models;
mod profile_search;
mod registry;
mod search;

use config::{load_config, state_code_for, Config, GoogleSecrets};
use enrich::{enrich_companies, merge_records};
use export::CsvExporter;
use models::Result;
use profile_search::ProfileCrawler;
use registry::RegistryClient;
use search::{CustomSearchClient, DuckDuckGoSearch};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    // Setup logging
    let directive = format!("company_extractor={}", config.logging.level)
        .parse()
        .unwrap_or_else(|_| "company_extractor=info".parse().unwrap());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_max_level(tracing::Level::INFO)
        .init();

    // Add graceful shutdown
    tokio::select! {
        result = run(config) => {
            result?;
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}

async fn run(config: Config) -> Result<()> {
    println!("\n🏢 Company Info Extractor");
    println!("═══════════════════════════════════════");

    let theme = ColorfulTheme::default();
    let industry: String = Input::with_theme(&theme)
        .with_prompt("Enter industry")
        .default(config.search.industry.clone())
        .interact_text()?;
    let location: String = Input::with_theme(&theme)
        .with_prompt("Enter location (e.g., USA, California, Texas)")
        .default(config.search.location.clone())
        .interact_text()?;
    let num_results: usize = Input::with_theme(&theme)
        .with_prompt("Number of web search results to fetch (1-100)")
        .default(config.search.num_results)
        .interact_text()?;
    let num_pages: usize = Input::with_theme(&theme)
        .with_prompt("Number of registry pages to query (1-100)")
        .default(config.search.num_pages)
        .interact_text()?;

    let num_results = num_results.clamp(1, 100);
    let num_pages = num_pages.clamp(1, 100);
    let state_code = state_code_for(&location);

    info!("🔍 Searching '{}' in '{}'...", industry, location);

    let registry = RegistryClient::new();
    let registry_records = match registry
        .search(&industry, &location, state_code, num_pages)
        .await
    {
        Ok(records) => records,
        Err(e) => {
            warn!("Registry search failed: {}", e);
            Vec::new()
        }
    };
    info!("OpenCorporates found: {}", registry_records.len());

    let crawler = ProfileCrawler::new();
    let url_search = DuckDuckGoSearch::new();
    let profile_records = match crawler
        .search(&url_search, &industry, &location, num_results)
        .await
    {
        Ok(records) => records,
        Err(e) => {
            warn!("Web search failed: {}", e);
            Vec::new()
        }
    };
    info!("Web search found: {}", profile_records.len());

    let merged = merge_records(registry_records, profile_records);
    let search_client = GoogleSecrets::from_env().map(CustomSearchClient::new);
    let companies = enrich_companies(merged, search_client.as_ref()).await;

    if companies.is_empty() {
        warn!("No companies found.");
        return Ok(());
    }

    info!("✅ Found {} companies", companies.len());
    for company in &companies {
        println!(
            "  {} | {} | {} {}",
            company.name, company.website, company.hq_city, company.hq_state
        );
    }

    let exporter = CsvExporter::new();
    let filename = exporter.generate_filename(&config.output.directory);
    exporter.export_to_csv(&companies, &filename).await?;
    info!("📄 Wrote {} rows to {}", companies.len(), filename);

    Ok(())
}
