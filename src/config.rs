use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub industry: String,
    pub location: String,
    /// Web search results to fetch, clamped to 1..=100.
    pub num_results: usize,
    /// Registry pages to query, clamped to 1..=100.
    pub num_pages: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                industry: "Home Healthcare".to_string(),
                location: "USA".to_string(),
                num_results: 10,
                num_pages: 2,
            },
            output: OutputConfig {
                directory: "out".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

pub async fn load_config(path: &str) -> crate::models::Result<Config> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Jurisdiction codes for the handful of US states the registry understands.
/// Anything else searches without a jurisdiction filter.
pub fn state_code_for(location: &str) -> Option<&'static str> {
    match location.trim() {
        "Colorado" => Some("us_co"),
        "California" => Some("us_ca"),
        "New York" => Some("us_ny"),
        "Texas" => Some("us_tx"),
        _ => None,
    }
}

/// Credentials for the Google Programmable Search API. Both values must be
/// set for enrichment to run; otherwise the pipeline passes records through
/// untouched.
#[derive(Debug, Clone)]
pub struct GoogleSecrets {
    pub api_key: String,
    pub cse_id: String,
}

impl GoogleSecrets {
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())?;
        let cse_id = std::env::var("GOOGLE_CSE_ID")
            .ok()
            .filter(|v| !v.is_empty())?;
        Some(Self { api_key, cse_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_states_map_to_jurisdiction_codes() {
        assert_eq!(state_code_for("Colorado"), Some("us_co"));
        assert_eq!(state_code_for("  Texas  "), Some("us_tx"));
        assert_eq!(state_code_for("New York"), Some("us_ny"));
    }

    #[test]
    fn unknown_locations_pass_no_filter() {
        assert_eq!(state_code_for("USA"), None);
        assert_eq!(state_code_for("colorado"), None);
    }

    #[test]
    fn default_search_settings() {
        let config = Config::default();
        assert_eq!(config.search.industry, "Home Healthcare");
        assert_eq!(config.search.location, "USA");
        assert_eq!(config.search.num_results, 10);
        assert_eq!(config.search.num_pages, 2);
    }
}
