use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One row of the output table. Every field is always present; an empty
/// string means unknown. Nothing is deduplicated: both adapters may emit a
/// row for the same real company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub website: String,
    pub industry: String,
    pub hq_state: String,
    pub hq_city: String,
    pub year_founded: String,
    pub product_service: String,
    pub employee_count: String,
    pub revenue: String,
    pub linkedin: String,
}

/// Per-url result from the profile crawler: either a mapped record or the
/// reason the url contributed nothing.
#[derive(Debug)]
pub enum PageOutcome {
    Record(CompanyRecord),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    UnrecognizedProfile,
    Fetch(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnrecognizedProfile => write!(f, "not a recognized company profile url"),
            SkipReason::Fetch(e) => write!(f, "fetch failed: {}", e),
        }
    }
}
