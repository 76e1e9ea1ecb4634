// src/extract.rs - Regex heuristics over free-form search snippets
use regex::Regex;

/// Raw substrings pulled out of a snippet; empty when no pattern matched.
/// No numeric parsing or normalization happens here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedInfo {
    pub revenue: String,
    pub employees: String,
    pub founded: String,
}

pub struct InfoExtractor {
    revenue_regex: Regex,
    employee_regex: Regex,
    founded_regex: Regex,
}

impl InfoExtractor {
    pub fn new() -> Self {
        Self {
            revenue_regex: Regex::new(
                r"(?i)(revenue|annual revenue)[^\d$]*(\$?\d+[\d,\.]*\s*(million|billion)?)",
            )
            .unwrap(),
            employee_regex: Regex::new(r"(?i)(\d{2,6})\s*(employees|people)").unwrap(),
            founded_regex: Regex::new(r"(?i)(founded in|since)\s*(\d{4})").unwrap(),
        }
    }

    /// Each pattern is tried independently; the first match wins and the
    /// matched substring is returned as-is.
    pub fn extract(&self, text: &str) -> ExtractedInfo {
        let revenue = self
            .revenue_regex
            .captures(text)
            .and_then(|c| c.get(2))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let employees = self
            .employee_regex
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let founded = self
            .founded_regex
            .captures(text)
            .and_then(|c| c.get(2))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        ExtractedInfo {
            revenue,
            employees,
            founded,
        }
    }
}

impl Default for InfoExtractor {
    fn default() -> Self {
        Self::new()
    }
}
