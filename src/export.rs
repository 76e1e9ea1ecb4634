// src/export.rs - CSV export of the final company table
use std::io::Write;

use chrono::Utc;

use crate::models::{CompanyRecord, Result};

pub const CSV_COLUMNS: [&str; 10] = [
    "Company Name",
    "Company Website",
    "Industry",
    "HQ State",
    "HQ City",
    "Year Founded",
    "Product/Service",
    "Employee Count",
    "Revenue",
    "LinkedIn",
];

pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    pub async fn export_to_csv(&self, records: &[CompanyRecord], filename: &str) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = std::path::Path::new(filename).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = std::fs::File::create(filename)?;
        writeln!(file, "{}", CSV_COLUMNS.join(","))?;
        for record in records {
            writeln!(file, "{}", csv_row(record))?;
        }

        Ok(())
    }

    pub fn generate_filename(&self, directory: &str) -> String {
        format!(
            "{}/companies_{}.csv",
            directory,
            Utc::now().format("%Y%m%d_%H%M%S")
        )
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn csv_row(record: &CompanyRecord) -> String {
    [
        &record.name,
        &record.website,
        &record.industry,
        &record.hq_state,
        &record.hq_city,
        &record.year_founded,
        &record.product_service,
        &record.employee_count,
        &record.revenue,
        &record.linkedin,
    ]
    .map(|field| csv_field(field))
    .join(",")
}

/// Standard CSV quoting: fields holding a comma, quote, or newline get
/// wrapped in quotes with inner quotes doubled.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_pass_through() {
        assert_eq!(csv_field("Acme"), "Acme");
        assert_eq!(csv_field(""), "");
    }

    #[test]
    fn fields_with_commas_and_quotes_are_escaped() {
        assert_eq!(csv_field("Acme, Inc."), "\"Acme, Inc.\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn row_has_all_ten_columns_in_order() {
        let record = CompanyRecord {
            name: "Acme, Inc.".to_string(),
            website: "https://acme.com".to_string(),
            industry: "Health".to_string(),
            hq_state: "CO".to_string(),
            hq_city: "Denver".to_string(),
            year_founded: "1998".to_string(),
            product_service: "Care".to_string(),
            employee_count: "120".to_string(),
            revenue: "$5.2 million".to_string(),
            linkedin: "https://www.linkedin.com/company/acme/".to_string(),
        };
        assert_eq!(
            csv_row(&record),
            "\"Acme, Inc.\",https://acme.com,Health,CO,Denver,1998,Care,120,$5.2 million,https://www.linkedin.com/company/acme/"
        );
    }

    #[tokio::test]
    async fn export_writes_header_and_rows() {
        let dir = std::env::temp_dir().join("company-extractor-test");
        let filename = dir.join("companies.csv");
        let records = vec![
            CompanyRecord {
                name: "Acme".to_string(),
                ..Default::default()
            },
            CompanyRecord {
                name: "Beta, LLC".to_string(),
                ..Default::default()
            },
        ];

        let exporter = CsvExporter::new();
        exporter
            .export_to_csv(&records, filename.to_str().unwrap())
            .await
            .unwrap();

        let content = std::fs::read_to_string(&filename).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_COLUMNS.join(","));
        assert!(lines[1].starts_with("Acme,"));
        assert!(lines[2].starts_with("\"Beta, LLC\","));
        std::fs::remove_file(&filename).ok();
    }
}
