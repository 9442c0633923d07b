use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::import::ReportType;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly web analytics consultant who explains website performance to small business owners in plain language.";

/// Settings for building the summary prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Rows of the table shown to the model (clamped to 5..=10)
    pub preview_rows: usize,
    pub system_prompt: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            preview_rows: 7,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl SummaryConfig {
    pub fn effective_preview_rows(&self) -> usize {
        self.preview_rows.clamp(5, 10)
    }
}

/// Everything the summarization model sees about one report
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SummaryRequest {
    #[validate(length(min = 1, max = 120))]
    pub business_name: String,
    pub report_type: ReportType,
    #[validate(length(min = 1))]
    pub preview: String,
}

impl SummaryRequest {
    pub fn new(business_name: &str, report_type: ReportType, preview: String) -> Self {
        Self {
            business_name: business_name.trim().to_string(),
            report_type,
            preview,
        }
    }

    pub fn to_prompt(&self) -> String {
        format!(
            "Below is a monthly {} ({}) website report for a business called {}.\n\n\
             {}\n\n\
             Based on this data, please write:\n\
             - 3 insights about performance or trends\n\
             - 1 issue or red flag worth noting\n\
             - 1 growth suggestion for next month\n\n\
             Keep the tone clear and encouraging, and assume the reader is a small business owner with limited technical knowledge.",
            self.report_type,
            self.report_type.description(),
            self.business_name,
            self.preview
        )
    }
}

/// A generated summary, ready to show or save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub business_name: String,
    pub report_type: ReportType,
    pub text: String,
    pub generated_on: NaiveDate,
}

impl Summary {
    /// File name offered for the plain-text download
    pub fn download_file_name(&self) -> String {
        let business: String = self
            .business_name
            .trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        let business = if business.is_empty() {
            "report".to_string()
        } else {
            business
        };

        format!(
            "{}_Insights_{}.txt",
            business,
            self.generated_on.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_business_and_report() {
        let request = SummaryRequest::new(
            "  Acme Bakery ",
            ReportType::GSC,
            "query  clicks\n bread      7".to_string(),
        );

        let prompt = request.to_prompt();
        assert!(prompt.contains("GSC (Google Search Console)"));
        assert!(prompt.contains("called Acme Bakery."));
        assert!(prompt.contains("bread      7"));
        assert!(prompt.contains("3 insights"));
    }

    #[test]
    fn test_request_validation() {
        let blank = SummaryRequest::new("   ", ReportType::GA4, "a\n1".to_string());
        assert!(blank.validate().is_err());

        let no_preview = SummaryRequest::new("Acme", ReportType::GA4, String::new());
        assert!(no_preview.validate().is_err());

        let ok = SummaryRequest::new("Acme", ReportType::GA4, "a\n1".to_string());
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_business_name_length_limit() {
        let longest = SummaryRequest::new(&"a".repeat(120), ReportType::GSC, "a\n1".to_string());
        assert!(longest.validate().is_ok());

        let too_long = SummaryRequest::new(&"a".repeat(121), ReportType::GSC, "a\n1".to_string());
        assert!(too_long.validate().is_err());

        // Counted in characters, not bytes
        let accented = SummaryRequest::new(&"é".repeat(120), ReportType::GSC, "a\n1".to_string());
        assert!(accented.validate().is_ok());
    }

    #[test]
    fn test_preview_rows_are_clamped() {
        let mut config = SummaryConfig::default();
        assert_eq!(config.effective_preview_rows(), 7);
        config.preview_rows = 100;
        assert_eq!(config.effective_preview_rows(), 10);
        config.preview_rows = 0;
        assert_eq!(config.effective_preview_rows(), 5);
    }

    #[test]
    fn test_download_file_name() {
        let summary = Summary {
            business_name: "Acme/Bakery".to_string(),
            report_type: ReportType::GA4,
            text: "All good".to_string(),
            generated_on: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };
        assert_eq!(
            summary.download_file_name(),
            "Acme_Bakery_Insights_2024-01-31.txt"
        );
    }
}
