// ============================================================
// RESOLVER CONFIGURATION
// ============================================================
// Priority lists and patterns used while resolving an import

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Delimiter, TextEncoding};

/// Configuration for the tabular import resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Lines starting with this marker are preamble, not data (default: "#")
    pub comment_marker: String,

    /// Encodings to try, highest priority first (default: UTF-8, Latin-1)
    pub encodings: Vec<TextEncoding>,

    /// Delimiters to try within each encoding (default: comma, semicolon, tab)
    pub delimiters: Vec<Delimiter>,

    /// Column names matching this pattern are placeholder index columns and
    /// get dropped (default matches `Unnamed: 0` style names)
    pub placeholder_column_pattern: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            comment_marker: "#".to_string(),
            encodings: vec![TextEncoding::Utf8, TextEncoding::Latin1],
            delimiters: vec![Delimiter::Comma, Delimiter::Semicolon, Delimiter::Tab],
            placeholder_column_pattern: r"^Unnamed(:\s*\d+)?$".to_string(),
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the placeholder pattern
    pub fn placeholder_regex(&self) -> Result<Regex, String> {
        Regex::new(&self.placeholder_column_pattern)
            .map_err(|e| format!("placeholder_column_pattern is not a valid regex: {}", e))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.comment_marker.is_empty() {
            return Err("comment_marker must not be empty".to_string());
        }
        if self.encodings.is_empty() {
            return Err("encodings must list at least one encoding".to_string());
        }
        if self.delimiters.is_empty() {
            return Err("delimiters must list at least one delimiter".to_string());
        }
        self.placeholder_regex()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ResolverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_priority_lists() {
        let config = ResolverConfig {
            delimiters: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ResolverConfig {
            encodings: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_pattern() {
        let config = ResolverConfig {
            placeholder_column_pattern: "(unclosed".to_string(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("regex"));
    }

    #[test]
    fn test_default_pattern_matches_placeholders() {
        let re = ResolverConfig::default().placeholder_regex().unwrap();
        assert!(re.is_match("Unnamed: 0"));
        assert!(re.is_match("Unnamed"));
        assert!(!re.is_match("Unnamed campaign"));
        assert!(!re.is_match("sessions"));
    }
}
