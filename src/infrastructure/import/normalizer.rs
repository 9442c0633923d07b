// ============================================================
// COLUMN NORMALIZER
// ============================================================
// Trim header names, drop placeholder columns, drop duplicates

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::domain::import::ResolverConfig;

static DEFAULT_PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&ResolverConfig::default().placeholder_column_pattern).unwrap()
});

/// Which header positions survive normalization, and under what name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnPlan {
    /// `(source field index, trimmed name)` in header order
    pub keep: Vec<(usize, String)>,

    /// Names of removed columns, as they appeared after trimming
    pub dropped: Vec<String>,
}

impl ColumnPlan {
    pub fn columns(&self) -> Vec<String> {
        self.keep.iter().map(|(_, name)| name.clone()).collect()
    }
}

pub struct ColumnNormalizer {
    placeholder: Regex,
}

impl ColumnNormalizer {
    pub fn new(placeholder: Regex) -> Self {
        Self { placeholder }
    }

    /// Plan the output columns for a raw header record.
    ///
    /// Empty names and placeholder names are dropped. When two names collide
    /// after trimming, the first column wins and later ones are dropped along
    /// with their data.
    pub fn plan<'a, I>(&self, header: I) -> ColumnPlan
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut plan = ColumnPlan::default();
        let mut seen = HashSet::new();

        for (index, raw) in header.into_iter().enumerate() {
            let name = raw.trim();

            if name.is_empty() || self.placeholder.is_match(name) || !seen.insert(name.to_string()) {
                plan.dropped.push(name.to_string());
                continue;
            }

            plan.keep.push((index, name.to_string()));
        }

        plan
    }
}

impl Default for ColumnNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_PATTERN.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_names() {
        let plan = ColumnNormalizer::default().plan([" sessions ", "users\t"]);
        assert_eq!(plan.columns(), vec!["sessions", "users"]);
        assert!(plan.dropped.is_empty());
    }

    #[test]
    fn test_drops_placeholder_and_empty_columns() {
        let plan = ColumnNormalizer::default().plan(["Unnamed: 0", "page", "", "views"]);
        assert_eq!(plan.keep, vec![(1, "page".to_string()), (3, "views".to_string())]);
        assert_eq!(plan.dropped, vec!["Unnamed: 0".to_string(), String::new()]);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let plan = ColumnNormalizer::default().plan(["a", " a", "b"]);
        assert_eq!(plan.keep, vec![(0, "a".to_string()), (2, "b".to_string())]);
        assert_eq!(plan.dropped, vec!["a".to_string()]);
    }

    #[test]
    fn test_custom_pattern() {
        let normalizer = ColumnNormalizer::new(Regex::new("^idx$").unwrap());
        let plan = normalizer.plan(["idx", "Unnamed: 0"]);
        assert_eq!(plan.columns(), vec!["Unnamed: 0"]);
    }
}
