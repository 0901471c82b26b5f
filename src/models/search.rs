//! Problem search request model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default page size for problem searches
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Problem search parameters as received from a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemSearch {
    /// Category slug (e.g. "algorithms", "database")
    pub category: Option<String>,

    /// Comma-separated tag slugs
    pub tags: Option<String>,

    /// Difficulty in any case ("easy", "MEDIUM", ...)
    pub difficulty: Option<String>,

    /// Free-text keywords
    pub search: Option<String>,

    pub limit: u32,

    pub offset: u32,
}

impl Default for ProblemSearch {
    fn default() -> Self {
        Self {
            category: None,
            tags: None,
            difficulty: None,
            search: None,
            limit: DEFAULT_SEARCH_LIMIT,
            offset: 0,
        }
    }
}

impl ProblemSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Build the `QuestionListFilterInput` sent to the catalog.
    ///
    /// Tags become a set, difficulty is upper-cased, and blank or absent
    /// filters are left out entirely.
    pub fn filters(&self) -> QuestionListFilter {
        let tags: BTreeSet<String> = self
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        QuestionListFilter {
            tags: (!tags.is_empty()).then_some(tags),
            difficulty: non_blank(&self.difficulty).map(|d| d.to_uppercase()),
            search_keywords: non_blank(&self.search).map(str::to_string),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Filter object of the `questionList` query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_keywords: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tags_split_into_set() {
        let filters = ProblemSearch::new().tags("array,hash-table").filters();
        let tags = filters.tags.unwrap();
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("array"));
        assert!(tags.contains("hash-table"));
    }

    #[test]
    fn test_tags_trimmed_and_deduplicated() {
        let filters = ProblemSearch::new().tags(" array , ,array,dp ").filters();
        let tags: Vec<_> = filters.tags.unwrap().into_iter().collect();
        assert_eq!(tags, vec!["array", "dp"]);
    }

    #[test]
    fn test_difficulty_upper_cased() {
        let filters = ProblemSearch::new().difficulty("easy").filters();
        assert_eq!(filters.difficulty.as_deref(), Some("EASY"));
    }

    #[test]
    fn test_no_filters_serializes_empty_object() {
        let filters = ProblemSearch::new().filters();
        assert_eq!(filters, QuestionListFilter::default());
        assert_eq!(serde_json::to_value(&filters).unwrap(), json!({}));
    }

    #[test]
    fn test_blank_filters_omitted() {
        let filters = ProblemSearch::new().tags("").difficulty("  ").search("").filters();
        assert_eq!(serde_json::to_value(&filters).unwrap(), json!({}));
    }

    #[test]
    fn test_search_keywords_camel_case() {
        let filters = ProblemSearch::new().search("two sum").filters();
        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            json!({"searchKeywords": "two sum"})
        );
    }

    #[test]
    fn test_defaults() {
        let search = ProblemSearch::default();
        assert_eq!(search.limit, 50);
        assert_eq!(search.offset, 0);
    }
}
