//! Problem catalog payloads.
//!
//! Field names follow the GraphQL selection sets in
//! [`crate::leetcode::queries`] and serialize back out in camelCase, so a tool
//! response looks like the catalog's own JSON.

use serde::{Deserialize, Deserializer, Serialize};

/// Explicit model of a record the catalog may report as `null`
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

/// Treat an explicit `null` list as empty
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A topic tag attached to a problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicTag {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Reference to an official solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionRef {
    pub id: String,
    #[serde(default)]
    pub can_see_detail: bool,
}

/// Full problem detail (also used for the daily challenge's question)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetail {
    pub question_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_frontend_id: Option<String>,
    pub title: String,
    pub title_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dislikes: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topic_tags: Vec<TopicTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_testcases: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_test_case: Option<String>,
    /// JSON-encoded acceptance statistics, passed through as the catalog sends it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<SolutionRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judger_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judge_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub mysql_schemas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_run_code: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_test_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_info: Option<String>,
}

/// Today's daily coding challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub date: String,
    #[serde(alias = "question")]
    pub problem: ProblemDetail,
}

/// One row of a problem search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_frontend_id: Option<String>,
    pub title: String,
    pub title_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freq_bar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favor: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topic_tags: Vec<TopicTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_solution: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_video_solution: Option<bool>,
}

/// A page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemList {
    pub total: u64,
    #[serde(alias = "questions", default, deserialize_with = "null_as_empty")]
    pub problems: Vec<ProblemSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_problem_detail_roundtrips_camel_case() {
        let raw = json!({
            "questionId": "1",
            "questionFrontendId": "1",
            "title": "Two Sum",
            "titleSlug": "two-sum",
            "difficulty": "Easy",
            "topicTags": [{"name": "Array", "slug": "array"}],
            "hints": null,
            "solution": {"id": "7", "canSeeDetail": true},
            "mysqlSchemas": [],
            "someNewField": 42
        });

        let detail: ProblemDetail = serde_json::from_value(raw).unwrap();
        assert_eq!(detail.title_slug, "two-sum");
        assert!(detail.hints.is_empty());
        assert_eq!(detail.topic_tags[0].slug, "array");

        let out = serde_json::to_value(&detail).unwrap();
        assert_eq!(out["titleSlug"], "two-sum");
        assert_eq!(out["solution"]["canSeeDetail"], true);
        assert!(out.get("someNewField").is_none());
        assert!(out.get("likes").is_none());
    }

    #[test]
    fn test_problem_detail_requires_slug() {
        let raw = json!({"questionId": "1", "title": "Two Sum"});
        assert!(serde_json::from_value::<ProblemDetail>(raw).is_err());
    }

    #[test]
    fn test_daily_challenge_accepts_question_key() {
        let raw = json!({
            "date": "2024-05-01",
            "question": {"questionId": "9", "title": "Palindrome Number", "titleSlug": "palindrome-number"}
        });
        let daily: DailyChallenge = serde_json::from_value(raw).unwrap();
        assert_eq!(daily.problem.question_id, "9");

        let out = serde_json::to_value(&daily).unwrap();
        assert_eq!(out["problem"]["titleSlug"], "palindrome-number");
        assert!(out.get("question").is_none());
    }

    #[test]
    fn test_problem_list_accepts_questions_key() {
        let raw = json!({
            "total": 2,
            "questions": [
                {"title": "Two Sum", "titleSlug": "two-sum", "paidOnly": false, "acRate": 51.2},
                {"title": "Add Two Numbers", "titleSlug": "add-two-numbers", "topicTags": null}
            ]
        });
        let list: ProblemList = serde_json::from_value(raw).unwrap();
        assert_eq!(list.total, 2);
        assert_eq!(list.problems[1].title_slug, "add-two-numbers");
        assert_eq!(list.problems[0].paid_only, Some(false));
    }

    #[test]
    fn test_lookup_from_option() {
        assert_eq!(Lookup::from(Some(1)), Lookup::Found(1));
        assert_eq!(Lookup::<u8>::from(None), Lookup::NotFound);
    }
}
