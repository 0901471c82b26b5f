//! The fixed catalog of GraphQL queries and their variable builders.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::models::ProblemSearch;

/// Response field holding today's challenge
pub const DAILY_CHALLENGE_FIELD: &str = "activeDailyCodingChallengeQuestion";
/// Response field holding a problem detail
pub const PROBLEM_FIELD: &str = "question";
/// Response field (aliased) holding a search page
pub const SEARCH_FIELD: &str = "problemsetQuestionList";
/// Response field holding a user profile
pub const USER_FIELD: &str = "matchedUser";

pub const DAILY_CHALLENGE_QUERY: &str = r#"
query questionOfToday {
    activeDailyCodingChallengeQuestion {
        date
        question {
            questionId
            questionFrontendId
            title
            titleSlug
            difficulty
            content
            topicTags {
                name
                slug
            }
            exampleTestcases
            metaData
        }
    }
}
"#;

pub const PROBLEM_DETAIL_QUERY: &str = r#"
query getQuestionDetail($titleSlug: String!) {
    question(titleSlug: $titleSlug) {
        questionId
        questionFrontendId
        title
        titleSlug
        content
        difficulty
        likes
        dislikes
        exampleTestcases
        topicTags {
            name
            slug
        }
        stats
        hints
        solution {
            id
            canSeeDetail
        }
        status
        sampleTestCase
        metaData
        judgerAvailable
        judgeType
        mysqlSchemas
        enableRunCode
        enableTestMode
        envInfo
        translatedContent
    }
}
"#;

pub const PROBLEM_SEARCH_QUERY: &str = r#"
query problemsetQuestionList($categorySlug: String, $limit: Int, $skip: Int, $filters: QuestionListFilterInput) {
    problemsetQuestionList: questionList(
        categorySlug: $categorySlug
        limit: $limit
        skip: $skip
        filters: $filters
    ) {
        total: totalNum
        questions: data {
            acRate
            difficulty
            freqBar
            questionFrontendId
            isFavor
            paidOnly: isPaidOnly
            status
            title
            titleSlug
            topicTags {
                name
                id
                slug
            }
            hasSolution
            hasVideoSolution
        }
    }
}
"#;

pub const USER_PROFILE_QUERY: &str = r#"
query userPublicProfile($username: String!) {
    matchedUser(username: $username) {
        contestBadge {
            name
            expired
            hoverText
            icon
        }
        username
        githubUrl
        twitterUrl
        linkedinUrl
        profile {
            ranking
            userAvatar
            realName
            aboutMe
            school
            websites
            countryName
            company
            jobTitle
            skillTags
            postViewCount
            postViewCountDiff
            reputation
            reputationDiff
        }
        problemsSolvedBeatsStats {
            difficulty
            percentage
        }
        submissionCalendar
        submitStatsGlobal {
            acSubmissionNum {
                difficulty
                count
                submissions
            }
        }
    }
}
"#;

/// A query text plus its variables, serialized as the POST body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Map<String, Value>,
}

impl GraphQlRequest {
    /// Create a request with no variables
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
        }
    }

    /// Add a variable
    pub fn variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }

    /// Look up a variable by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}

pub fn daily_challenge() -> GraphQlRequest {
    GraphQlRequest::new(DAILY_CHALLENGE_QUERY)
}

pub fn problem_detail(title_slug: &str) -> GraphQlRequest {
    GraphQlRequest::new(PROBLEM_DETAIL_QUERY).variable("titleSlug", title_slug)
}

/// Build the search request. Absent filters are not sent at all, so an
/// unfiltered search transmits `filters: {}`.
pub fn problem_search(search: &ProblemSearch) -> GraphQlRequest {
    GraphQlRequest::new(PROBLEM_SEARCH_QUERY)
        .variable("categorySlug", search.category.clone().unwrap_or_default())
        .variable("limit", search.limit)
        .variable("skip", search.offset)
        .variable("filters", json!(search.filters()))
}

pub fn user_profile(username: &str) -> GraphQlRequest {
    GraphQlRequest::new(USER_PROFILE_QUERY).variable("username", username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_challenge_has_no_variables() {
        let request = daily_challenge();
        assert!(request.variables.is_empty());
        assert!(request.query.contains(DAILY_CHALLENGE_FIELD));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["variables"], json!({}));
    }

    #[test]
    fn test_problem_detail_variables() {
        let request = problem_detail("two-sum");
        assert_eq!(request.get("titleSlug"), Some(&json!("two-sum")));
    }

    #[test]
    fn test_problem_search_variables() {
        let search = ProblemSearch::new()
            .tags("array,hash-table")
            .difficulty("easy")
            .limit(20)
            .offset(40);
        let request = problem_search(&search);

        assert_eq!(request.get("categorySlug"), Some(&json!("")));
        assert_eq!(request.get("limit"), Some(&json!(20)));
        assert_eq!(request.get("skip"), Some(&json!(40)));
        assert_eq!(
            request.get("filters"),
            Some(&json!({"tags": ["array", "hash-table"], "difficulty": "EASY"}))
        );
    }

    #[test]
    fn test_problem_search_without_filters() {
        let request = problem_search(&ProblemSearch::default());
        assert_eq!(request.get("filters"), Some(&json!({})));
        assert_eq!(request.get("limit"), Some(&json!(50)));
        assert_eq!(request.get("skip"), Some(&json!(0)));
    }

    #[test]
    fn test_user_profile_variables() {
        let request = user_profile("alice");
        assert_eq!(request.get("username"), Some(&json!("alice")));
        assert!(request.query.contains(USER_FIELD));
    }
}
