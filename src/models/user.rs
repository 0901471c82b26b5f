//! Public user profile payload.

use serde::{Deserialize, Serialize};

use super::problem::null_as_empty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestBadge {
    pub name: String,
    #[serde(default)]
    pub expired: Option<bool>,
    #[serde(default)]
    pub hover_text: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    #[serde(default)]
    pub ranking: Option<i64>,
    #[serde(default)]
    pub user_avatar: Option<String>,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub websites: Vec<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skill_tags: Vec<String>,
    #[serde(default)]
    pub post_view_count: Option<i64>,
    #[serde(default)]
    pub post_view_count_diff: Option<i64>,
    #[serde(default)]
    pub reputation: Option<i64>,
    #[serde(default)]
    pub reputation_diff: Option<i64>,
}

/// Percentage of users beaten per difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatsStat {
    pub difficulty: String,
    #[serde(default)]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionCount {
    pub difficulty: String,
    pub count: i64,
    pub submissions: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStats {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ac_submission_num: Vec<SubmissionCount>,
}

/// A user's public profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub contest_badge: Option<ContestBadge>,
    #[serde(default)]
    pub profile: Option<ProfileDetails>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub problems_solved_beats_stats: Vec<BeatsStat>,
    /// JSON-encoded `{timestamp: count}` map
    #[serde(default)]
    pub submission_calendar: Option<String>,
    #[serde(default)]
    pub submit_stats_global: Option<SubmitStats>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_profile_parse() {
        let raw = json!({
            "username": "alice",
            "githubUrl": null,
            "contestBadge": null,
            "profile": {"ranking": 1234, "realName": "Alice", "websites": null, "skillTags": ["rust"]},
            "problemsSolvedBeatsStats": [{"difficulty": "Easy", "percentage": 97.5}],
            "submitStatsGlobal": {
                "acSubmissionNum": [
                    {"difficulty": "All", "count": 300, "submissions": 700},
                    {"difficulty": "Easy", "count": 120, "submissions": 200}
                ]
            }
        });

        let user: UserProfile = serde_json::from_value(raw).unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.profile.as_ref().unwrap().ranking, Some(1234));
        assert!(user.profile.as_ref().unwrap().websites.is_empty());
        let solved = &user.submit_stats_global.as_ref().unwrap().ac_submission_num;
        assert_eq!(solved[0].difficulty, "All");
        assert_eq!(solved[0].count, 300);

        let out = serde_json::to_value(&user).unwrap();
        assert_eq!(out["submitStatsGlobal"]["acSubmissionNum"][1]["count"], 120);
    }
}
