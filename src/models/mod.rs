//! Core data models for catalog payloads and tool responses.

mod envelope;
mod problem;
mod search;
mod user;

pub use envelope::Envelope;
pub use problem::{
    DailyChallenge, Lookup, ProblemDetail, ProblemList, ProblemSummary, SolutionRef, TopicTag,
};
pub use search::{ProblemSearch, QuestionListFilter, DEFAULT_SEARCH_LIMIT};
pub use user::{BeatsStat, ContestBadge, ProfileDetails, SubmissionCount, SubmitStats, UserProfile};
