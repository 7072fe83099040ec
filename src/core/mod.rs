// Core algorithm exports
pub mod engagement;
pub mod error;
pub mod filters;
pub mod insights;
pub mod matcher;
pub mod metrics;
pub mod ordering;
pub mod recency;
pub mod scoring;
pub mod stats;

pub use engagement::{EngagementAction, EngagementState, Interest, MatchStatus};
pub use error::MatchError;
pub use filters::matches_filters;
pub use insights::{summarize, MatchAnalytics};
pub use matcher::{rank_matches, Matcher, RankResult};
pub use ordering::{SortDirection, SortKey, SortSpec};
pub use scoring::{calculate_compatibility, explain};
pub use stats::{match_stats, MatchRecord, MatchStats, PersonalizedInsight};
