use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::engagement::EngagementState;
use crate::core::stats::MatchRecord;
use crate::models::domain::{
    CandidateKind, InvestorProfile, MatchCandidate, MatchFilters, StartupProfile,
};

/// Request to rank a candidate list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RankMatchesRequest {
    #[validate(length(max = 10000))]
    #[serde(default)]
    pub candidates: Vec<MatchCandidate>,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub filters: MatchFilters,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
    #[validate(range(min = 1))]
    pub limit: Option<u16>,
    #[serde(default)]
    pub saved_ids: BTreeSet<u32>,
    #[serde(default)]
    pub interested_ids: BTreeSet<u32>,
}

fn default_sort_by() -> String {
    "compatibility".to_string()
}

fn default_sort_order() -> String {
    "desc".to_string()
}

/// Request to generate startup pairings for an investor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateForInvestorRequest {
    pub investor: InvestorProfile,
    #[validate(length(max = 10000))]
    #[serde(default)]
    pub startups: Vec<StartupProfile>,
    #[serde(default)]
    pub exclude_ids: HashSet<u32>,
    #[validate(range(min = 1))]
    pub limit: Option<u16>,
}

/// Request to generate investor pairings for a startup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateForStartupRequest {
    pub startup: StartupProfile,
    #[validate(length(max = 10000))]
    #[serde(default)]
    pub investors: Vec<InvestorProfile>,
    #[serde(default)]
    pub exclude_ids: HashSet<u32>,
    #[validate(range(min = 1))]
    pub limit: Option<u16>,
}

/// Request to summarize a candidate list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsightsRequest {
    #[validate(length(max = 10000))]
    #[serde(default)]
    pub candidates: Vec<MatchCandidate>,
}

/// Request to apply a save/interest action to caller-owned state
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EngagementRequest {
    #[serde(default)]
    pub state: EngagementState,
    #[validate(length(min = 1))]
    pub action: String,
    pub match_id: u32,
}

/// Request for engagement statistics over one side's delivered matches
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatsRequest {
    pub side: CandidateKind,
    #[validate(length(max = 10000))]
    #[serde(default)]
    pub records: Vec<MatchRecord>,
}
