//! Auxyn Match - compatibility ranking for the Auxyn startup/investor platform
//!
//! This library filters and orders precomputed match candidates for display,
//! scores new investor/startup pairings, and summarizes match lists.
//! The ranking core is pure and synchronous; the HTTP layer in [`routes`]
//! is a thin actix-web wrapper around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use core::{
    match_stats, rank_matches, summarize, EngagementState, MatchAnalytics, MatchError, MatchStats,
    Matcher, SortDirection, SortKey, SortSpec,
};
pub use models::{
    CandidateProfile, CompatibilityScore, CompatibilityTier, MatchCandidate, MatchFilters,
    RankMatchesRequest, RankMatchesResponse, ScoringWeights,
};
