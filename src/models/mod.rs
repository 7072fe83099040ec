// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateKind, CandidateProfile, CompatibilityBreakdown, CompatibilityScore, CompatibilityTier,
    ConfidenceLevel, GeneratedMatch, InvestorDetails, InvestorProfile, LocationFilter,
    MatchCandidate, MatchExplanation, MatchFilters, ScoringWeights, StartupDetails, StartupProfile,
};
pub use requests::{
    EngagementRequest, GenerateForInvestorRequest, GenerateForStartupRequest, InsightsRequest,
    MatchStatsRequest, RankMatchesRequest,
};
pub use responses::{
    EngagementResponse, ErrorResponse, GenerateMatchesResponse, HealthResponse, RankMatchesResponse,
    RankedMatch,
};
