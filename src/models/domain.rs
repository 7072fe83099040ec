use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::MatchError;
use crate::core::recency;

/// Precomputed compatibility between a viewer and a candidate, 0-100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CompatibilityScore(u8);

impl CompatibilityScore {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, MatchError> {
        if value > Self::MAX {
            return Err(MatchError::ScoreOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Convert a 0.0-1.0 fraction into a percentage score, rounding and clamping
    pub fn from_fraction(fraction: f64) -> Self {
        if !fraction.is_finite() {
            return Self(0);
        }
        let percent = (fraction * 100.0).round().clamp(0.0, Self::MAX as f64);
        Self(percent as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn tier(self) -> CompatibilityTier {
        CompatibilityTier::from_score(self)
    }
}

impl TryFrom<u8> for CompatibilityScore {
    type Error = MatchError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompatibilityScore> for u8 {
    fn from(score: CompatibilityScore) -> Self {
        score.0
    }
}

impl fmt::Display for CompatibilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Display bucket for a compatibility score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityTier {
    Excellent,
    Great,
    Good,
    Potential,
}

impl CompatibilityTier {
    pub const ALL: [CompatibilityTier; 4] = [
        CompatibilityTier::Excellent,
        CompatibilityTier::Great,
        CompatibilityTier::Good,
        CompatibilityTier::Potential,
    ];

    pub fn from_score(score: CompatibilityScore) -> Self {
        match score.value() {
            90..=u8::MAX => CompatibilityTier::Excellent,
            80..=89 => CompatibilityTier::Great,
            70..=79 => CompatibilityTier::Good,
            _ => CompatibilityTier::Potential,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CompatibilityTier::Excellent => "Excellent Match",
            CompatibilityTier::Great => "Great Match",
            CompatibilityTier::Good => "Good Match",
            CompatibilityTier::Potential => "Potential Match",
        }
    }
}

/// Which side of the marketplace a candidate is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Startup,
    Investor,
}

/// A startup or investor eligible to appear in a match list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub compatibility_score: CompatibilityScore,
    #[serde(default)]
    pub match_reasons: Vec<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub location: String,
    /// Unparseable or missing timestamps become `None` and sort as least recent
    #[serde(
        default,
        deserialize_with = "recency::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_active: Option<DateTime<Utc>>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub premium: bool,
    #[serde(default)]
    pub response_rate: Option<u8>,
    #[serde(flatten)]
    pub profile: CandidateProfile,
}

impl MatchCandidate {
    pub fn kind(&self) -> CandidateKind {
        match self.profile {
            CandidateProfile::Startup(_) => CandidateKind::Startup,
            CandidateProfile::Investor(_) => CandidateKind::Investor,
        }
    }

    /// Funding stage; only startups carry one
    pub fn stage(&self) -> Option<&str> {
        match &self.profile {
            CandidateProfile::Startup(details) => details.stage.as_deref(),
            CandidateProfile::Investor(_) => None,
        }
    }
}

/// Kind-specific payload of a candidate, tagged by `type` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CandidateProfile {
    Startup(StartupDetails),
    Investor(InvestorDetails),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartupDetails {
    pub stage: Option<String>,
    /// Display amount such as "$2M"
    pub funding_needed: Option<String>,
    pub team_size: Option<u32>,
    /// Display amount such as "$500K ARR" or "Pre-revenue"
    pub revenue: Option<String>,
    pub customers: Option<u32>,
    pub views: u32,
    pub interests: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestorDetails {
    /// Display range such as "$500K - $5M"
    pub investment_range: Option<String>,
    pub portfolio_size: Option<u32>,
    pub expertise: Vec<String>,
}

/// Location facet; `"All"` on the wire disables it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocationFilter {
    #[default]
    All,
    Exact(String),
}

impl LocationFilter {
    pub const ALL_SENTINEL: &'static str = "All";
}

impl From<String> for LocationFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == Self::ALL_SENTINEL {
            LocationFilter::All
        } else {
            LocationFilter::Exact(value)
        }
    }
}

impl From<LocationFilter> for String {
    fn from(filter: LocationFilter) -> Self {
        match filter {
            LocationFilter::All => LocationFilter::ALL_SENTINEL.to_string(),
            LocationFilter::Exact(location) => location,
        }
    }
}

/// Inclusion facets, combined conjunctively
///
/// Empty sets mean "no restriction", never "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchFilters {
    pub industries: BTreeSet<String>,
    pub stages: BTreeSet<String>,
    pub min_compatibility: u8,
    pub location: LocationFilter,
    /// Also match the free-text query against industry tags
    pub search_industries: bool,
}

/// Investor side of the compatibility model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestorProfile {
    pub user_id: u32,
    pub name: String,
    pub preferred_industries: Vec<String>,
    pub investment_stages: Vec<String>,
    pub geographic_preferences: Vec<String>,
    /// In USD
    pub min_investment: Option<u64>,
    /// In USD; `None` means unbounded
    pub max_investment: Option<u64>,
}

/// Startup side of the compatibility model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartupProfile {
    pub user_id: u32,
    pub company_name: String,
    pub industry: Option<String>,
    /// In USD
    pub funding_needed: Option<u64>,
    pub funding_stage: Option<String>,
    pub headquarters: Option<String>,
    /// small, medium, large or very_large
    pub market_size: Option<String>,
}

/// Scoring weights for the compatibility model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub industry: f64,
    pub funding: f64,
    pub geographic: f64,
    pub stage: f64,
    pub market_size: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            industry: 0.30,
            funding: 0.25,
            geographic: 0.15,
            stage: 0.20,
            market_size: 0.10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// Per-component compatibility, each in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityBreakdown {
    pub overall: f64,
    pub industry: f64,
    pub funding: f64,
    pub geographic: f64,
    pub stage: f64,
    pub market_size: f64,
}

/// An investor/startup pairing produced by match generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMatch {
    pub investor_id: u32,
    pub startup_id: u32,
    pub compatibility_score: CompatibilityScore,
    pub confidence: ConfidenceLevel,
    pub breakdown: CompatibilityBreakdown,
    pub reasons: Vec<String>,
    #[serde(default)]
    pub explanation: MatchExplanation,
}

/// Plain-language account of a generated match, one sentence per component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchExplanation {
    pub overall: String,
    pub industry: String,
    pub funding: String,
    pub geographic: String,
}
