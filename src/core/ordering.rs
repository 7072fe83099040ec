use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::MatchError;
use crate::core::{metrics, recency};
use crate::models::MatchCandidate;

/// Field a ranked list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Compatibility,
    RecentActivity,
    Name,
    FundingAmount,
    Traction,
    Trending,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Compatibility => "compatibility",
            SortKey::RecentActivity => "recent_activity",
            SortKey::Name => "name",
            SortKey::FundingAmount => "funding_amount",
            SortKey::Traction => "traction",
            SortKey::Trending => "trending",
        }
    }
}

impl FromStr for SortKey {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "compatibility" => Ok(SortKey::Compatibility),
            "recent" | "recent_activity" | "recentactivity" => Ok(SortKey::RecentActivity),
            "name" => Ok(SortKey::Name),
            "funding" | "funding_amount" | "fundingamount" => Ok(SortKey::FundingAmount),
            "traction" => Ok(SortKey::Traction),
            "trending" => Ok(SortKey::Trending),
            _ => Err(MatchError::UnknownSortKey(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl FromStr for SortDirection {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(MatchError::UnknownSortDirection(s.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

/// Sort key plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Parse the `sortBy` / `sortOrder` pair used by clients
    pub fn parse(key: &str, direction: &str) -> Result<Self, MatchError> {
        Ok(Self::new(key.parse()?, direction.parse()?))
    }

    /// Compare two candidates; `Descending` flips the sign, so equal
    /// candidates stay `Equal` in both directions
    #[inline]
    pub fn compare(&self, a: &MatchCandidate, b: &MatchCandidate) -> Ordering {
        let ordering = compare_by_key(a, b, self.key);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortKey::Compatibility, SortDirection::Descending)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.direction)
    }
}

/// Ascending comparison of two candidates on a single key
pub fn compare_by_key(a: &MatchCandidate, b: &MatchCandidate, key: SortKey) -> Ordering {
    match key {
        SortKey::Compatibility => a.compatibility_score.cmp(&b.compatibility_score),
        SortKey::RecentActivity => recency::compare_recency(a.last_active, b.last_active),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::FundingAmount => metrics::funding_metric(a).total_cmp(&metrics::funding_metric(b)),
        SortKey::Traction => metrics::traction_metric(a).total_cmp(&metrics::traction_metric(b)),
        SortKey::Trending => metrics::trending_metric(a).total_cmp(&metrics::trending_metric(b)),
    }
}
