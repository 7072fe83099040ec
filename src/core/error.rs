use thiserror::Error;

/// Errors raised by the matching core
///
/// Ranking itself never fails on well-formed candidates; these cover
/// configuration mistakes (unknown sort options) and values that violate
/// a type invariant at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Unknown sort direction: {0}")]
    UnknownSortDirection(String),

    #[error("Compatibility score {0} is out of range (0-100)")]
    ScoreOutOfRange(u8),

    #[error("Unknown engagement action: {0}")]
    UnknownEngagementAction(String),
}

impl MatchError {
    /// Short machine-readable code used in HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::UnknownSortKey(_) | MatchError::UnknownSortDirection(_) => "invalid_sort",
            MatchError::ScoreOutOfRange(_) => "invalid_score",
            MatchError::UnknownEngagementAction(_) => "invalid_action",
        }
    }
}
