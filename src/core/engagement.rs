use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::MatchError;

/// Saved and interested match ids owned by the caller
///
/// Ranking never reads or writes this; callers pass it alongside a ranked
/// list to decorate results and get a new state back from each transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngagementState {
    pub saved: BTreeSet<u32>,
    pub interested: BTreeSet<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementAction {
    ToggleSave,
    ExpressInterest,
}

impl FromStr for EngagementAction {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "toggle_save" | "save" | "bookmark" => Ok(EngagementAction::ToggleSave),
            "express_interest" | "interest" | "interested" => Ok(EngagementAction::ExpressInterest),
            _ => Err(MatchError::UnknownEngagementAction(s.to_string())),
        }
    }
}

impl EngagementState {
    pub fn is_saved(&self, id: u32) -> bool {
        self.saved.contains(&id)
    }

    pub fn is_interested(&self, id: u32) -> bool {
        self.interested.contains(&id)
    }

    /// Save an unsaved match, or unsave a saved one
    pub fn toggle_saved(mut self, id: u32) -> Self {
        if !self.saved.remove(&id) {
            self.saved.insert(id);
        }
        self
    }

    /// Record interest; repeating it is a no-op
    pub fn express_interest(mut self, id: u32) -> Self {
        self.interested.insert(id);
        self
    }

    pub fn apply(self, action: EngagementAction, id: u32) -> Self {
        match action {
            EngagementAction::ToggleSave => self.toggle_saved(id),
            EngagementAction::ExpressInterest => self.express_interest(id),
        }
    }
}

/// One side's stance on a generated match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interest {
    #[default]
    Pending,
    Interested,
    NotInterested,
}

/// Lifecycle of an investor/startup match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Viewed,
    Interested,
    Passed,
    Matched,
}

impl MatchStatus {
    /// Derive the status from both sides' interest
    ///
    /// Mutual interest wins, then any rejection, then one-sided interest.
    pub fn derive(investor: Interest, startup: Interest, viewed: bool) -> Self {
        use Interest::*;

        match (investor, startup) {
            (Interested, Interested) => MatchStatus::Matched,
            (NotInterested, _) | (_, NotInterested) => MatchStatus::Passed,
            (Interested, _) | (_, Interested) => MatchStatus::Interested,
            (Pending, Pending) if viewed => MatchStatus::Viewed,
            (Pending, Pending) => MatchStatus::Pending,
        }
    }

    pub fn is_mutual(self) -> bool {
        self == MatchStatus::Matched
    }
}
