use serde::{Deserialize, Serialize};

use crate::core::engagement::{Interest, MatchStatus};
use crate::models::{CandidateKind, CompatibilityScore};

/// Score at or above which a match counts as high quality
pub const HIGH_QUALITY_SCORE: u8 = 80;

/// A delivered match and where each side stands on it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchRecord {
    pub investor_interest: Interest,
    pub startup_interest: Interest,
    pub viewed: bool,
    pub compatibility_score: CompatibilityScore,
}

impl MatchRecord {
    pub fn status(&self) -> MatchStatus {
        MatchStatus::derive(self.investor_interest, self.startup_interest, self.viewed)
    }

    fn own_interest(&self, side: CandidateKind) -> Interest {
        match side {
            CandidateKind::Investor => self.investor_interest,
            CandidateKind::Startup => self.startup_interest,
        }
    }

    fn counterpart_interest(&self, side: CandidateKind) -> Interest {
        match side {
            CandidateKind::Investor => self.startup_interest,
            CandidateKind::Startup => self.investor_interest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    ActionNeeded,
    Info,
    Positive,
    Suggestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    High,
    Medium,
    Low,
}

/// A short, actionable note about one side's match activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub priority: InsightPriority,
}

impl PersonalizedInsight {
    fn new(kind: InsightKind, title: &str, message: impl Into<String>, priority: InsightPriority) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.into(),
            priority,
        }
    }
}

/// Engagement statistics for one investor or startup
///
/// "Own" counts look at the requesting side's interest, "counterpart"
/// counts at the other side's. Rates are percentages rounded to one
/// decimal and are 0 when their denominator is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub side: CandidateKind,
    pub total_matches: usize,
    pub pending_matches: usize,
    pub viewed_matches: usize,
    pub passed_matches: usize,
    pub interested_matches: usize,
    pub mutual_matches: usize,
    pub counterpart_interest_count: usize,
    pub average_compatibility: f64,
    pub high_quality_matches: usize,
    /// Mutual matches over all matches
    pub match_rate: f64,
    /// Matches this side answered, either way
    pub response_rate: f64,
    /// Mutual matches over matches this side was interested in
    pub success_rate: f64,
    /// Matches the counterpart was interested in
    pub attraction_rate: f64,
    pub insights: Vec<PersonalizedInsight>,
}

/// Compute statistics and personalized insights for one side's matches
pub fn match_stats(records: &[MatchRecord], side: CandidateKind) -> MatchStats {
    let total = records.len();
    let mut pending = 0;
    let mut viewed = 0;
    let mut passed = 0;
    let mut mutual = 0;
    let mut interested = 0;
    let mut responded = 0;
    let mut counterpart_interest = 0;
    let mut high_quality = 0;
    let mut score_sum = 0u64;

    for record in records {
        match record.status() {
            MatchStatus::Pending => pending += 1,
            MatchStatus::Viewed => viewed += 1,
            MatchStatus::Passed => passed += 1,
            MatchStatus::Matched => mutual += 1,
            MatchStatus::Interested => {}
        }

        match record.own_interest(side) {
            Interest::Interested => {
                interested += 1;
                responded += 1;
            }
            Interest::NotInterested => responded += 1,
            Interest::Pending => {}
        }
        if record.counterpart_interest(side) == Interest::Interested {
            counterpart_interest += 1;
        }

        let score = record.compatibility_score.value();
        if score >= HIGH_QUALITY_SCORE {
            high_quality += 1;
        }
        score_sum += u64::from(score);
    }

    let average_compatibility = if total > 0 {
        round_one_decimal(score_sum as f64 / total as f64)
    } else {
        0.0
    };

    let mut stats = MatchStats {
        side,
        total_matches: total,
        pending_matches: pending,
        viewed_matches: viewed,
        passed_matches: passed,
        interested_matches: interested,
        mutual_matches: mutual,
        counterpart_interest_count: counterpart_interest,
        average_compatibility,
        high_quality_matches: high_quality,
        match_rate: rate(mutual, total),
        response_rate: rate(responded, total),
        success_rate: rate(mutual, interested),
        attraction_rate: rate(counterpart_interest, total),
        insights: Vec::new(),
    };
    stats.insights = personalized_insights(&stats);
    stats
}

/// Rule-based insights for the side the stats were computed for
pub fn personalized_insights(stats: &MatchStats) -> Vec<PersonalizedInsight> {
    match stats.side {
        CandidateKind::Investor => investor_insights(stats),
        CandidateKind::Startup => startup_insights(stats),
    }
}

fn investor_insights(stats: &MatchStats) -> Vec<PersonalizedInsight> {
    use InsightKind::*;
    use InsightPriority::*;

    let mut insights = Vec::new();

    if stats.total_matches == 0 {
        insights.push(PersonalizedInsight::new(
            ActionNeeded,
            "Complete Your Profile",
            "Complete your investor profile to start receiving startup matches.",
            High,
        ));
    } else if stats.total_matches < 5 {
        insights.push(PersonalizedInsight::new(
            Info,
            "Building Your Match Pipeline",
            format!(
                "You have {} matches. More will be generated as startups join the platform.",
                stats.total_matches
            ),
            Medium,
        ));
    }

    if stats.success_rate > 50.0 {
        insights.push(PersonalizedInsight::new(
            Positive,
            "High Success Rate",
            format!(
                "Your {:.1}% success rate is excellent! You're good at identifying promising opportunities.",
                stats.success_rate
            ),
            Low,
        ));
    } else if stats.success_rate < 20.0 && stats.total_matches > 10 {
        insights.push(PersonalizedInsight::new(
            Suggestion,
            "Improve Match Success",
            "Consider broadening your criteria or engaging more actively with matches.",
            Medium,
        ));
    }

    if stats.average_compatibility > 80.0 {
        insights.push(PersonalizedInsight::new(
            Positive,
            "High-Quality Matches",
            format!(
                "Your average match compatibility of {:.1}% indicates very targeted matching.",
                stats.average_compatibility
            ),
            Low,
        ));
    }

    insights
}

fn startup_insights(stats: &MatchStats) -> Vec<PersonalizedInsight> {
    use InsightKind::*;
    use InsightPriority::*;

    let mut insights = Vec::new();

    if stats.total_matches == 0 {
        insights.push(PersonalizedInsight::new(
            ActionNeeded,
            "Complete Your Profile",
            "Complete your startup profile to start receiving investor matches.",
            High,
        ));
    }

    if stats.attraction_rate > 40.0 {
        insights.push(PersonalizedInsight::new(
            Positive,
            "High Investor Interest",
            format!(
                "{:.1}% of investors are interested in your startup. Great traction!",
                stats.attraction_rate
            ),
            Low,
        ));
    } else if stats.attraction_rate < 15.0 && stats.total_matches > 10 {
        insights.push(PersonalizedInsight::new(
            Suggestion,
            "Improve Investor Appeal",
            "Consider updating your pitch deck or highlighting key metrics to attract more investor interest.",
            Medium,
        ));
    }

    if stats.mutual_matches > 3 {
        insights.push(PersonalizedInsight::new(
            Positive,
            "Multiple Mutual Matches",
            format!(
                "You have {} mutual matches. Time to start conversations!",
                stats.mutual_matches
            ),
            High,
        ));
    }

    insights
}

#[inline]
fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_one_decimal(count as f64 * 100.0 / total as f64)
}

#[inline]
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
