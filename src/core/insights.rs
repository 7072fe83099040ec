use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{CandidateKind, CompatibilityTier, MatchCandidate};

/// One bucket of a distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionEntry {
    pub label: String,
    pub count: usize,
    /// Share of all summarized candidates carrying this label, one decimal
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierCount {
    pub tier: CompatibilityTier,
    pub label: String,
    pub count: usize,
}

/// Aggregate view over a list of matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAnalytics {
    pub total_matches: usize,
    pub average_compatibility: f64,
    pub startup_count: usize,
    pub investor_count: usize,
    pub verified_count: usize,
    pub stage_distribution: Vec<DistributionEntry>,
    pub industry_distribution: Vec<DistributionEntry>,
    pub location_distribution: Vec<DistributionEntry>,
    pub tier_counts: Vec<TierCount>,
}

/// Summarize a list of candidates
///
/// Accepts owned slices or the reference list returned by ranking. A
/// candidate with several industry tags counts once per tag, so industry
/// percentages can sum past 100. Candidates without a stage (investors)
/// are left out of the stage distribution.
pub fn summarize<'a, I>(candidates: I) -> MatchAnalytics
where
    I: IntoIterator<Item = &'a MatchCandidate>,
{
    let mut total = 0usize;
    let mut score_sum = 0u64;
    let mut startup_count = 0usize;
    let mut investor_count = 0usize;
    let mut verified_count = 0usize;
    let mut stages: BTreeMap<&str, usize> = BTreeMap::new();
    let mut industries: BTreeMap<&str, usize> = BTreeMap::new();
    let mut locations: BTreeMap<&str, usize> = BTreeMap::new();
    let mut tiers: BTreeMap<CompatibilityTier, usize> = BTreeMap::new();

    for candidate in candidates {
        total += 1;
        score_sum += u64::from(candidate.compatibility_score.value());

        match candidate.kind() {
            CandidateKind::Startup => startup_count += 1,
            CandidateKind::Investor => investor_count += 1,
        }
        if candidate.verified {
            verified_count += 1;
        }

        if let Some(stage) = candidate.stage() {
            *stages.entry(stage).or_default() += 1;
        }
        for industry in &candidate.industries {
            *industries.entry(industry.as_str()).or_default() += 1;
        }
        if !candidate.location.is_empty() {
            *locations.entry(candidate.location.as_str()).or_default() += 1;
        }
        *tiers.entry(candidate.compatibility_score.tier()).or_default() += 1;
    }

    let average_compatibility = if total > 0 {
        round_one_decimal(score_sum as f64 / total as f64)
    } else {
        0.0
    };

    let tier_counts = CompatibilityTier::ALL
        .iter()
        .map(|tier| TierCount {
            tier: *tier,
            label: tier.label().to_string(),
            count: tiers.get(tier).copied().unwrap_or(0),
        })
        .collect();

    MatchAnalytics {
        total_matches: total,
        average_compatibility,
        startup_count,
        investor_count,
        verified_count,
        stage_distribution: distribution(stages, total),
        industry_distribution: distribution(industries, total),
        location_distribution: distribution(locations, total),
        tier_counts,
    }
}

/// Turn label counts into entries sorted by count (desc), then label
fn distribution(counts: BTreeMap<&str, usize>, total: usize) -> Vec<DistributionEntry> {
    let mut entries: Vec<DistributionEntry> = counts
        .into_iter()
        .map(|(label, count)| DistributionEntry {
            label: label.to_string(),
            count,
            percentage: if total > 0 {
                round_one_decimal(count as f64 * 100.0 / total as f64)
            } else {
                0.0
            },
        })
        .collect();

    // BTreeMap iteration is already label-ordered; the stable sort keeps it for ties
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

#[inline]
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
