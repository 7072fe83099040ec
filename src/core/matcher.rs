use std::collections::HashSet;

use crate::core::{filters::matches_filters, ordering::SortSpec, scoring::{calculate_compatibility, explain}};
use crate::models::{
    GeneratedMatch, InvestorProfile, MatchCandidate, MatchFilters, ScoringWeights, StartupProfile,
};

/// Generated pairings must score strictly above this overall fraction
pub const DEFAULT_MIN_GENERATED_SCORE: f64 = 0.3;

/// Filter and order candidates for display
///
/// Pure function: the input slice is never modified and the result holds
/// references into it. Candidates pass when the query and every facet in
/// `filters` accept them; survivors are stably sorted by `sort`, so ties
/// keep their input order.
pub fn rank_matches<'a>(
    candidates: &'a [MatchCandidate],
    query: &str,
    filters: &MatchFilters,
    sort: SortSpec,
) -> Vec<&'a MatchCandidate> {
    let needle = query.to_lowercase();

    let mut ranked: Vec<&MatchCandidate> = candidates
        .iter()
        .filter(|candidate| matches_filters(candidate, &needle, filters))
        .collect();

    ranked.sort_by(|a, b| sort.compare(a, b));
    ranked
}

/// Result of ranking a candidate list
#[derive(Debug)]
pub struct RankResult<'a> {
    pub matches: Vec<&'a MatchCandidate>,
    /// Candidates that passed filtering, before the limit was applied
    pub total_results: usize,
    pub total_candidates: usize,
}

/// Main matching orchestrator
///
/// Ranks precomputed candidate lists for display and generates new
/// investor/startup pairings from profile data.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    min_generated_score: f64,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, min_generated_score: f64) -> Self {
        Self {
            weights,
            min_generated_score,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_MIN_GENERATED_SCORE)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank candidates and keep at most `limit` of them
    pub fn rank<'a>(
        &self,
        candidates: &'a [MatchCandidate],
        query: &str,
        filters: &MatchFilters,
        sort: SortSpec,
        limit: usize,
    ) -> RankResult<'a> {
        let total_candidates = candidates.len();
        let mut matches = rank_matches(candidates, query, filters, sort);
        let total_results = matches.len();
        matches.truncate(limit);

        tracing::debug!(
            "Ranked {} of {} candidates by {} (returning {})",
            total_results,
            total_candidates,
            sort,
            matches.len()
        );

        RankResult {
            matches,
            total_results,
            total_candidates,
        }
    }

    /// Generate startup pairings for an investor
    ///
    /// Startups in `exclude_ids` (typically already-matched ones) are skipped.
    pub fn match_startups(
        &self,
        investor: &InvestorProfile,
        startups: &[StartupProfile],
        exclude_ids: &HashSet<u32>,
        limit: usize,
    ) -> Vec<GeneratedMatch> {
        let matches = startups
            .iter()
            .filter(|startup| !exclude_ids.contains(&startup.user_id))
            .filter_map(|startup| self.pair(investor, startup))
            .collect();

        self.finalize(matches, limit)
    }

    /// Generate investor pairings for a startup
    pub fn match_investors(
        &self,
        startup: &StartupProfile,
        investors: &[InvestorProfile],
        exclude_ids: &HashSet<u32>,
        limit: usize,
    ) -> Vec<GeneratedMatch> {
        let matches = investors
            .iter()
            .filter(|investor| !exclude_ids.contains(&investor.user_id))
            .filter_map(|investor| self.pair(investor, startup))
            .collect();

        self.finalize(matches, limit)
    }

    /// Score one pairing, dropping it when it does not clear the threshold
    fn pair(&self, investor: &InvestorProfile, startup: &StartupProfile) -> Option<GeneratedMatch> {
        let breakdown = calculate_compatibility(investor, startup, &self.weights);
        if breakdown.overall <= self.min_generated_score {
            return None;
        }

        Some(GeneratedMatch {
            investor_id: investor.user_id,
            startup_id: startup.user_id,
            compatibility_score: breakdown.percentage(),
            confidence: breakdown.confidence(),
            reasons: breakdown.reasons(),
            explanation: explain(investor, startup, &breakdown),
            breakdown,
        })
    }

    /// Sort by overall score (descending, stable) and apply the limit
    fn finalize(&self, mut matches: Vec<GeneratedMatch>, limit: usize) -> Vec<GeneratedMatch> {
        matches.sort_by(|a, b| b.breakdown.overall.total_cmp(&a.breakdown.overall));
        matches.truncate(limit);
        matches
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
