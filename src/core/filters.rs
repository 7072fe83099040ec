use std::collections::BTreeSet;

use crate::models::{LocationFilter, MatchCandidate, MatchFilters};

/// Check the free-text query against a candidate
///
/// `needle` must already be lowercased. An empty needle matches everything.
#[inline]
pub fn matches_query(candidate: &MatchCandidate, needle: &str, search_industries: bool) -> bool {
    if needle.is_empty() {
        return true;
    }

    if candidate.name.to_lowercase().contains(needle)
        || candidate.description.to_lowercase().contains(needle)
    {
        return true;
    }

    search_industries
        && candidate
            .industries
            .iter()
            .any(|industry| industry.to_lowercase().contains(needle))
}

/// Industry facet: passes when no industries are selected or any tag is selected
#[inline]
pub fn matches_industries(candidate: &MatchCandidate, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || candidate.industries.iter().any(|industry| selected.contains(industry))
}

/// Stage facet: passes when no stages are selected or the candidate's stage is
/// selected. Candidates without a stage fail a non-empty selection.
#[inline]
pub fn matches_stage(candidate: &MatchCandidate, selected: &BTreeSet<String>) -> bool {
    if selected.is_empty() {
        return true;
    }
    candidate.stage().map_or(false, |stage| selected.contains(stage))
}

#[inline]
pub fn matches_location(candidate: &MatchCandidate, filter: &LocationFilter) -> bool {
    match filter {
        LocationFilter::All => true,
        LocationFilter::Exact(location) => candidate.location == *location,
    }
}

/// Apply the query and every facet; all must pass
#[inline]
pub fn matches_filters(candidate: &MatchCandidate, needle: &str, filters: &MatchFilters) -> bool {
    matches_query(candidate, needle, filters.search_industries)
        && matches_industries(candidate, &filters.industries)
        && matches_stage(candidate, &filters.stages)
        && candidate.compatibility_score.value() >= filters.min_compatibility
        && matches_location(candidate, &filters.location)
}
