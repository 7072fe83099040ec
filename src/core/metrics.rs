use crate::models::{CandidateProfile, MatchCandidate};

/// Weight of an expressed interest relative to a single view
const TRENDING_INTEREST_WEIGHT: f64 = 10.0;

/// Parse a display money amount into USD
///
/// Accepts forms like `"$2M"`, `"$1.5M"`, `"$500K ARR"`, `"$750,000"` and
/// `"Pre-revenue"` (zero). Returns `None` for anything without a leading
/// number.
pub fn parse_money(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("pre-revenue") || trimmed.eq_ignore_ascii_case("pre revenue") {
        return Some(0.0);
    }

    let cleaned: String = trimmed.chars().filter(|c| *c != '$' && *c != ',').collect();
    let number_end = cleaned
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(cleaned.len());
    let (number, rest) = cleaned.split_at(number_end);
    let value: f64 = number.parse().ok()?;

    // A suffix letter only counts when it stands alone ("5M", "500K ARR"),
    // not as the start of a word ("10 monthly").
    let mut suffix = rest.trim_start().chars();
    let multiplier = match (suffix.next(), suffix.next()) {
        (Some(unit), next) if next.map_or(true, |c| !c.is_ascii_alphabetic()) => {
            match unit.to_ascii_uppercase() {
                'K' => 1e3,
                'M' => 1e6,
                'B' => 1e9,
                _ => 1.0,
            }
        }
        _ => 1.0,
    };

    Some(value * multiplier)
}

/// Upper bound of a display range such as `"$500K - $5M"`
///
/// A single amount is treated as a one-point range.
pub fn parse_money_range(raw: &str) -> Option<f64> {
    raw.split(|c| c == '-' || c == '–')
        .filter_map(parse_money)
        .reduce(f64::max)
}

/// Funding sort metric: startups by amount sought, investors by the top of
/// their check range. Missing or unparseable amounts count as zero.
pub fn funding_metric(candidate: &MatchCandidate) -> f64 {
    let amount = match &candidate.profile {
        CandidateProfile::Startup(details) => details.funding_needed.as_deref().and_then(parse_money),
        CandidateProfile::Investor(details) => {
            details.investment_range.as_deref().and_then(parse_money_range)
        }
    };
    amount.unwrap_or(0.0)
}

/// Traction sort metric
///
/// Startups use revenue; when revenue is missing or unparseable the customer
/// count stands in. Investors use portfolio size. Anything absent is zero.
pub fn traction_metric(candidate: &MatchCandidate) -> f64 {
    match &candidate.profile {
        CandidateProfile::Startup(details) => details
            .revenue
            .as_deref()
            .and_then(parse_money)
            .or_else(|| details.customers.map(f64::from))
            .unwrap_or(0.0),
        CandidateProfile::Investor(details) => details.portfolio_size.map(f64::from).unwrap_or(0.0),
    }
}

/// Trending sort metric: views plus weighted interests. Investors have no
/// engagement counters and score zero.
pub fn trending_metric(candidate: &MatchCandidate) -> f64 {
    match &candidate.profile {
        CandidateProfile::Startup(details) => {
            f64::from(details.views) + f64::from(details.interests) * TRENDING_INTEREST_WEIGHT
        }
        CandidateProfile::Investor(_) => 0.0,
    }
}
