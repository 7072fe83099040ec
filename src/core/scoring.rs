use crate::models::{
    CompatibilityBreakdown, CompatibilityScore, ConfidenceLevel, InvestorProfile, MatchExplanation,
    ScoringWeights, StartupProfile,
};

const TECH_INDUSTRIES: [&str; 5] = ["technology", "software", "ai", "fintech", "edtech"];
const HEALTH_INDUSTRIES: [&str; 4] = ["healthcare", "biotech", "medtech", "pharma"];
const US_STATES: [&str; 5] = ["california", "new york", "texas", "florida", "washington"];
const STAGE_ORDER: [&str; 5] = ["pre_seed", "seed", "series_a", "series_b", "series_c"];

/// Calculate investor/startup compatibility
///
/// Scoring formula:
/// overall = (
///     industry * 0.30 +       # Preferred or related industry
///     funding * 0.25 +        # Amount sought vs. check size
///     geographic * 0.15 +     # Headquarters vs. preferred regions
///     stage * 0.20 +          # Funding stage vs. preferred stages
///     market_size * 0.10      # Size of the addressable market
/// )
///
/// Missing data on either side yields a neutral component score rather
/// than zero.
pub fn calculate_compatibility(
    investor: &InvestorProfile,
    startup: &StartupProfile,
    weights: &ScoringWeights,
) -> CompatibilityBreakdown {
    let industry = industry_score(investor, startup);
    let funding = funding_score(investor, startup);
    let geographic = geographic_score(investor, startup);
    let stage = stage_score(investor, startup);
    let market_size = market_size_score(startup);

    let overall = industry * weights.industry
        + funding * weights.funding
        + geographic * weights.geographic
        + stage * weights.stage
        + market_size * weights.market_size;

    CompatibilityBreakdown {
        overall,
        industry,
        funding,
        geographic,
        stage,
        market_size,
    }
}

impl CompatibilityBreakdown {
    pub fn confidence(&self) -> ConfidenceLevel {
        if self.overall >= 0.8 {
            ConfidenceLevel::High
        } else if self.overall >= 0.6 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn percentage(&self) -> CompatibilityScore {
        CompatibilityScore::from_fraction(self.overall)
    }

    /// Human-readable reasons, strongest components first in model order
    pub fn reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();

        if self.industry >= 0.8 {
            reasons.push("Strong industry alignment");
        } else if self.industry >= 0.6 {
            reasons.push("Good industry fit");
        }

        if self.funding >= 0.8 {
            reasons.push("Perfect funding match");
        } else if self.funding >= 0.6 {
            reasons.push("Compatible funding requirements");
        }

        if self.geographic >= 0.8 {
            reasons.push("Same geographic region");
        }
        if self.stage >= 0.8 {
            reasons.push("Ideal investment stage");
        }
        if self.market_size >= 0.8 {
            reasons.push("Large market opportunity");
        }

        if reasons.is_empty() {
            reasons.push("Potential synergies identified");
        }

        reasons.into_iter().map(str::to_string).collect()
    }
}

/// Explain a scored pairing in sentences a dashboard can show as-is
pub fn explain(
    investor: &InvestorProfile,
    startup: &StartupProfile,
    breakdown: &CompatibilityBreakdown,
) -> MatchExplanation {
    MatchExplanation {
        overall: format!(
            "This match scores {}% across industry, funding, location, stage and market size.",
            breakdown.percentage().value()
        ),
        industry: explain_industry(investor, startup),
        funding: explain_funding(investor, startup, breakdown.funding),
        geographic: explain_geographic(investor, startup, breakdown.geographic),
    }
}

fn explain_industry(investor: &InvestorProfile, startup: &StartupProfile) -> String {
    let focus = investor
        .preferred_industries
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    match (focus.is_empty(), non_empty(&startup.industry)) {
        (_, None) => "The startup has not specified an industry.".to_string(),
        (true, Some(industry)) => format!(
            "The investor has no stated industry focus; the startup operates in {}.",
            industry
        ),
        (false, Some(industry)) => format!(
            "The investor focuses on {} while the startup operates in {}.",
            focus, industry
        ),
    }
}

fn explain_funding(investor: &InvestorProfile, startup: &StartupProfile, score: f64) -> String {
    let Some(needed) = startup.funding_needed.filter(|amount| *amount > 0) else {
        return "The startup has not specified a funding target.".to_string();
    };

    let range = match (investor.min_investment, investor.max_investment) {
        (Some(min), Some(max)) => format!("{}-{}", format_usd(min), format_usd(max)),
        (None, Some(max)) => format!("up to {}", format_usd(max)),
        (Some(min), None) => format!("{} and above", format_usd(min)),
        (None, None) => {
            return format!(
                "The startup seeks {}; the investor has not set an investment range.",
                format_usd(needed)
            )
        }
    };

    let fit = if score >= 1.0 { "fits within" } else { "falls outside" };
    format!(
        "The startup seeks {} which {} the investor's {} range.",
        format_usd(needed),
        fit,
        range
    )
}

fn explain_geographic(investor: &InvestorProfile, startup: &StartupProfile, score: f64) -> String {
    let Some(headquarters) = non_empty(&startup.headquarters) else {
        return "The startup has not specified a headquarters location.".to_string();
    };

    if investor.geographic_preferences.is_empty() {
        format!(
            "The startup is based in {}; the investor has no regional preference.",
            headquarters
        )
    } else if score >= 0.8 {
        format!(
            "Geographic alignment between investor preferences and startup location in {}.",
            headquarters
        )
    } else {
        format!(
            "The startup is based in {}, outside the investor's preferred regions.",
            headquarters
        )
    }
}

/// Whole-dollar amount with thousands separators, e.g. `$2,500,000`
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("${}", grouped)
}

/// Normalize a stage label so "Series A", "series-a" and "series_a" agree
pub fn normalize_stage(stage: &str) -> String {
    stage
        .trim()
        .to_lowercase()
        .replace(|c: char| c == ' ' || c == '-', "_")
}

/// Labels from free-text profile fields compare without regard to case
fn same_label(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Case-insensitive membership in a fixed list of lowercase labels
fn in_family(family: &[&str], value: &str) -> bool {
    family.iter().any(|member| member.eq_ignore_ascii_case(value.trim()))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[inline]
fn industry_score(investor: &InvestorProfile, startup: &StartupProfile) -> f64 {
    let Some(industry) = non_empty(&startup.industry) else {
        return 0.5;
    };
    if investor.preferred_industries.is_empty() {
        return 0.5;
    }

    if investor.preferred_industries.iter().any(|preferred| same_label(preferred, industry)) {
        return 1.0;
    }

    let same_family = |family: &[&str]| {
        in_family(family, industry)
            && investor
                .preferred_industries
                .iter()
                .any(|preferred| in_family(family, preferred))
    };

    if same_family(&TECH_INDUSTRIES[..]) || same_family(&HEALTH_INDUSTRIES[..]) {
        0.7
    } else {
        0.2
    }
}

#[inline]
fn funding_score(investor: &InvestorProfile, startup: &StartupProfile) -> f64 {
    let Some(needed) = startup.funding_needed.filter(|amount| *amount > 0) else {
        return 0.5;
    };
    let needed = needed as f64;
    let min = investor.min_investment.unwrap_or(0) as f64;
    let max = investor.max_investment.map_or(f64::INFINITY, |max| max as f64);

    if needed >= min && needed <= max {
        1.0
    } else if needed < min {
        if needed >= min * 0.5 {
            0.7
        } else {
            0.3
        }
    } else if needed <= max * 1.5 {
        0.6
    } else {
        0.2
    }
}

#[inline]
fn geographic_score(investor: &InvestorProfile, startup: &StartupProfile) -> f64 {
    let Some(headquarters) = non_empty(&startup.headquarters) else {
        return 0.7;
    };
    if investor.geographic_preferences.is_empty() {
        return 0.7;
    }

    if investor.geographic_preferences.iter().any(|region| same_label(region, headquarters)) {
        return 1.0;
    }

    let investor_in_us = investor
        .geographic_preferences
        .iter()
        .any(|region| in_family(&US_STATES, region));

    if investor_in_us && in_family(&US_STATES, headquarters) {
        0.8
    } else {
        0.5
    }
}

#[inline]
fn stage_score(investor: &InvestorProfile, startup: &StartupProfile) -> f64 {
    let Some(stage) = non_empty(&startup.funding_stage) else {
        return 0.6;
    };
    if investor.investment_stages.is_empty() {
        return 0.6;
    }

    let stage = normalize_stage(stage);
    let preferred: Vec<String> = investor
        .investment_stages
        .iter()
        .map(|s| normalize_stage(s))
        .collect();

    if preferred.contains(&stage) {
        return 1.0;
    }

    let position = |s: &str| STAGE_ORDER.iter().position(|known| *known == s);
    let Some(startup_idx) = position(stage.as_str()) else {
        return 0.4;
    };

    let min_diff = preferred
        .iter()
        .filter_map(|s| position(s.as_str()))
        .map(|idx| idx.abs_diff(startup_idx))
        .min();

    match min_diff {
        Some(0..=1) => 0.8,
        Some(2) => 0.5,
        Some(_) => 0.2,
        None => 0.4,
    }
}

#[inline]
fn market_size_score(startup: &StartupProfile) -> f64 {
    let Some(size) = non_empty(&startup.market_size) else {
        return 0.6;
    };
    match size.to_lowercase().as_str() {
        "small" => 0.4,
        "medium" => 0.7,
        "large" => 0.9,
        "very_large" => 1.0,
        _ => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_investor() -> InvestorProfile {
        InvestorProfile {
            user_id: 10,
            name: "GreenTech Ventures".to_string(),
            preferred_industries: vec!["fintech".to_string(), "software".to_string()],
            investment_stages: vec!["seed".to_string(), "series_a".to_string()],
            geographic_preferences: vec!["California".to_string()],
            min_investment: Some(500_000),
            max_investment: Some(5_000_000),
        }
    }

    fn create_startup() -> StartupProfile {
        StartupProfile {
            user_id: 20,
            company_name: "TechFlow Solutions".to_string(),
            industry: Some("fintech".to_string()),
            funding_needed: Some(2_000_000),
            funding_stage: Some("Series A".to_string()),
            headquarters: Some("California".to_string()),
            market_size: Some("very_large".to_string()),
        }
    }

    #[test]
    fn test_perfect_match() {
        let breakdown =
            calculate_compatibility(&create_investor(), &create_startup(), &ScoringWeights::default());

        assert!((breakdown.overall - 1.0).abs() < 1e-9);
        assert_eq!(breakdown.confidence(), ConfidenceLevel::High);
        assert_eq!(breakdown.percentage().value(), 100);
        assert_eq!(
            breakdown.reasons(),
            vec![
                "Strong industry alignment",
                "Perfect funding match",
                "Same geographic region",
                "Ideal investment stage",
                "Large market opportunity",
            ]
        );
    }

    #[test]
    fn test_missing_data_is_neutral() {
        let investor = InvestorProfile::default();
        let startup = StartupProfile::default();
        let breakdown = calculate_compatibility(&investor, &startup, &ScoringWeights::default());

        assert_eq!(breakdown.industry, 0.5);
        assert_eq!(breakdown.funding, 0.5);
        assert_eq!(breakdown.geographic, 0.7);
        assert_eq!(breakdown.stage, 0.6);
        assert_eq!(breakdown.market_size, 0.6);
        // 0.15 + 0.125 + 0.105 + 0.12 + 0.06
        assert!((breakdown.overall - 0.56).abs() < 1e-9);
        assert_eq!(breakdown.confidence(), ConfidenceLevel::Low);
        assert_eq!(breakdown.reasons(), vec!["Potential synergies identified"]);
    }

    #[test]
    fn test_related_industry() {
        let investor = create_investor();
        let mut startup = create_startup();

        startup.industry = Some("AI".to_string());
        assert_eq!(industry_score(&investor, &startup), 0.7);

        startup.industry = Some("biotech".to_string());
        assert_eq!(industry_score(&investor, &startup), 0.2);
    }

    #[test]
    fn test_exact_matches_ignore_case() {
        let investor = create_investor();
        let mut startup = create_startup();

        startup.industry = Some("FinTech".to_string());
        assert_eq!(industry_score(&investor, &startup), 1.0);

        startup.industry = Some(" SOFTWARE ".to_string());
        assert_eq!(industry_score(&investor, &startup), 1.0);

        startup.headquarters = Some("california".to_string());
        assert_eq!(geographic_score(&investor, &startup), 1.0);
    }

    #[test]
    fn test_funding_bands() {
        let investor = create_investor();
        let mut startup = create_startup();

        startup.funding_needed = Some(300_000);
        assert_eq!(funding_score(&investor, &startup), 0.7);

        startup.funding_needed = Some(100_000);
        assert_eq!(funding_score(&investor, &startup), 0.3);

        startup.funding_needed = Some(7_000_000);
        assert_eq!(funding_score(&investor, &startup), 0.6);

        startup.funding_needed = Some(9_000_000);
        assert_eq!(funding_score(&investor, &startup), 0.2);
    }

    #[test]
    fn test_unbounded_max_investment() {
        let mut investor = create_investor();
        investor.max_investment = None;
        let mut startup = create_startup();
        startup.funding_needed = Some(50_000_000);

        assert_eq!(funding_score(&investor, &startup), 1.0);
    }

    #[test]
    fn test_geographic_same_country() {
        let investor = create_investor();
        let mut startup = create_startup();

        startup.headquarters = Some("Texas".to_string());
        assert_eq!(geographic_score(&investor, &startup), 0.8);

        startup.headquarters = Some("London".to_string());
        assert_eq!(geographic_score(&investor, &startup), 0.5);
    }

    #[test]
    fn test_stage_distance() {
        let mut investor = create_investor();
        investor.investment_stages = vec!["pre_seed".to_string()];
        let mut startup = create_startup();

        startup.funding_stage = Some("Seed".to_string());
        assert_eq!(stage_score(&investor, &startup), 0.8);

        startup.funding_stage = Some("series_a".to_string());
        assert_eq!(stage_score(&investor, &startup), 0.5);

        startup.funding_stage = Some("Series C".to_string());
        assert_eq!(stage_score(&investor, &startup), 0.2);

        startup.funding_stage = Some("Growth".to_string());
        assert_eq!(stage_score(&investor, &startup), 0.4);
    }

    #[test]
    fn test_normalize_stage() {
        assert_eq!(normalize_stage("Series A"), "series_a");
        assert_eq!(normalize_stage("pre-seed"), "pre_seed");
        assert_eq!(normalize_stage(" seed "), "seed");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0), "$0");
        assert_eq!(format_usd(999), "$999");
        assert_eq!(format_usd(1_000), "$1,000");
        assert_eq!(format_usd(2_500_000), "$2,500,000");
        assert_eq!(format_usd(12_345_678), "$12,345,678");
    }

    #[test]
    fn test_explain_bounded_range() {
        let investor = create_investor();
        let startup = create_startup();
        let breakdown = calculate_compatibility(&investor, &startup, &ScoringWeights::default());

        let explanation = explain(&investor, &startup, &breakdown);
        assert!(explanation.overall.starts_with("This match scores 100%"));
        assert_eq!(
            explanation.industry,
            "The investor focuses on fintech, software while the startup operates in fintech."
        );
        assert_eq!(
            explanation.funding,
            "The startup seeks $2,000,000 which fits within the investor's $500,000-$5,000,000 range."
        );
        assert_eq!(
            explanation.geographic,
            "Geographic alignment between investor preferences and startup location in California."
        );
    }

    #[test]
    fn test_explain_open_ended_ranges() {
        let mut investor = create_investor();
        let mut startup = create_startup();
        startup.funding_needed = Some(50_000_000);

        investor.max_investment = None;
        let breakdown = calculate_compatibility(&investor, &startup, &ScoringWeights::default());
        assert_eq!(
            explain(&investor, &startup, &breakdown).funding,
            "The startup seeks $50,000,000 which fits within the investor's $500,000 and above range."
        );

        investor.min_investment = None;
        investor.max_investment = Some(1_000_000);
        let breakdown = calculate_compatibility(&investor, &startup, &ScoringWeights::default());
        assert_eq!(
            explain(&investor, &startup, &breakdown).funding,
            "The startup seeks $50,000,000 which falls outside the investor's up to $1,000,000 range."
        );

        investor.max_investment = None;
        let breakdown = calculate_compatibility(&investor, &startup, &ScoringWeights::default());
        assert_eq!(
            explain(&investor, &startup, &breakdown).funding,
            "The startup seeks $50,000,000; the investor has not set an investment range."
        );
    }

    #[test]
    fn test_explain_missing_startup_data() {
        let investor = InvestorProfile::default();
        let startup = StartupProfile::default();
        let breakdown = calculate_compatibility(&investor, &startup, &ScoringWeights::default());

        let explanation = explain(&investor, &startup, &breakdown);
        assert!(explanation.overall.starts_with("This match scores 56%"));
        assert_eq!(explanation.industry, "The startup has not specified an industry.");
        assert_eq!(explanation.funding, "The startup has not specified a funding target.");
        assert_eq!(
            explanation.geographic,
            "The startup has not specified a headquarters location."
        );
    }

    #[test]
    fn test_market_size() {
        let mut startup = create_startup();
        startup.market_size = Some("small".to_string());
        assert_eq!(market_size_score(&startup), 0.4);
        startup.market_size = Some("galactic".to_string());
        assert_eq!(market_size_score(&startup), 0.5);
    }
}
