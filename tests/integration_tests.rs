// Integration tests for Auxyn Match

use auxyn_match::config::Settings;
use auxyn_match::core::{
    match_stats, rank_matches, summarize, EngagementAction, EngagementState, Interest,
    MatchRecord, Matcher, SortDirection, SortKey, SortSpec,
};
use auxyn_match::models::{
    CandidateKind, CandidateProfile, CompatibilityScore, ConfidenceLevel, InvestorDetails, InvestorProfile,
    LocationFilter, MatchCandidate, MatchFilters, StartupDetails, StartupProfile,
};
use chrono::{Duration, Utc};
use std::collections::{BTreeSet, HashSet};

fn create_candidate(
    id: u32,
    name: &str,
    score: u8,
    industries: &[&str],
    stage: &str,
    location: &str,
    hours_ago: i64,
) -> MatchCandidate {
    MatchCandidate {
        id,
        name: name.to_string(),
        description: format!("{} is raising its next round", name),
        compatibility_score: CompatibilityScore::new(score).unwrap(),
        match_reasons: vec!["Industry alignment".to_string()],
        industries: industries.iter().map(|s| s.to_string()).collect(),
        location: location.to_string(),
        last_active: Some(Utc::now() - Duration::hours(hours_ago)),
        verified: id % 2 == 0,
        premium: false,
        response_rate: Some(75),
        profile: CandidateProfile::Startup(StartupDetails {
            stage: Some(stage.to_string()),
            funding_needed: Some(format!("${}M", id)),
            ..Default::default()
        }),
    }
}

fn create_marketplace() -> Vec<MatchCandidate> {
    vec![
        create_candidate(1, "TechFlow Solutions", 95, &["SaaS", "Enterprise Software"], "Series A", "San Francisco, CA", 2),
        create_candidate(2, "GreenEnergy Innovations", 60, &["CleanTech"], "Seed", "Austin, TX", 30),
        create_candidate(3, "HealthAI Diagnostics", 82, &["HealthTech", "AI/ML"], "Series A", "Boston, MA", 1),
        create_candidate(4, "FinanceFlow", 88, &["FinTech", "SaaS"], "Seed", "New York, NY", 72),
        create_candidate(5, "EduLearn Platform", 74, &["EdTech"], "Pre-Seed", "Austin, TX", 5),
    ]
}

fn create_investor_profile(id: u32) -> InvestorProfile {
    InvestorProfile {
        user_id: id,
        name: format!("Fund {}", id),
        preferred_industries: vec!["fintech".to_string(), "software".to_string()],
        investment_stages: vec!["seed".to_string(), "series_a".to_string()],
        geographic_preferences: vec!["California".to_string()],
        min_investment: Some(500_000),
        max_investment: Some(5_000_000),
    }
}

fn create_startup_profile(id: u32, industry: &str, stage: &str, funding: u64) -> StartupProfile {
    StartupProfile {
        user_id: id,
        company_name: format!("Startup {}", id),
        industry: Some(industry.to_string()),
        funding_needed: Some(funding),
        funding_stage: Some(stage.to_string()),
        headquarters: Some("California".to_string()),
        market_size: Some("large".to_string()),
    }
}

#[test]
fn test_integration_rank_worked_example() {
    let candidates = vec![
        create_candidate(1, "TechFlow", 95, &["SaaS"], "Seed", "San Francisco, CA", 1),
        create_candidate(2, "GreenEnergy", 60, &["CleanTech"], "Seed", "Austin, TX", 1),
        create_candidate(3, "HealthAI", 80, &["SaaS"], "Seed", "Boston, MA", 1),
    ];
    let filters = MatchFilters {
        industries: BTreeSet::from(["SaaS".to_string()]),
        min_compatibility: 70,
        ..Default::default()
    };

    let ranked = rank_matches(&candidates, "", &filters, SortSpec::default());
    let ids: Vec<u32> = ranked.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_integration_query_search() {
    let candidates = create_marketplace();

    for query in ["health", "HEALTH", "HealthAI"] {
        let ranked = rank_matches(&candidates, query, &MatchFilters::default(), SortSpec::default());
        let ids: Vec<u32> = ranked.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3], "query {:?}", query);
    }
}

#[test]
fn test_integration_combined_filters_and_sorts() {
    let candidates = create_marketplace();
    let filters = MatchFilters {
        stages: BTreeSet::from(["Seed".to_string(), "Series A".to_string()]),
        min_compatibility: 70,
        ..Default::default()
    };

    let by_name = rank_matches(
        &candidates,
        "",
        &filters,
        SortSpec::new(SortKey::Name, SortDirection::Ascending),
    );
    let names: Vec<&str> = by_name.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["FinanceFlow", "HealthAI Diagnostics", "TechFlow Solutions"]);

    let most_recent = rank_matches(
        &candidates,
        "",
        &filters,
        SortSpec::new(SortKey::RecentActivity, SortDirection::Ascending),
    );
    let ids: Vec<u32> = most_recent.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 1, 4]);

    // Funding needed is "$<id>M"
    let by_funding = rank_matches(
        &candidates,
        "",
        &filters,
        SortSpec::new(SortKey::FundingAmount, SortDirection::Descending),
    );
    let ids: Vec<u32> = by_funding.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![4, 3, 1]);

    let austin = MatchFilters {
        location: LocationFilter::Exact("Austin, TX".to_string()),
        ..Default::default()
    };
    let ranked = rank_matches(&candidates, "", &austin, SortSpec::default());
    let ids: Vec<u32> = ranked.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![5, 2]);
}

#[test]
fn test_integration_investors_fail_stage_filter() {
    let mut candidates = create_marketplace();
    candidates.push(MatchCandidate {
        profile: CandidateProfile::Investor(InvestorDetails::default()),
        ..create_candidate(6, "Apex Ventures", 99, &["SaaS"], "Seed", "San Francisco, CA", 1)
    });

    let all = rank_matches(&candidates, "", &MatchFilters::default(), SortSpec::default());
    assert_eq!(all.first().map(|c| c.id), Some(6));

    let seed_only = MatchFilters {
        stages: BTreeSet::from(["Seed".to_string()]),
        ..Default::default()
    };
    let ranked = rank_matches(&candidates, "", &seed_only, SortSpec::default());
    assert!(ranked.iter().all(|c| c.id != 6));
}

#[test]
fn test_integration_rank_then_summarize() {
    let matcher = Matcher::with_default_weights();
    let candidates = create_marketplace();

    let result = matcher.rank(&candidates, "", &MatchFilters::default(), SortSpec::default(), 3);
    assert_eq!(result.total_candidates, 5);
    assert_eq!(result.total_results, 5);
    assert_eq!(result.matches.len(), 3);

    let analytics = summarize(result.matches.iter().copied());
    assert_eq!(analytics.total_matches, 3);
    // 95, 88, 82
    assert_eq!(analytics.average_compatibility, 88.3);
    assert_eq!(analytics.startup_count, 3);
}

#[test]
fn test_integration_engagement_decorates_ranking() {
    let candidates = create_marketplace();
    let state = EngagementState::default()
        .apply(EngagementAction::ToggleSave, 3)
        .apply(EngagementAction::ExpressInterest, 1)
        .apply(EngagementAction::ToggleSave, 2)
        .apply(EngagementAction::ToggleSave, 2);

    let ranked = rank_matches(&candidates, "", &MatchFilters::default(), SortSpec::default());
    let saved: Vec<u32> = ranked.iter().filter(|c| state.is_saved(c.id)).map(|c| c.id).collect();
    let interested: Vec<u32> = ranked
        .iter()
        .filter(|c| state.is_interested(c.id))
        .map(|c| c.id)
        .collect();

    assert_eq!(saved, vec![3]);
    assert_eq!(interested, vec![1]);
}

#[test]
fn test_integration_generate_for_investor() {
    let matcher = Matcher::with_default_weights();
    let investor = create_investor_profile(100);
    let startups = vec![
        create_startup_profile(1, "fintech", "Seed", 2_000_000),
        create_startup_profile(2, "biotech", "Series C", 50_000_000),
        create_startup_profile(3, "ai", "Series A", 3_000_000),
        create_startup_profile(4, "fintech", "Series A", 1_000_000),
    ];
    let exclude = HashSet::from([4]);

    let matches = matcher.match_startups(&investor, &startups, &exclude, 10);
    let ids: Vec<u32> = matches.iter().map(|m| m.startup_id).collect();

    assert_eq!(ids, vec![1, 3, 2]);
    assert!(matches.iter().all(|m| m.investor_id == 100));
    assert_eq!(matches[0].compatibility_score.value(), 99);
    assert_eq!(matches[0].confidence, ConfidenceLevel::High);

    for pair in matches.windows(2) {
        assert!(pair[0].breakdown.overall >= pair[1].breakdown.overall);
    }
}

#[test]
fn test_integration_generate_for_startup() {
    let matcher = Matcher::with_default_weights();
    let startup = create_startup_profile(1, "fintech", "Seed", 2_000_000);
    let investors: Vec<InvestorProfile> = (10..15).map(create_investor_profile).collect();

    let matches = matcher.match_investors(&startup, &investors, &HashSet::new(), 2);

    assert_eq!(matches.len(), 2);
    // Equal scores keep pool order
    assert_eq!(matches[0].investor_id, 10);
    assert_eq!(matches[1].investor_id, 11);
}

#[test]
fn test_integration_matcher_from_settings() {
    let settings = Settings::from_toml_str(
        r#"
        [matching]
        min_generated_score = 0.9
        "#,
    )
    .unwrap();
    let matcher = settings.matcher();

    let investor = create_investor_profile(1);
    let startups = vec![
        create_startup_profile(1, "fintech", "Seed", 2_000_000),
        create_startup_profile(2, "biotech", "Series C", 50_000_000),
    ];

    let matches = matcher.match_startups(&investor, &startups, &HashSet::new(), 10);
    let ids: Vec<u32> = matches.iter().map(|m| m.startup_id).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn test_integration_stats_over_generated_matches() {
    let matcher = Matcher::with_default_weights();
    let investor = create_investor_profile(1);
    let startups = vec![
        create_startup_profile(1, "fintech", "Seed", 2_000_000),
        create_startup_profile(2, "software", "Series A", 1_000_000),
        create_startup_profile(3, "fintech", "Series A", 4_000_000),
    ];

    let generated = matcher.match_startups(&investor, &startups, &HashSet::new(), 10);
    assert_eq!(generated.len(), 3);

    // Investor likes the first two; only the top startup reciprocates
    let records: Vec<MatchRecord> = generated
        .iter()
        .enumerate()
        .map(|(i, m)| MatchRecord {
            investor_interest: if i < 2 { Interest::Interested } else { Interest::Pending },
            startup_interest: if i == 0 { Interest::Interested } else { Interest::Pending },
            viewed: true,
            compatibility_score: m.compatibility_score,
        })
        .collect();

    let stats = match_stats(&records, CandidateKind::Investor);

    assert_eq!(stats.total_matches, 3);
    assert_eq!(stats.mutual_matches, 1);
    assert_eq!(stats.interested_matches, 2);
    assert_eq!(stats.viewed_matches, 1);
    assert_eq!(stats.success_rate, 50.0);
    assert_eq!(stats.match_rate, 33.3);
    assert_eq!(stats.high_quality_matches, 3);
    assert!(stats.average_compatibility > 80.0);

    let titles: Vec<&str> = stats.insights.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Building Your Match Pipeline", "High-Quality Matches"]);
}
