mod test_utils;

use common::test_helpers::generate_unique_driver_id;
use scoring::model::DriverTier;
use scoring::scorer::{
    calculate_driver_score, determine_driver_tier, driver_rate_multiplier, driver_score_summary,
    score_breakdown, tier_config, tier_from_label, tier_priority_bonus,
};
use test_utils::{clean_metrics, new_driver_metrics, struggling_metrics};

#[test]
fn test_provisional_score_below_five_deliveries() {
    let id = generate_unique_driver_id("DRV");
    for total in 0..5 {
        // Even a terrible record stays provisional below the floor
        let mut metrics = struggling_metrics(&id);
        metrics.total_deliveries = total;
        assert_eq!(calculate_driver_score(&metrics), 50.0);

        let mut metrics = clean_metrics(&id);
        metrics.total_deliveries = total;
        assert_eq!(calculate_driver_score(&metrics), 50.0);
    }
}

#[test]
fn test_reference_driver_scores_diamond() {
    let metrics = clean_metrics("DRV-reference");
    let breakdown = score_breakdown(&metrics);

    let by_name = |name: &str| {
        breakdown
            .dimensions
            .iter()
            .find(|d| d.name == name)
            .unwrap_or_else(|| panic!("missing dimension {}", name))
    };

    assert!((by_name("completion_rate").normalized_value - 95.0).abs() < 0.01);
    assert!((by_name("rating").normalized_value - 95.0).abs() < 0.01);
    assert!((by_name("on_time_rate").normalized_value - 94.74).abs() < 0.01);
    assert!((by_name("acceptance_rate").normalized_value - 80.0).abs() < 0.01);
    assert!((by_name("cancellation_rate").normalized_value - 95.0).abs() < 0.01);

    assert!((breakdown.overall - 92.7).abs() < 0.01);
    assert_eq!(breakdown.tier, DriverTier::Diamond);
}

#[test]
fn test_score_stays_in_range() {
    let mut metrics = struggling_metrics("DRV-floor");
    metrics.completed_deliveries = 0;
    metrics.on_time_deliveries = 0;
    metrics.accepted_orders = 0;
    metrics.average_rating = 1.0;
    metrics.cancelled_orders = metrics.total_deliveries;
    let score = calculate_driver_score(&metrics);
    assert!((0.0..=100.0).contains(&score), "score {} out of range", score);

    let mut metrics = clean_metrics("DRV-ceiling");
    metrics.completed_deliveries = 100;
    metrics.on_time_deliveries = 100;
    metrics.accepted_orders = 100;
    metrics.average_rating = 5.0;
    metrics.cancelled_orders = 0;
    let score = calculate_driver_score(&metrics);
    assert!((0.0..=100.0).contains(&score), "score {} out of range", score);
}

#[test]
fn test_breakdown_overall_matches_score() {
    // The equality is a contract, checked across profiles including the
    // provisional path
    for metrics in [
        clean_metrics("DRV-a"),
        struggling_metrics("DRV-b"),
        new_driver_metrics("DRV-c"),
    ] {
        assert_eq!(
            score_breakdown(&metrics).overall,
            calculate_driver_score(&metrics)
        );
    }
}

#[test]
fn test_dimension_weights_sum_to_one() {
    let breakdown = score_breakdown(&clean_metrics("DRV-weights"));
    let total: f64 = breakdown.dimensions.iter().map(|d| d.weight).sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert_eq!(breakdown.dimensions.len(), 5);
}

#[test]
fn test_zero_denominators_default_to_zero() {
    let mut metrics = clean_metrics("DRV-zero");
    metrics.completed_deliveries = 0;
    metrics.on_time_deliveries = 0;
    metrics.offered_orders = 0;
    metrics.accepted_orders = 0;

    let breakdown = score_breakdown(&metrics);
    let on_time = breakdown
        .dimensions
        .iter()
        .find(|d| d.name == "on_time_rate")
        .unwrap();
    let acceptance = breakdown
        .dimensions
        .iter()
        .find(|d| d.name == "acceptance_rate")
        .unwrap();
    assert_eq!(on_time.normalized_value, 0.0);
    assert_eq!(acceptance.normalized_value, 0.0);
}

#[test]
fn test_tier_boundaries() {
    let expectations = [
        (39.0, DriverTier::Bronze),
        (40.0, DriverTier::Silver),
        (59.0, DriverTier::Silver),
        (60.0, DriverTier::Gold),
        (74.0, DriverTier::Gold),
        (75.0, DriverTier::Platinum),
        (89.0, DriverTier::Platinum),
        (90.0, DriverTier::Diamond),
        (100.0, DriverTier::Diamond),
    ];
    for (score, expected) in expectations {
        assert_eq!(
            determine_driver_tier(score),
            expected,
            "score {} mapped to the wrong tier",
            score
        );
    }
}

#[test]
fn test_tier_config_lookups() {
    assert_eq!(tier_config(DriverTier::Bronze).label, "Bronze");
    assert_eq!(tier_config(DriverTier::Diamond).max_score, 100.0);

    // Bonuses and multipliers rise with the tier
    let tiers = [
        DriverTier::Bronze,
        DriverTier::Silver,
        DriverTier::Gold,
        DriverTier::Platinum,
        DriverTier::Diamond,
    ];
    for pair in tiers.windows(2) {
        assert!(tier_priority_bonus(pair[1]) > tier_priority_bonus(pair[0]));
        assert!(driver_rate_multiplier(pair[1]) > driver_rate_multiplier(pair[0]));
    }
}

#[test]
fn test_tier_from_label() {
    assert_eq!(tier_from_label("gold"), DriverTier::Gold);
    assert_eq!(tier_from_label("Diamond"), DriverTier::Diamond);
    // Unknown labels fall back to bronze instead of failing
    assert_eq!(tier_from_label("mythril"), DriverTier::Bronze);
    assert_eq!(tier_from_label(""), DriverTier::Bronze);
}

#[test]
fn test_score_summary_buckets() {
    let provisional = driver_score_summary(&new_driver_metrics("DRV-new"));
    assert!(provisional.contains("provisional"), "{}", provisional);

    let outstanding = driver_score_summary(&clean_metrics("DRV-top"));
    assert!(outstanding.contains("outstanding"), "{}", outstanding);

    let below = driver_score_summary(&struggling_metrics("DRV-low"));
    assert!(below.contains("below average"), "{}", below);
}
