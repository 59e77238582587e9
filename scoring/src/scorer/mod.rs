pub mod deactivation;
pub mod manipulation;
pub mod trend;

pub use deactivation::*;
pub use manipulation::*;
pub use trend::*;

use crate::{
    model::{DriverMetrics, DriverTier, ScoreBreakdown, ScoreDimension, TierConfig},
    normalize::{normalize, normalize_inverse},
};
use once_cell::sync::Lazy;
use std::str::FromStr;
use tracing::warn;

/// Drivers below this delivery count get the provisional score instead of
/// a computed one.
pub const MIN_SCORING_DELIVERIES: u32 = 5;
pub const PROVISIONAL_SCORE: f64 = 50.0;

const COMPLETION_WEIGHT: f64 = 0.25;
const RATING_WEIGHT: f64 = 0.30;
const ON_TIME_WEIGHT: f64 = 0.20;
const ACCEPTANCE_WEIGHT: f64 = 0.15;
const CANCELLATION_WEIGHT: f64 = 0.10;

// Contiguous, ascending, covering [0, 100] with no gaps.
static TIER_CONFIGS: Lazy<[TierConfig; 5]> = Lazy::new(|| {
    [
        TierConfig {
            tier: DriverTier::Bronze,
            min_score: 0.0,
            max_score: 39.0,
            label: "Bronze".to_string(),
            priority_bonus: 0,
            rate_multiplier: 1.0,
        },
        TierConfig {
            tier: DriverTier::Silver,
            min_score: 40.0,
            max_score: 59.0,
            label: "Silver".to_string(),
            priority_bonus: 5,
            rate_multiplier: 1.05,
        },
        TierConfig {
            tier: DriverTier::Gold,
            min_score: 60.0,
            max_score: 74.0,
            label: "Gold".to_string(),
            priority_bonus: 10,
            rate_multiplier: 1.10,
        },
        TierConfig {
            tier: DriverTier::Platinum,
            min_score: 75.0,
            max_score: 89.0,
            label: "Platinum".to_string(),
            priority_bonus: 20,
            rate_multiplier: 1.15,
        },
        TierConfig {
            tier: DriverTier::Diamond,
            min_score: 90.0,
            max_score: 100.0,
            label: "Diamond".to_string(),
            priority_bonus: 30,
            rate_multiplier: 1.25,
        },
    ]
});

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn compute_dimensions(metrics: &DriverMetrics) -> Vec<ScoreDimension> {
    let completion = metrics.completion_rate();
    let on_time = metrics.on_time_rate();
    let acceptance = metrics.acceptance_rate().unwrap_or(0.0);
    let cancellation = metrics.cancellation_rate();

    vec![
        ScoreDimension {
            name: "completion_rate".to_string(),
            raw_value: completion,
            normalized_value: completion,
            weight: COMPLETION_WEIGHT,
            weighted_score: completion * COMPLETION_WEIGHT,
        },
        ScoreDimension {
            name: "rating".to_string(),
            raw_value: metrics.average_rating,
            normalized_value: normalize(metrics.average_rating, 1.0, 5.0),
            weight: RATING_WEIGHT,
            weighted_score: normalize(metrics.average_rating, 1.0, 5.0) * RATING_WEIGHT,
        },
        ScoreDimension {
            name: "on_time_rate".to_string(),
            raw_value: on_time,
            normalized_value: on_time.min(100.0),
            weight: ON_TIME_WEIGHT,
            weighted_score: on_time.min(100.0) * ON_TIME_WEIGHT,
        },
        ScoreDimension {
            name: "acceptance_rate".to_string(),
            raw_value: acceptance,
            normalized_value: acceptance,
            weight: ACCEPTANCE_WEIGHT,
            weighted_score: acceptance * ACCEPTANCE_WEIGHT,
        },
        ScoreDimension {
            name: "cancellation_rate".to_string(),
            raw_value: cancellation,
            normalized_value: normalize_inverse(cancellation, 0.0, 100.0),
            weight: CANCELLATION_WEIGHT,
            weighted_score: normalize_inverse(cancellation, 0.0, 100.0) * CANCELLATION_WEIGHT,
        },
    ]
}

/// Composite 0-100 performance score.
///
/// Drivers with fewer than [`MIN_SCORING_DELIVERIES`] deliveries get the
/// fixed provisional score; they are never penalized before a meaningful
/// sample exists.
pub fn calculate_driver_score(metrics: &DriverMetrics) -> f64 {
    score_breakdown(metrics).overall
}

/// The same computation as [`calculate_driver_score`], itemized per
/// dimension. `overall` equals `calculate_driver_score` for every input.
pub fn score_breakdown(metrics: &DriverMetrics) -> ScoreBreakdown {
    let dimensions = compute_dimensions(metrics);

    let overall = if metrics.total_deliveries < MIN_SCORING_DELIVERIES {
        PROVISIONAL_SCORE
    } else {
        let total: f64 = dimensions.iter().map(|d| d.weighted_score).sum();
        round2(total.clamp(0.0, 100.0))
    };

    ScoreBreakdown {
        overall,
        dimensions,
        tier: determine_driver_tier(overall),
    }
}

/// Scan tier configs from the highest `min_score` downward and return the
/// first tier the score reaches. The configured ranges cover [0, 100], so
/// the bronze fallback only matters for out-of-range inputs.
pub fn determine_driver_tier(score: f64) -> DriverTier {
    TIER_CONFIGS
        .iter()
        .rev()
        .find(|config| config.min_score <= score)
        .map(|config| config.tier)
        .unwrap_or(DriverTier::Bronze)
}

pub fn tier_config(tier: DriverTier) -> &'static TierConfig {
    match TIER_CONFIGS.iter().find(|config| config.tier == tier) {
        Some(config) => config,
        None => {
            // Unreachable for a closed enum; kept as a guard for the table
            warn!("No config found for tier {}, falling back to bronze", tier);
            &TIER_CONFIGS[0]
        }
    }
}

/// Dispatch-ordering bonus for a tier.
pub fn tier_priority_bonus(tier: DriverTier) -> u32 {
    tier_config(tier).priority_bonus
}

/// Pay-rate multiplier for a tier.
pub fn driver_rate_multiplier(tier: DriverTier) -> f64 {
    tier_config(tier).rate_multiplier
}

/// Parse a tier label coming from storage or an API payload.
///
/// Internally produced tiers never hit the fallback; external data can.
pub fn tier_from_label(label: &str) -> DriverTier {
    DriverTier::from_str(label).unwrap_or_else(|_| {
        warn!("Unrecognized tier label '{}', falling back to bronze", label);
        DriverTier::Bronze
    })
}

/// Human-readable one-line assessment, bucketed by score.
pub fn driver_score_summary(metrics: &DriverMetrics) -> String {
    if metrics.total_deliveries < MIN_SCORING_DELIVERIES {
        return format!(
            "Driver {} holds a provisional score of {:.0} ({} of {} qualifying deliveries completed)",
            metrics.driver_id, PROVISIONAL_SCORE, metrics.total_deliveries, MIN_SCORING_DELIVERIES
        );
    }

    let score = calculate_driver_score(metrics);
    let tier = determine_driver_tier(score);
    let assessment = if score >= 90.0 {
        "an outstanding performer"
    } else if score >= 75.0 {
        "an excellent performer"
    } else if score >= 60.0 {
        "a good performer"
    } else if score >= 40.0 {
        "an average performer"
    } else {
        "performing below average"
    };

    format!(
        "Driver {} is {} with a score of {:.2} ({} tier)",
        metrics.driver_id,
        assessment,
        score,
        tier_config(tier).label
    )
}
