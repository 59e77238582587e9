#![allow(dead_code)]

pub mod mocks;

use chrono::{Duration, Utc};
use common::test_helpers::days_ago;
use scoring::model::{DriverMetrics, ScoreHistoryPoint, ZoneAverages};
use scoring::scorer::determine_driver_tier;

/// The reference high performer: 95% completion, 4.8 rating, ~94.7% on-time,
/// 80% acceptance, 5% cancellation. Scores ~92.7 (diamond).
pub fn clean_metrics(driver_id: &str) -> DriverMetrics {
    DriverMetrics {
        driver_id: driver_id.to_string(),
        total_deliveries: 100,
        completed_deliveries: 95,
        average_rating: 4.8,
        total_ratings: 40,
        on_time_deliveries: 90,
        accepted_orders: 80,
        offered_orders: 100,
        cancelled_orders: 5,
        fraud_flags: 0,
        last_active_at: Utc::now(),
        account_created_at: days_ago(365),
        zone_id: None,
    }
}

/// Fails the completion, cancellation and acceptance deactivation rules at
/// once: 36% completion, 54% cancellation, 18% acceptance. Scores 39.8
/// (bronze).
pub fn struggling_metrics(driver_id: &str) -> DriverMetrics {
    DriverMetrics {
        driver_id: driver_id.to_string(),
        total_deliveries: 50,
        completed_deliveries: 18,
        average_rating: 2.8,
        total_ratings: 12,
        on_time_deliveries: 9,
        accepted_orders: 9,
        offered_orders: 50,
        cancelled_orders: 27,
        fraud_flags: 0,
        last_active_at: Utc::now(),
        account_created_at: days_ago(200),
        zone_id: None,
    }
}

/// Below the 5-delivery scoring floor; always provisional.
pub fn new_driver_metrics(driver_id: &str) -> DriverMetrics {
    DriverMetrics {
        driver_id: driver_id.to_string(),
        total_deliveries: 3,
        completed_deliveries: 3,
        average_rating: 5.0,
        total_ratings: 2,
        on_time_deliveries: 3,
        accepted_orders: 3,
        offered_orders: 3,
        cancelled_orders: 0,
        fraud_flags: 0,
        last_active_at: Utc::now(),
        account_created_at: days_ago(7),
        zone_id: None,
    }
}

pub fn zone_averages(zone_id: &str) -> ZoneAverages {
    ZoneAverages {
        zone_id: zone_id.to_string(),
        average_rating: 4.5,
        average_completion_rate: 90.0,
        average_on_time_rate: 85.0,
        average_acceptance_rate: 80.0,
        average_cancellation_rate: 10.0,
        driver_count: 25,
    }
}

/// Weekly score history ending now, tiers derived from the scores.
pub fn score_history(scores: &[f64]) -> Vec<ScoreHistoryPoint> {
    let count = scores.len() as i64;
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| ScoreHistoryPoint {
            date: Utc::now() - Duration::weeks(count - 1 - i as i64),
            score,
            tier: determine_driver_tier(score),
        })
        .collect()
}
