use futures::future::join_all;

use crate::model::{DriverMetrics, DriverTier, RankedDriver};
use crate::scorer::{calculate_driver_score, determine_driver_tier};

/// Score a fleet concurrently and rank it best-first.
///
/// Scoring is a pure function of each snapshot, so drivers fan out across
/// tokio tasks with no coordination.
pub async fn batch_score_drivers(drivers: Vec<DriverMetrics>) -> Vec<RankedDriver> {
    let tasks = drivers.into_iter().map(|metrics| {
        tokio::spawn(async move {
            let score = calculate_driver_score(&metrics);
            RankedDriver {
                driver_id: metrics.driver_id,
                score,
                tier: determine_driver_tier(score),
            }
        })
    });

    let mut ranked: Vec<RankedDriver> = join_all(tasks)
        .await
        .into_iter()
        .filter_map(Result::ok)
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Keep drivers whose computed tier ranks at or above `min_tier`.
pub fn filter_drivers_by_min_tier(
    drivers: &[DriverMetrics],
    min_tier: DriverTier,
) -> Vec<DriverMetrics> {
    drivers
        .iter()
        .filter(|metrics| {
            let tier = determine_driver_tier(calculate_driver_score(metrics));
            tier >= min_tier
        })
        .cloned()
        .collect()
}
